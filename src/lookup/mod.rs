//! Lookup flow: user input, the dataset source seam and the controller that
//! ties fetching to presentation.

pub mod controller;
pub mod form;
pub mod retry;

pub use controller::{LookupController, LookupOutcome, LookupState, RenderSummary};
pub use form::{DateField, InputEvent, InputField, LookupForm, ENTER_KEY};
pub use retry::{RetryConfig, RetryPolicy};

use crate::domain::dataset::RawDataset;
use crate::error::FetchError;
use crate::shared::LookupKey;

/// Where a [`LookupController`] gets its datasets from.
///
/// Implemented by [`TradeChartClient`](crate::client::TradeChartClient) and
/// [`DatasetHttp`](crate::http::DatasetHttp); tests supply their own.
#[allow(async_fn_in_trait)]
pub trait DatasetSource {
    async fn fetch_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for &T {
    async fn fetch_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
        (**self).fetch_dataset(key).await
    }
}

impl<T: DatasetSource + ?Sized> DatasetSource for std::sync::Arc<T> {
    async fn fetch_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
        (**self).fetch_dataset(key).await
    }
}

#[cfg(feature = "http")]
impl DatasetSource for crate::http::DatasetHttp {
    async fn fetch_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
        self.get_dataset(key).await
    }
}

#[cfg(feature = "http")]
impl DatasetSource for crate::client::TradeChartClient {
    async fn fetch_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
        self.datasets().fetch(key).await
    }
}
