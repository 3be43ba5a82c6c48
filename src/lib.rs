//! # tradechart
//!
//! Client side of a historical trade dataset service: fetch one day of trades
//! for an exchange and pair, order them, split them by side, and hand a chart
//! configuration to whatever draws it. Native and WASM targets.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Identifiers, trade records, normalizer, partitioner (always available, WASM-safe)
//! 2. **Chart**: `ChartOptions`, `Theme`, and the `ChartPresenter` seam
//! 3. **HTTP API**: `DatasetHttp`, a single request per lookup
//! 4. **Lookup**: `LookupForm` input state, the `LookupController` state machine, opt-in retry
//! 5. **High-Level Client**: `TradeChartClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tradechart::prelude::*;
//!
//! let client = TradeChartClient::builder()
//!     .base_url("http://localhost:2137")
//!     .build()?;
//!
//! let key = LookupKey::new("binance", "BTC-USDT", NaiveDate::from_ymd_opt(2022, 9, 13).unwrap());
//! let parts = client.datasets().load(&key).await?;
//!
//! let controller = LookupController::new(client, my_presenter);
//! controller.lookup(&LookupForm::new("binance", "BTC-USDT", DateField::today_local())).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all modules.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Chart ───────────────────────────────────────────────────────────

/// Chart configuration, theme and presenter trait.
pub mod chart;

// ── Layer 3: HTTP API ────────────────────────────────────────────────────────

/// HTTP client for the dataset endpoint.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Lookup ──────────────────────────────────────────────────────────

/// Lookup input, dataset source seam and controller.
pub mod lookup;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `TradeChartClient`: the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{ExchangeId, LookupKey, PairId, Side};
    pub use chrono::NaiveDate;

    // Domain types: dataset
    pub use crate::domain::dataset::{
        normalize, partition, Dataset, MalformedReason, MalformedRecord, PartitionedDataset,
        Partitioner, RawDataset, Series, SideTag, TradeRecord,
    };

    // Chart
    pub use crate::chart::{ChartOptions, ChartPresenter, Theme};

    // Lookup
    pub use crate::lookup::{
        DatasetSource, DateField, InputEvent, InputField, LookupController, LookupForm,
        LookupOutcome, LookupState, RenderSummary, RetryConfig, RetryPolicy,
    };

    // Errors
    pub use crate::error::{FetchError, LookupError, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{DatasetsClient, TradeChartClient, TradeChartClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::DatasetHttp;
}
