//! Datasets sub-client: one day of trades, raw or ready for charting.

use crate::client::TradeChartClient;
use crate::domain::dataset::{normalize, Dataset, PartitionedDataset, Partitioner, RawDataset};
use crate::error::FetchError;
use crate::shared::LookupKey;

pub struct Datasets<'a> {
    pub(crate) client: &'a TradeChartClient,
}

impl<'a> Datasets<'a> {
    /// Records exactly as received.
    pub async fn fetch(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
        self.client.http.get_dataset(key).await
    }

    /// Records sorted by timestamp.
    pub async fn get(&self, key: &LookupKey) -> Result<Dataset, FetchError> {
        Ok(normalize(self.fetch(key).await?))
    }

    /// Buy/sell series ready for charting, using the client's partitioner.
    pub async fn load(&self, key: &LookupKey) -> Result<PartitionedDataset, FetchError> {
        let dataset = self.get(key).await?;
        Ok(self.client.partitioner.partition(&dataset))
    }

    pub fn partitioner(&self) -> Partitioner {
        self.client.partitioner
    }
}
