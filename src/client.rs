//! High-level client: `TradeChartClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder and accessor methods.

use crate::domain::dataset::client::Datasets;
use crate::domain::dataset::Partitioner;
use crate::error::SdkError;
use crate::http::client::DEFAULT_TIMEOUT;
use crate::http::DatasetHttp;

use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::domain::dataset::client::Datasets as DatasetsClient;

/// The primary entry point for fetching trade datasets.
///
/// `client.datasets().load(&key)` fetches, orders and partitions one day.
#[derive(Debug, Clone)]
pub struct TradeChartClient {
    pub(crate) http: DatasetHttp,
    pub(crate) partitioner: Partitioner,
}

impl TradeChartClient {
    pub fn builder() -> TradeChartClientBuilder {
        TradeChartClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn datasets(&self) -> Datasets<'_> {
        Datasets { client: self }
    }

    pub fn http(&self) -> &DatasetHttp {
        &self.http
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TradeChartClientBuilder {
    base_url: String,
    timeout: Duration,
    partitioner: Partitioner,
}

impl Default for TradeChartClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            partitioner: Partitioner::new(),
        }
    }
}

impl TradeChartClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Request timeout. Ignored on WASM, where the browser owns it.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Partitioner used by `datasets().load()`.
    pub fn partitioner(mut self, partitioner: Partitioner) -> Self {
        self.partitioner = partitioner;
        self
    }

    pub fn build(self) -> Result<TradeChartClient, SdkError> {
        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(SdkError::Other("base_url must not be empty".to_string()));
        }
        tracing::debug!(
            base_url,
            timeout_ms = self.timeout.as_millis() as u64,
            "Building dataset client"
        );
        Ok(TradeChartClient {
            http: DatasetHttp::with_timeout(base_url, self.timeout)?,
            partitioner: self.partitioner,
        })
    }
}
