//! Low-level HTTP client: `DatasetHttp`.
//!
//! Builds the dataset URL, performs the request and classifies the response.
//! Returns domain `RawDataset`s; ordering and partitioning happen above.

use crate::domain::dataset::wire::{DatasetResponse, ErrorEnvelope};
use crate::domain::dataset::RawDataset;
use crate::error::FetchError;
use crate::network::DATASET_PATH;
use crate::shared::LookupKey;

use reqwest::Client;
use std::time::Duration;

/// Default request timeout (native only; the browser owns it on WASM).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Low-level HTTP client for the dataset endpoint.
///
/// One request per call; repeating failed lookups is up to the caller.
#[derive(Debug, Clone)]
pub struct DatasetHttp {
    base_url: String,
    client: Client,
}

impl DatasetHttp {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    #[cfg_attr(target_arch = "wasm32", allow(unused_variables, unused_mut))]
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(4);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}/dataset/{exchange}/{pair}/{date}` with every segment encoded
    /// on its own, so separators inside identifiers stay inside their segment.
    pub fn dataset_url(&self, key: &LookupKey) -> String {
        format!(
            "{}{}/{}/{}/{}",
            self.base_url,
            DATASET_PATH,
            urlencoding::encode(key.exchange.as_str()),
            urlencoding::encode(key.pair.as_str()),
            urlencoding::encode(&key.date_str()),
        )
    }

    // ── Datasets ─────────────────────────────────────────────────────────

    pub async fn get_dataset(&self, key: &LookupKey) -> Result<RawDataset, FetchError> {
        let url = self.dataset_url(key);
        tracing::debug!(%key, "Fetching dataset from {}", url);
        let resp: DatasetResponse = self.do_get(&url).await?;
        Ok(RawDataset::from(resp))
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn do_get(&self, url: &str) -> Result<DatasetResponse, FetchError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?;
        decode_response(status, &body)
    }
}

/// Classify a received response.
///
/// 2xx bodies decode as a dataset; anything else must carry an
/// `{"error": ...}` envelope whose message is surfaced verbatim.
pub(crate) fn decode_response(status: u16, body: &[u8]) -> Result<DatasetResponse, FetchError> {
    if (200..300).contains(&status) {
        return serde_json::from_slice::<DatasetResponse>(body)
            .map_err(|e| FetchError::Decode(format!("dataset (status {}): {}", status, e)));
    }

    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => Err(FetchError::Server {
            status,
            message: envelope.error,
        }),
        Err(e) => {
            tracing::warn!(status, "Error response without a readable envelope: {}", e);
            Err(FetchError::Decode(format!(
                "error envelope (status {}): {}",
                status, e
            )))
        }
    }
}
