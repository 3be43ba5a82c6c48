//! Wire types for the dataset endpoint.

use crate::shared::serde_util::{lenient_price, lenient_timestamp, side_tag};
use serde::Deserialize;

/// A single trade record as sent by the backend.
///
/// The backend streams positional triples `[timestamp, price, side]`; the
/// keyed object form is accepted as an equivalent. Field values are read
/// leniently so one odd record never fails the whole dataset: a NaN price
/// arrives as `null` and becomes `f64::NAN`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireTrade {
    Positional(
        #[serde(deserialize_with = "lenient_timestamp::deserialize")] i64,
        #[serde(deserialize_with = "lenient_price::deserialize")] f64,
        #[serde(deserialize_with = "side_tag::deserialize")] String,
    ),
    Keyed {
        #[serde(deserialize_with = "lenient_timestamp::deserialize")]
        timestamp: i64,
        #[serde(deserialize_with = "lenient_price::deserialize")]
        price: f64,
        #[serde(deserialize_with = "side_tag::deserialize")]
        side: String,
    },
}

/// Body of a 2xx dataset response.
pub type DatasetResponse = Vec<WireTrade>;

/// Body of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}
