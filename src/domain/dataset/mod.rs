//! Dataset domain: trade records and the transforms applied before charting.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod partition;
pub mod wire;

use crate::shared::Side;
use serde::Serialize;

pub use partition::{
    partition, MalformedReason, MalformedRecord, PartitionedDataset, Partitioner, Series,
};

/// Raw side tag exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SideTag(String);

impl SideTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` for anything other than the two recognized tags.
    pub fn side(&self) -> Option<Side> {
        Side::from_tag(&self.0)
    }
}

impl From<Side> for SideTag {
    fn from(side: Side) -> Self {
        Self(side.as_str().to_string())
    }
}

impl std::fmt::Display for SideTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One observed trade.
///
/// `timestamp` and `price` are carried as received; only the side tag is
/// classified, and only at partition time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    pub price: f64,
    pub side: SideTag,
}

impl TradeRecord {
    pub fn new(timestamp: i64, price: f64, side: impl Into<String>) -> Self {
        Self {
            timestamp,
            price,
            side: SideTag::new(side),
        }
    }
}

/// Trade records in the order the backend sent them. Order is untrusted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawDataset(pub Vec<TradeRecord>);

impl RawDataset {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trade records sorted non-decreasing by timestamp.
///
/// Only constructible through [`normalize`], so the ordering always holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<TradeRecord>,
}

impl Dataset {
    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<TradeRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First and last timestamp, if any.
    pub fn time_range(&self) -> Option<(i64, i64)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

/// Stable sort by timestamp ascending.
///
/// Records sharing a timestamp keep their received relative order. Nothing
/// is dropped or modified.
pub fn normalize(raw: RawDataset) -> Dataset {
    let mut records = raw.0;
    records.sort_by_key(|r| r.timestamp);
    Dataset { records }
}
