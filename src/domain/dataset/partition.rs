//! Side partitioning: splits a normalized dataset into buy and sell series.

use super::{Dataset, TradeRecord};
use crate::shared::{Side, MISSING_TIMESTAMP};
use serde::Serialize;

/// Chart series: `(timestamp, price)` points, serialized as `[[t, p], ...]`.
pub type Series = Vec<(i64, f64)>;

/// Why a record was left out of both series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedReason {
    UnknownSide,
    /// Strict mode only: the wire timestamp was not a number.
    MissingTimestamp,
    /// Strict mode only.
    NegativeTimestamp,
    /// Strict mode only: negative, NaN or infinite.
    InvalidPrice,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::UnknownSide => write!(f, "invalid side"),
            MalformedReason::MissingTimestamp => write!(f, "missing timestamp"),
            MalformedReason::NegativeTimestamp => write!(f, "negative timestamp"),
            MalformedReason::InvalidPrice => write!(f, "invalid price"),
        }
    }
}

/// A rejected record with its position in the normalized dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MalformedRecord {
    pub index: usize,
    pub record: TradeRecord,
    pub reason: MalformedReason,
}

/// Buy/sell split handed to the chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartitionedDataset {
    pub buy: Series,
    pub sell: Series,
    pub rejected: Vec<MalformedRecord>,
}

impl PartitionedDataset {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Number of records the partition was computed from.
    pub fn total(&self) -> usize {
        self.buy.len() + self.sell.len() + self.rejected.len()
    }
}

/// Routes records into buy/sell series, preserving their order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Partitioner {
    strict: bool,
}

impl Partitioner {
    /// Classifies by side tag only; numbers pass through uninterpreted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also rejects missing or negative timestamps and negative or non-finite prices.
    pub fn strict() -> Self {
        Self { strict: true }
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    fn classify(&self, record: &TradeRecord) -> Result<Side, MalformedReason> {
        if self.strict {
            if record.timestamp == MISSING_TIMESTAMP {
                return Err(MalformedReason::MissingTimestamp);
            }
            if record.timestamp < 0 {
                return Err(MalformedReason::NegativeTimestamp);
            }
            if !record.price.is_finite() || record.price < 0.0 {
                return Err(MalformedReason::InvalidPrice);
            }
        }
        record.side.side().ok_or(MalformedReason::UnknownSide)
    }

    pub fn partition(&self, dataset: &Dataset) -> PartitionedDataset {
        let mut out = PartitionedDataset::default();

        for (index, record) in dataset.records().iter().enumerate() {
            match self.classify(record) {
                Ok(Side::Buy) => out.buy.push((record.timestamp, record.price)),
                Ok(Side::Sell) => out.sell.push((record.timestamp, record.price)),
                Err(reason) => {
                    tracing::warn!(
                        index,
                        timestamp = record.timestamp,
                        price = record.price,
                        side = %record.side,
                        "Skipping trade record: {}",
                        reason
                    );
                    out.rejected.push(MalformedRecord {
                        index,
                        record: record.clone(),
                        reason,
                    });
                }
            }
        }

        out
    }
}

/// Default (side-only) partition.
pub fn partition(dataset: &Dataset) -> PartitionedDataset {
    Partitioner::new().partition(dataset)
}
