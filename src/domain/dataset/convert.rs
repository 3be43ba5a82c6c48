//! Conversions from wire types to domain types for datasets.

use super::wire::{DatasetResponse, WireTrade};
use super::{RawDataset, SideTag, TradeRecord};

impl From<WireTrade> for TradeRecord {
    fn from(t: WireTrade) -> Self {
        match t {
            WireTrade::Positional(timestamp, price, side) => Self {
                timestamp,
                price,
                side: SideTag::new(side),
            },
            WireTrade::Keyed {
                timestamp,
                price,
                side,
            } => Self {
                timestamp,
                price,
                side: SideTag::new(side),
            },
        }
    }
}

impl From<DatasetResponse> for RawDataset {
    fn from(resp: DatasetResponse) -> Self {
        RawDataset(resp.into_iter().map(TradeRecord::from).collect())
    }
}
