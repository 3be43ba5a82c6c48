//! Shared newtypes and utilities used across all modules.
//!
//! The identifier types are serialization-transparent: they serialize and
//! deserialize as the bare string the backend uses in its URL paths.

pub mod serde_util;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Wire/URL format of a dataset date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp given to a record whose wire timestamp is not a number.
/// Sorts before every real timestamp.
pub const MISSING_TIMESTAMP: i64 = i64::MIN;

// ─── ExchangeId ──────────────────────────────────────────────────────────────

/// Newtype for exchange identifiers (e.g. `"binance"`, `"olx"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExchangeId(String);

impl ExchangeId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for ExchangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExchangeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ExchangeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for ExchangeId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ExchangeId(s.to_string()))
    }
}

impl Serialize for ExchangeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ExchangeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ExchangeId(s))
    }
}

// ─── PairId ──────────────────────────────────────────────────────────────────

/// Newtype for currency pair identifiers (e.g. `"BTC-USDT"`).
///
/// Opaque to the client: the backend decides how to split it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairId(String);

impl PairId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PairId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PairId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Serialize for PairId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PairId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(PairId(s))
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Trade side as tagged by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }

    /// Classify a raw wire tag. Exact, case-sensitive match.
    pub fn from_tag(tag: &str) -> Option<Side> {
        match tag {
            "buy" => Some(Side::Buy),
            "sell" => Some(Side::Sell),
            _ => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── LookupKey ───────────────────────────────────────────────────────────────

/// The `(exchange, pair, date)` triple identifying one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LookupKey {
    pub exchange: ExchangeId,
    pub pair: PairId,
    pub date: NaiveDate,
}

impl LookupKey {
    pub fn new(exchange: impl Into<ExchangeId>, pair: impl Into<PairId>, date: NaiveDate) -> Self {
        Self {
            exchange: exchange.into(),
            pair: pair.into(),
            date,
        }
    }

    /// Date formatted as `YYYY-MM-DD`.
    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for LookupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.exchange, self.pair, self.date_str())
    }
}

// ─── Utilities ───────────────────────────────────────────────────────────────

/// The day before `today`: the freshest complete day of trades.
///
/// Saturates at `NaiveDate::MIN`.
pub fn previous_day(today: NaiveDate) -> NaiveDate {
    today.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN)
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
}
