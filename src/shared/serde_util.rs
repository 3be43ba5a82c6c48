//! Custom serde helpers for backend wire formats.

/// Deserializes any JSON value into a side tag string.
///
/// The backend tags sides with `"buy"`/`"sell"` strings, but a malformed
/// payload may carry anything there. Strings pass through unchanged; every
/// other value is kept as its JSON text so it can be reported later instead
/// of failing the whole dataset.
pub mod side_tag {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

/// Deserializes a trade price without rejecting the record.
///
/// Numbers pass through. Numeric strings (including `"NaN"` and `"inf"`) are
/// parsed. `null` (how a NaN price is serialized) and anything else become
/// `f64::NAN`.
pub mod lenient_price {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
            _ => f64::NAN,
        })
    }
}

/// Deserializes a millisecond timestamp without rejecting the record.
///
/// Integers pass through, fractional numbers are truncated (saturating at the
/// `i64` bounds), numeric strings are parsed. Anything else becomes
/// [`MISSING_TIMESTAMP`](crate::shared::MISSING_TIMESTAMP).
pub mod lenient_timestamp {
    use crate::shared::MISSING_TIMESTAMP;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn from_f64(f: f64) -> i64 {
        if f.is_finite() {
            f.trunc() as i64
        } else {
            MISSING_TIMESTAMP
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Number(n) => n
                .as_i64()
                .unwrap_or_else(|| n.as_f64().map_or(MISSING_TIMESTAMP, from_f64)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .unwrap_or_else(|_| s.parse::<f64>().map_or(MISSING_TIMESTAMP, from_f64))
            }
            _ => MISSING_TIMESTAMP,
        })
    }
}
