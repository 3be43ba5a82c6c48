//! Unified error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level crate error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Dataset fetch failures. Every variant aborts the current lookup only.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No response was received (offline, DNS failure, connection refused, timeout).
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx status with a decoded `{"error": ...}` envelope.
    /// Displays the server message verbatim.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Response body is not valid JSON or not the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Server { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            FetchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            FetchError::Transport(_) => true,
            _ => false,
        }
    }
}

/// Lookup input validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("{0} must not be empty")]
    EmptyIdentifier(&'static str),

    /// `.` and `..` would be collapsed out of the request path.
    #[error("{field} cannot be '{value}'")]
    ReservedIdentifier { field: &'static str, value: String },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {date} is after the latest available day {max}")]
    DateAfterMax { date: NaiveDate, max: NaiveDate },
}
