//! Error taxonomy shared by the loader, the engine, and the output writers.
//!
//! Every variant is fatal for the run it occurs in: there is no partial
//! result mode.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FloodError {
    /// Required input columns are absent from the header.
    #[error("missing required columns: {missing:?} (found: {found:?})")]
    Schema {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A required numeric column has no usable value in any record.
    #[error("column '{column}' has no numeric values after parsing")]
    DataQuality { column: String },

    /// Zero input records, or zero calendar days to report on.
    #[error("no hourly records to assess")]
    EmptyInput,

    /// Timestamps are not strictly ascending.
    #[error("record {index} at {current} does not follow {previous}; timestamps must be strictly ascending")]
    OrderingViolation {
        index: usize,
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },

    #[error("line {line}: unparseable timestamp '{value}'")]
    InvalidTimestamp { line: u64, value: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
