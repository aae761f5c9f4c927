//! Error types for the reschedule planner core.

use thiserror::Error;

/// Errors raised while loading or validating a rule file.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rule {index} has an empty filter")]
    EmptyFilter { index: usize },

    #[error("rule {index} has non-positive weight {weight}")]
    NonPositiveWeight { index: usize, weight: i64 },

    #[error("rule {index} has non-positive limit {limit}")]
    NonPositiveLimit { index: usize, limit: i64 },

    #[error("max_weight must be a positive integer or a complete per-weekday record")]
    InvalidCapacity,

    #[error("rule '{filter}' weight {weight} exceeds capacity ceiling {ceiling}")]
    WeightExceedsCapacity {
        filter: String,
        weight: i64,
        ceiling: i64,
    },
}
