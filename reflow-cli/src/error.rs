//! Top-level error type for the reflow binary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Rule(#[from] reflow_core::RuleError),

    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },

    #[error("invalid time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("planner run failed: {0}")]
    Run(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
