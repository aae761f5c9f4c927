//! Task and due-date types.
//!
//! `Due` is kept as a tagged enum rather than collapsed into a single
//! datetime: losing the date-only/datetime distinction would spuriously
//! add a `00:00:00` time-of-day to updates for tasks that never had one.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A task's due value, as returned by the remote task service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Due {
    /// A pure calendar date, e.g. `"2025-01-05"`.
    Date(NaiveDate),
    /// A date plus time-of-day, with the service's original free-form
    /// string kept alongside so a later re-parse doesn't clobber it.
    DateTime {
        at: NaiveDateTime,
        #[serde(default)]
        original_string: Option<String>,
    },
}

impl Due {
    /// The date portion, regardless of variant.
    pub fn date(&self) -> NaiveDate {
        match self {
            Due::Date(d) => *d,
            Due::DateTime { at, .. } => at.date(),
        }
    }

    pub fn original_string(&self) -> Option<&str> {
        match self {
            Due::Date(_) => None,
            Due::DateTime {
                original_string, ..
            } => original_string.as_deref(),
        }
    }
}

/// A task fetched from the remote task-management service.
///
/// Tasks with no `due` are excluded by the upstream filter and are not
/// modeled here; `due` is required, not optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub priority: u8,
    pub due: Due,
}

/// A task paired with its rule-derived cost.
///
/// Modeled as composition rather than a `Task` subtype: this keeps the
/// remote data model immutable and avoids inheritance machinery that
/// doesn't map cleanly onto Rust's ownership model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTask {
    pub task: Task,
    pub weight: u32,
}

impl WeightedTask {
    pub fn new(task: Task, weight: u32) -> Self {
        Self { task, weight }
    }

    pub fn priority(&self) -> u32 {
        self.task.priority as u32
    }
}
