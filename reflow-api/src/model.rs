//! Wire shapes for the Todoist REST v2 task resource, and their
//! conversion into [`reflow_core::Task`].

use chrono::{NaiveDate, NaiveDateTime};
use reflow_core::{Due, Task};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RawDue {
    pub date: String,
    #[serde(default)]
    pub datetime: Option<String>,
    #[serde(default)]
    pub string: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub priority: u8,
    #[serde(default)]
    pub due: Option<RawDue>,
}

impl RawTask {
    /// Convert into the core's `Task`, dropping tasks with no due date
    /// (the upstream filter is expected to exclude these already; this
    /// is a defensive backstop, not a load-bearing filter).
    pub fn into_task(self) -> Option<Task> {
        let raw_due = self.due?;
        let due = if let Some(datetime) = raw_due.datetime {
            let at = NaiveDateTime::parse_from_str(&datetime, "%Y-%m-%dT%H:%M:%S").ok()?;
            Due::DateTime {
                at,
                original_string: raw_due.string,
            }
        } else {
            let date = NaiveDate::parse_from_str(&raw_due.date, "%Y-%m-%d").ok()?;
            Due::Date(date)
        };

        Some(Task {
            id: self.id,
            content: self.content,
            labels: self.labels,
            priority: self.priority,
            due,
        })
    }
}
