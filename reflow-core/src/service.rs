//! The boundary the core consumes from the external task-management
//! service (C8's two verbs), and the update payload C5 builds against it.

use async_trait::async_trait;
use serde::Serialize;

use crate::task::Task;

/// Update payload subset the core ever needs to send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
}

/// The two verbs the planner core needs from the remote task service.
#[async_trait]
pub trait TaskService {
    type Error: std::fmt::Display + Send + Sync + 'static;

    /// Fetch every task matching `query`. An empty query yields an empty
    /// result. Implementations may page internally; this returns the
    /// fully-materialized set for the run.
    async fn filter(&self, query: &str) -> Result<Vec<Task>, Self::Error>;

    /// Push an update for a single task.
    async fn update(&self, task_id: &str, payload: &UpdatePayload) -> Result<(), Self::Error>;
}
