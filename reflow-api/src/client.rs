//! Todoist REST v2 client: the concrete implementation of
//! [`reflow_core::TaskService`] the CLI wires up against the real
//! remote (`examples/original_source` targets the same API through
//! `todoist_api_python`).

use async_trait::async_trait;
use reflow_core::{Task, TaskService, UpdatePayload};
use reqwest::{Client, StatusCode};

use crate::error::ApiError;
use crate::model::RawTask;

const BASE_URL: &str = "https://api.todoist.com/rest/v2";

pub struct TodoistClient {
    http: Client,
    token: String,
    base_url: String,
}

impl TodoistClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the client at a different base URL (test doubles).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Auth),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after_secs = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                Err(ApiError::RateLimited { retry_after_secs })
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::Http {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl TaskService for TodoistClient {
    type Error = ApiError;

    async fn filter(&self, query: &str) -> Result<Vec<Task>, Self::Error> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = self
            .http
            .get(format!("{}/tasks", self.base_url))
            .bearer_auth(&self.token)
            .query(&[("filter", query)])
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let raw_tasks: Vec<RawTask> = response.json().await?;
        let tasks: Vec<Task> = raw_tasks
            .into_iter()
            .filter_map(|raw| {
                let id = raw.id.clone();
                let task = raw.into_task();
                if task.is_none() {
                    tracing::warn!(task_id = %id, "dropping task with unparseable due date");
                }
                task
            })
            .collect();
        Ok(tasks)
    }

    async fn update(&self, task_id: &str, payload: &UpdatePayload) -> Result<(), Self::Error> {
        let response = self
            .http
            .post(format!("{}/tasks/{}", self.base_url, task_id))
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
