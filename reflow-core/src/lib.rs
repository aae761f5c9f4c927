//! Core reschedule-planner domain logic: rule parsing, task
//! classification, knapsack packing, day-by-day planning, update
//! dispatch and the retry wrapper shared across I/O boundaries.
//!
//! This crate has no opinion on *how* tasks are fetched or updated —
//! that's [`service::TaskService`], implemented by `reflow-api` against
//! the real remote and by test fakes everywhere else.

pub mod dispatcher;
pub mod error;
pub mod knapsack;
pub mod planner;
pub mod retry;
pub mod rules;
pub mod service;
pub mod task;
pub mod weighted_adapter;

pub use dispatcher::{dispatch, DispatchOutcome};
pub use error::RuleError;
pub use planner::{plan, Plan};
pub use retry::{with_retry, RetryConfig};
pub use rules::{Capacity, Rule, RuleSet, WeekdayCapacity};
pub use service::{TaskService, UpdatePayload};
pub use task::{Due, Task, WeightedTask};
pub use weighted_adapter::classify;

use chrono::NaiveDate;

/// Run one end-to-end planner cycle: fetch, classify, plan, dispatch.
///
/// `start_date` overrides "today in the configured time zone" — used by
/// tests that need a deterministic planning horizon (pinned scenarios
/// need this since the plan depends on the current date).
pub async fn run<S: TaskService + Sync>(
    service: &S,
    filter_query: &str,
    rules: &RuleSet,
    start_date: NaiveDate,
    dry_run: bool,
    retry_config: &RetryConfig,
) -> Result<Vec<DispatchOutcome>, S::Error> {
    let fetched = with_retry(retry_config, || service.filter(filter_query)).await?;
    tracing::info!(count = fetched.len(), "fetched tasks");

    let weighted: Vec<WeightedTask> = fetched
        .into_iter()
        .filter_map(|task| classify(task, rules))
        .collect();
    tracing::info!(count = weighted.len(), "classified tasks");

    let the_plan = plan(weighted, rules, start_date);
    let outcomes = dispatch(service, &the_plan, dry_run, retry_config).await;

    let updated = outcomes
        .iter()
        .filter(|o| matches!(o, DispatchOutcome::Updated { dry_run: false, .. }))
        .count();
    let failed = outcomes
        .iter()
        .filter(|o| matches!(o, DispatchOutcome::Failed { .. }))
        .count();
    tracing::info!(updated, failed, "planner run complete");

    Ok(outcomes)
}

#[cfg(any(test, feature = "testing"))]
pub mod testing {
    //! A fake [`TaskService`] for integration tests, grounded on
    //! `examples/original_source/src/postpwn/api.py`'s `FakeTodoistAPI`:
    //! returns a fixed task list, and fails authentication for any token
    //! other than a configured "valid" one.

    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::service::{TaskService, UpdatePayload};
    use crate::task::Task;

    #[derive(Debug, thiserror::Error)]
    pub enum FakeError {
        #[error("401 unauthorized")]
        Unauthorized,
    }

    pub struct FakeTaskService {
        token: String,
        valid_token: String,
        tasks: Vec<Task>,
        pub updates: Mutex<Vec<(String, UpdatePayload)>>,
    }

    impl FakeTaskService {
        pub fn new(token: impl Into<String>, tasks: Vec<Task>) -> Self {
            Self {
                token: token.into(),
                valid_token: "VALID_TOKEN".to_string(),
                tasks,
                updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TaskService for FakeTaskService {
        type Error = FakeError;

        async fn filter(&self, query: &str) -> Result<Vec<Task>, Self::Error> {
            if self.token != self.valid_token {
                return Err(FakeError::Unauthorized);
            }
            if query.is_empty() {
                return Ok(Vec::new());
            }
            Ok(self.tasks.clone())
        }

        async fn update(&self, task_id: &str, payload: &UpdatePayload) -> Result<(), Self::Error> {
            if self.token != self.valid_token {
                return Err(FakeError::Unauthorized);
            }
            self.updates
                .lock()
                .unwrap()
                .push((task_id.to_string(), payload.clone()));
            Ok(())
        }
    }
}
