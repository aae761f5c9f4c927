//! Update Dispatcher (C5): for every task whose planned date differs
//! from its current due date, builds an update payload (preserving
//! time-of-day when present) and submits it to the task service under
//! the retry wrapper. All updates for a run are launched concurrently
//! and awaited together.

use chrono::NaiveDate;

use crate::planner::Plan;
use crate::retry::{with_retry, RetryConfig};
use crate::service::{TaskService, UpdatePayload};
use crate::task::Due;

/// One task's rescheduling outcome, for logging/reporting by the caller.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// The task's due date already equalled its planned date; nothing
    /// was sent.
    NoOp { task_id: String },
    /// An update was sent (or, under `dry_run`, would have been).
    Updated {
        task_id: String,
        planned_date: NaiveDate,
        dry_run: bool,
    },
    /// The update failed after the retry wrapper exhausted its attempts.
    Failed { task_id: String, error: String },
}

fn build_payload(planned_date: NaiveDate, due: &Due) -> UpdatePayload {
    match due {
        Due::Date(_) => UpdatePayload {
            due_date: Some(planned_date.format("%Y-%m-%d").to_string()),
            due_datetime: None,
            due_string: None,
        },
        Due::DateTime { at, original_string } => {
            let new_at = planned_date.and_time(at.time());
            UpdatePayload {
                due_date: None,
                due_datetime: Some(new_at.format("%Y-%m-%dT%H:%M:%S").to_string()),
                due_string: original_string.clone(),
            }
        }
    }
}

/// Dispatch updates for a completed plan. Returns one outcome per task
/// considered (including no-ops), in no particular order.
pub async fn dispatch<S: TaskService + Sync>(
    service: &S,
    plan: &Plan,
    dry_run: bool,
    retry_config: &RetryConfig,
) -> Vec<DispatchOutcome> {
    let mut pending = Vec::new();

    for (&planned_date, tasks) in plan {
        for weighted in tasks {
            let task = &weighted.task;
            if task.due.date() == planned_date {
                pending.push(futures::future::Either::Left(async move {
                    DispatchOutcome::NoOp {
                        task_id: task.id.clone(),
                    }
                }));
                continue;
            }

            tracing::info!(
                task_id = %task.id,
                content = %task.content,
                from = %task.due.date(),
                to = %planned_date,
                "rescheduling task"
            );

            let payload = build_payload(planned_date, &task.due);

            pending.push(futures::future::Either::Right(async move {
                if dry_run {
                    return DispatchOutcome::Updated {
                        task_id: task.id.clone(),
                        planned_date,
                        dry_run: true,
                    };
                }

                let result = with_retry(retry_config, || service.update(&task.id, &payload)).await;
                match result {
                    Ok(()) => DispatchOutcome::Updated {
                        task_id: task.id.clone(),
                        planned_date,
                        dry_run: false,
                    },
                    Err(error) => DispatchOutcome::Failed {
                        task_id: task.id.clone(),
                        error: error.to_string(),
                    },
                }
            }));
        }
    }

    futures::future::join_all(pending).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingService {
        updates: Mutex<Vec<(String, UpdatePayload)>>,
    }

    #[async_trait]
    impl TaskService for RecordingService {
        type Error = String;

        async fn filter(&self, _query: &str) -> Result<Vec<Task>, Self::Error> {
            Ok(vec![])
        }

        async fn update(&self, task_id: &str, payload: &UpdatePayload) -> Result<(), Self::Error> {
            self.updates
                .lock()
                .unwrap()
                .push((task_id.to_string(), payload.clone()));
            Ok(())
        }
    }

    fn task(id: &str, due: Due) -> Task {
        Task {
            id: id.to_string(),
            content: "content".to_string(),
            labels: vec![],
            priority: 1,
            due,
        }
    }

    #[tokio::test]
    async fn same_date_emits_no_update() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let mut plan = Plan::new();
        plan.insert(
            date,
            vec![crate::task::WeightedTask::new(
                task("t1", Due::Date(date)),
                0,
            )],
        );

        let service = RecordingService::default();
        let outcomes = dispatch(&service, &plan, false, &RetryConfig { max_attempts: 1 }).await;

        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], DispatchOutcome::NoOp { .. }));
        assert!(service.updates.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn differing_date_emits_due_date_update() {
        let old_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let new_date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let mut plan = Plan::new();
        plan.insert(
            new_date,
            vec![crate::task::WeightedTask::new(
                task("t1", Due::Date(old_date)),
                0,
            )],
        );

        let service = RecordingService::default();
        let outcomes = dispatch(&service, &plan, false, &RetryConfig { max_attempts: 1 }).await;

        assert_eq!(outcomes.len(), 1);
        assert!(matches!(outcomes[0], DispatchOutcome::Updated { .. }));
        let updates = service.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].1.due_date.as_deref(), Some("2025-01-05"));
        assert_eq!(updates[0].1.due_datetime, None);
    }

    #[tokio::test]
    async fn preserves_time_of_day_and_original_string_for_datetime_due() {
        use chrono::NaiveDateTime;

        let old_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let new_date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let at: NaiveDateTime = old_date.and_hms_opt(12, 0, 0).unwrap();
        let due = Due::DateTime {
            at,
            original_string: Some("tomorrow at 12".to_string()),
        };

        let mut plan = Plan::new();
        plan.insert(
            new_date,
            vec![crate::task::WeightedTask::new(task("t1", due), 0)],
        );

        let service = RecordingService::default();
        let outcomes = dispatch(&service, &plan, false, &RetryConfig { max_attempts: 1 }).await;
        assert!(matches!(outcomes[0], DispatchOutcome::Updated { .. }));

        let updates = service.updates.lock().unwrap();
        assert_eq!(
            updates[0].1.due_datetime.as_deref(),
            Some("2025-01-05T12:00:00")
        );
        assert_eq!(updates[0].1.due_string.as_deref(), Some("tomorrow at 12"));
    }

    #[tokio::test]
    async fn dry_run_emits_no_call_to_the_service() {
        let old_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let new_date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let mut plan = Plan::new();
        plan.insert(
            new_date,
            vec![crate::task::WeightedTask::new(
                task("t1", Due::Date(old_date)),
                0,
            )],
        );

        let service = RecordingService::default();
        let outcomes = dispatch(&service, &plan, true, &RetryConfig { max_attempts: 1 }).await;
        assert!(matches!(
            outcomes[0],
            DispatchOutcome::Updated { dry_run: true, .. }
        ));
        assert!(service.updates.lock().unwrap().is_empty());
    }
}
