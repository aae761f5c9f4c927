//! Day-by-Day Planner (C4): sorts the weighted pool by current due date,
//! then packs successive days with the knapsack selector until the pool
//! is empty.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::knapsack;
use crate::rules::RuleSet;
use crate::task::WeightedTask;

/// Ordered mapping from planned date to the tasks assigned that date.
pub type Plan = BTreeMap<NaiveDate, Vec<WeightedTask>>;

/// Build a plan for `pool`, starting from `start_date`.
///
/// Termination is guaranteed by the rule model's invariant that every
/// rule weight is `<= cap_ceiling`, the largest capacity across any day:
/// every task therefore fits on some day, so the pool eventually empties.
pub fn plan(mut pool: Vec<WeightedTask>, rules: &RuleSet, start_date: NaiveDate) -> Plan {
    pool.sort_by_key(|t| t.task.due.date());

    let mut result = Plan::new();
    let mut date = start_date;

    while !pool.is_empty() {
        let capacity = rules.capacity_for(date);
        let selected = knapsack::select(capacity, &pool);

        if selected.is_empty() {
            if capacity <= 0 {
                // No budget at all today; try tomorrow without consuming
                // the pool.
                date += chrono::Duration::days(1);
                continue;
            }
            // Unreachable when rule weights validate against the cap
            // ceiling (see RuleSet::from_parts): the smallest remaining
            // item would have to exceed every day's capacity.
            tracing::error!(
                date = %date,
                capacity,
                "knapsack selected nothing from a non-empty pool at positive capacity"
            );
            break;
        }

        let selected_ids: std::collections::HashSet<&str> =
            selected.iter().map(|t| t.task.id.as_str()).collect();
        pool.retain(|t| !selected_ids.contains(t.task.id.as_str()));

        result.insert(date, selected);
        date += chrono::Duration::days(1);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Capacity;
    use crate::task::{Due, Task};

    fn weighted(id: &str, priority: u8, weight: u32, due: NaiveDate) -> WeightedTask {
        WeightedTask::new(
            Task {
                id: id.to_string(),
                content: id.to_string(),
                labels: vec![],
                priority,
                due: Due::Date(due),
            },
            weight,
        )
    }

    #[test]
    fn every_task_lands_in_exactly_one_day_within_capacity() {
        let rules = RuleSet::from_parts(Capacity::Flat(2), vec![]).unwrap();
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let pool = vec![
            weighted("a", 4, 1, d),
            weighted("b", 3, 1, d),
            weighted("c", 2, 2, d),
            weighted("d", 1, 2, d),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let result = plan(pool.clone(), &rules, start);

        let mut seen = std::collections::HashSet::new();
        for (date, tasks) in &result {
            let total_weight: u32 = tasks.iter().map(|t| t.weight).sum();
            assert!(total_weight <= rules.capacity_for(*date) as u32);
            for t in tasks {
                assert!(seen.insert(t.task.id.clone()));
            }
        }
        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn flat_capacity_with_all_zero_weight_lands_everything_on_first_day() {
        let rules = RuleSet::default();
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let pool = vec![
            weighted("a", 4, 0, d),
            weighted("b", 1, 0, d),
            weighted("c", 3, 0, d),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let result = plan(pool, &rules, start);
        assert_eq!(result.len(), 1);
        assert_eq!(result[&start].len(), 3);
    }

    #[test]
    fn scenario_s4_two_weight_classes_split_across_three_days() {
        // flat cap=2, weight_one=1 (x2), weight_two=2 (x2)
        let rules = RuleSet::from_parts(Capacity::Flat(2), vec![]).unwrap();
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let pool = vec![
            weighted("w1a", 1, 1, d),
            weighted("w1b", 1, 1, d),
            weighted("w2a", 1, 2, d),
            weighted("w2b", 1, 2, d),
        ];
        let start = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let result = plan(pool, &rules, start);

        let day1 = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let day2 = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let day3 = NaiveDate::from_ymd_opt(2025, 1, 7).unwrap();

        assert_eq!(result[&day1].len(), 2);
        assert_eq!(result[&day2].len(), 1);
        assert_eq!(result[&day3].len(), 1);
    }

    #[test]
    fn sorts_by_existing_due_date_before_packing() {
        let rules = RuleSet::from_parts(Capacity::Flat(1), vec![]).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        // Both weight 1, capacity 1/day: whichever was due earliest
        // should land first regardless of insertion order.
        let pool = vec![weighted("late", 4, 1, later), weighted("early", 4, 1, earlier)];
        let start = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        let result = plan(pool, &rules, start);
        let day1 = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(result[&day1][0].task.id, "early");
    }
}
