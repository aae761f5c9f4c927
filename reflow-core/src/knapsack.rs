//! Knapsack Selector (C3): bounded 0/1 knapsack over a day's capacity.
//!
//! One-dimensional DP over capacity, reconstructing the chosen set
//! alongside the running value so no second pass is needed. Zero-weight
//! items are always worth taking (they cost nothing), so the DP must not
//! assume `weight > 0`; iterating capacity high-to-low and re-checking
//! `weight <= capacity` as `<=` rather than `<` handles that naturally.

use crate::task::WeightedTask;

/// Select the subset of `tasks` maximising total priority without the
/// summed weight exceeding `capacity`. Any maximum-value subset may be
/// returned; ties are not broken deterministically.
pub fn select(capacity: i64, tasks: &[WeightedTask]) -> Vec<WeightedTask> {
    if capacity <= 0 {
        return Vec::new();
    }
    let capacity = capacity as usize;

    let mut best_value = vec![0u32; capacity + 1];
    let mut best_selection: Vec<Vec<usize>> = vec![Vec::new(); capacity + 1];

    for (item_index, task) in tasks.iter().enumerate() {
        let weight = task.weight as usize;
        if weight > capacity {
            continue;
        }
        for budget in (weight..=capacity).rev() {
            let take = best_value[budget - weight] + task.priority();
            if take > best_value[budget] {
                best_value[budget] = take;
                let mut selection = best_selection[budget - weight].clone();
                selection.push(item_index);
                best_selection[budget] = selection;
            }
        }
    }

    best_selection[capacity]
        .iter()
        .map(|&index| tasks[index].clone())
        .collect()
}
