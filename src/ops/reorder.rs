use std::collections::HashSet;

use crate::model::Task;
use crate::store::StoreError;

/// Weave a dragged ordering of the visible subset back into a full-list id
/// sequence.
///
/// Slots in the prior full order (ascending manual rank, stable) that hold a
/// visible task are refilled from `visible` left to right; tasks hidden by
/// the active filter or search stay in their own slots, keeping their
/// relative order. With nothing hidden this degenerates to `visible` itself.
///
/// Fails with [`StoreError::InvalidReorder`] when `visible` repeats an id or
/// names one the store does not hold.
pub fn weave_visible_order(tasks: &[Task], visible: &[String]) -> Result<Vec<String>, StoreError> {
    let mut dragged: HashSet<&str> = HashSet::with_capacity(visible.len());
    for id in visible {
        if !tasks.iter().any(|t| &t.id == id) || !dragged.insert(id.as_str()) {
            return Err(StoreError::InvalidReorder);
        }
    }

    let mut prior: Vec<&Task> = tasks.iter().collect();
    prior.sort_by_key(|t| t.order);

    // Every visible slot consumes exactly one dragged id: the dragged set is
    // duplicate-free and each member occupies one slot in the prior order
    let mut replacement = visible.iter();
    let mut full = Vec::with_capacity(prior.len());
    for task in prior {
        if dragged.contains(task.id.as_str()) {
            if let Some(id) = replacement.next() {
                full.push(id.clone());
            }
        } else {
            full.push(task.id.clone());
        }
    }
    Ok(full)
}
