//! Derived views over [`TodoState`].
//!
//! Pure functions recomputed on every read. Lists are tens of items, so there
//! is no caching.

use crate::types::{SortMode, Todo, TodoState, TodoStats};

/// Filtered then sorted copy of the records
///
/// Never reorders `state.items`. Both orderings are stable, so ties keep
/// their relative position from the underlying list.
#[must_use]
pub fn visible_items(state: &TodoState) -> Vec<Todo> {
    let mut visible: Vec<Todo> = state
        .items
        .iter()
        .filter(|todo| state.filter_mode.matches(todo))
        .cloned()
        .collect();

    match state.sort_mode {
        SortMode::ByRecency => visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
        SortMode::ById => visible.sort_by_key(|todo| todo.id),
    }

    visible
}

/// Aggregate counts over all records, ignoring the filter
#[must_use]
pub fn stats(items: &[Todo]) -> TodoStats {
    let total = items.len();
    let completed = items.iter().filter(|todo| todo.completed).count();
    TodoStats {
        total,
        completed,
        active: total - completed,
    }
}

impl TodoState {
    /// See [`visible_items`]
    #[must_use]
    pub fn visible_items(&self) -> Vec<Todo> {
        visible_items(self)
    }

    /// See [`stats`]
    #[must_use]
    pub fn stats(&self) -> TodoStats {
        stats(&self.items)
    }
}
