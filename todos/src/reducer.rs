//! Reducer logic for the todo store.
//!
//! Every user operation is a synchronous transition. `Load` is the only action
//! with an effect: it flags the fetch as pending and hands the network call to
//! the runtime, which feeds back `Loaded` or `LoadFailed`.
//!
//! A fetch that resolves replaces the list wholesale. Local mutations made
//! while it was outstanding are discarded, and when two fetches overlap the
//! response that lands last wins.

use crate::fetch::TodoFetcher;
use crate::types::{Todo, TodoAction, TodoError, TodoState};
use std::sync::Arc;
use tasklist_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer, smallvec};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for record timestamps and local ids
    pub clock: Arc<dyn Clock>,
    /// Remote list source
    pub fetcher: Arc<dyn TodoFetcher>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, fetcher: Arc<dyn TodoFetcher>) -> Self {
        Self { clock, fetcher }
    }
}

/// Reducer for the todo store
#[derive(Clone, Debug, Default)]
pub struct TodoReducer;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds the effect that runs the fetch and reports its outcome
    fn fetch_effect(env: &TodoEnvironment) -> Effect<TodoAction> {
        let fetcher = Arc::clone(&env.fetcher);
        Effect::future(async move {
            match fetcher.fetch_todos().await {
                Ok(records) => Some(TodoAction::Loaded { records }),
                Err(error) => {
                    tracing::warn!(%error, "Fetching todos failed");
                    Some(TodoAction::LoadFailed {
                        reason: error.to_string(),
                    })
                },
            }
        })
    }

    /// Trims a title, rejecting input that is empty afterwards
    fn clean_title(raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    #[allow(clippy::too_many_lines)] // one arm per operation
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Fetch ==========
            TodoAction::Load => {
                state.loading = true;
                state.last_error = None;
                tracing::debug!("Fetch started");
                smallvec![Self::fetch_effect(env)]
            },

            TodoAction::Loaded { records } => {
                let now = env.clock.now();
                state.items = records
                    .into_iter()
                    .map(|record| Todo::from_remote(record, now))
                    .collect();
                state.loading = false;
                tracing::info!(count = state.items.len(), "Todos loaded");
                SmallVec::new()
            },

            TodoAction::LoadFailed { reason } => {
                state.loading = false;
                state.last_error = Some(TodoError::FetchFailed);
                tracing::debug!(%reason, "Fetch failure recorded");
                SmallVec::new()
            },

            // ========== Local mutations ==========
            TodoAction::Add { title } => {
                let Some(title) = Self::clean_title(&title) else {
                    tracing::debug!("Ignoring add with empty title");
                    return SmallVec::new();
                };
                let now = env.clock.now();
                let id = state.next_local_id(now);
                state.items.insert(0, Todo::new_local(id, title, now));
                tracing::debug!(%id, "Todo added");
                SmallVec::new()
            },

            TodoAction::Toggle { id } => {
                let now = env.clock.now();
                match state.get_mut(id) {
                    Some(todo) => todo.toggle(now),
                    None => tracing::debug!(%id, "Ignoring toggle of unknown todo"),
                }
                SmallVec::new()
            },

            TodoAction::Edit { id, title } => {
                let Some(title) = Self::clean_title(&title) else {
                    tracing::debug!(%id, "Ignoring edit with empty title");
                    return SmallVec::new();
                };
                let now = env.clock.now();
                match state.get_mut(id) {
                    Some(todo) => todo.retitle(title, now),
                    None => tracing::debug!(%id, "Ignoring edit of unknown todo"),
                }
                SmallVec::new()
            },

            TodoAction::Remove { id } => {
                let before = state.items.len();
                state.items.retain(|todo| todo.id != id);
                if state.items.len() == before {
                    tracing::debug!(%id, "Ignoring removal of unknown todo");
                }
                SmallVec::new()
            },

            // ========== Selection ==========
            TodoAction::SetSort { mode } => {
                state.sort_mode = mode;
                SmallVec::new()
            },

            TodoAction::SetFilter { mode } => {
                state.filter_mode = mode;
                SmallVec::new()
            },

            TodoAction::ClearError => {
                state.last_error = None;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::RemoteTodo;
    use crate::mocks::StaticFetcher;
    use crate::types::{FilterMode, SortMode, TodoId};
    use chrono::Duration;
    use tasklist_core::environment::Clock;
    use tasklist_testing::{ReducerTest, SteppingClock, assertions, test_clock};

    fn test_env() -> TodoEnvironment {
        TodoEnvironment::new(Arc::new(test_clock()), Arc::new(StaticFetcher::empty()))
    }

    fn stepping_env() -> TodoEnvironment {
        TodoEnvironment::new(
            Arc::new(SteppingClock::new(test_clock().now(), Duration::seconds(1))),
            Arc::new(StaticFetcher::empty()),
        )
    }

    fn remote(id: i64, completed: bool) -> RemoteTodo {
        RemoteTodo {
            id,
            title: format!("remote {id}"),
            completed,
            user_id: 1,
        }
    }

    fn seeded_state() -> TodoState {
        let now = test_clock().now();
        TodoState::with_items(vec![
            Todo::from_remote(remote(1, false), now),
            Todo::from_remote(remote(2, true), now),
        ])
    }

    #[test]
    fn test_load_sets_pending_and_returns_fetch() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                last_error: Some(TodoError::FetchFailed),
                ..TodoState::default()
            })
            .when_action(TodoAction::Load)
            .then_state(|state| {
                assert!(state.loading);
                assert_eq!(state.last_error, None);
            })
            .then_effects(assertions::assert_has_future_effect)
            .run();
    }

    #[test]
    fn test_loaded_replaces_items_and_stamps_timestamps() {
        let now = test_clock().now();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Load)
            .when_action(TodoAction::Loaded {
                records: vec![remote(10, false), remote(11, true), remote(12, false)],
            })
            .then_state(move |state| {
                assert!(!state.loading);
                let ids: Vec<i64> = state.items.iter().map(|t| t.id.get()).collect();
                assert_eq!(ids, vec![10, 11, 12]);
                assert!(state.items.iter().all(|t| t.created_at == now && t.updated_at == now));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_load_failed_keeps_items() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Load)
            .when_action(TodoAction::LoadFailed {
                reason: "connection refused".to_string(),
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.last_error, Some(TodoError::FetchFailed));
                assert_eq!(state.items.len(), 2);
            })
            .run();
    }

    #[test]
    fn test_add_inserts_at_front() {
        let now = test_clock().now();

        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Add {
                title: "  Buy milk  ".to_string(),
            })
            .then_state(move |state| {
                assert_eq!(state.items.len(), 3);
                let first = &state.items[0];
                assert_eq!(first.title, "Buy milk");
                assert!(!first.completed);
                assert_eq!(first.owner, 1);
                assert_eq!(first.id, TodoId(now.timestamp_millis()));
                assert_eq!(first.created_at, now);
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_twice_in_same_millisecond_gets_distinct_ids() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState::new())
            .when_action(TodoAction::Add { title: "one".to_string() })
            .when_action(TodoAction::Add { title: "two".to_string() })
            .then_state(|state| {
                assert_eq!(state.items.len(), 2);
                assert_ne!(state.items[0].id, state.items[1].id);
                assert_eq!(state.items[0].title, "two");
            })
            .run();
    }

    #[test]
    fn test_add_empty_title_is_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Add { title: "   ".to_string() })
            .then_state(|state| assert_eq!(state, &seeded_state()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_flag_and_advances_timestamp() {
        let env = stepping_env();
        let reducer = TodoReducer::new();
        let mut state = TodoState::new();

        reducer.reduce(&mut state, TodoAction::Add { title: "Run".to_string() }, &env);
        let id = state.items[0].id;
        let created = state.items[0].updated_at;

        reducer.reduce(&mut state, TodoAction::Toggle { id }, &env);
        let after_first = state.items[0].updated_at;
        assert!(state.items[0].completed);

        reducer.reduce(&mut state, TodoAction::Toggle { id }, &env);
        let after_second = state.items[0].updated_at;

        assert!(!state.items[0].completed);
        assert!(after_first > created);
        assert!(after_second > after_first);
    }

    #[test]
    fn test_edit_trims_and_touches() {
        ReducerTest::new(TodoReducer::new())
            .with_env(stepping_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Edit {
                id: TodoId(1),
                title: "  renamed ".to_string(),
            })
            .then_state(|state| {
                let todo = state.get(TodoId(1));
                assert_eq!(todo.map(|t| t.title.as_str()), Some("renamed"));
                assert!(todo.is_some_and(|t| t.updated_at > t.created_at));
            })
            .run();
    }

    #[test]
    fn test_edit_with_blank_title_is_noop() {
        ReducerTest::new(TodoReducer::new())
            .with_env(stepping_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Edit {
                id: TodoId(1),
                title: "\t \n".to_string(),
            })
            .then_state(|state| assert_eq!(state, &seeded_state()))
            .run();
    }

    #[test]
    fn test_missing_id_operations_are_noops() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Toggle { id: TodoId(9999) })
            .when_action(TodoAction::Edit {
                id: TodoId(9999),
                title: "y".to_string(),
            })
            .when_action(TodoAction::Remove { id: TodoId(9999) })
            .then_state(|state| assert_eq!(state, &seeded_state()))
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_remove_drops_record() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::Remove { id: TodoId(2) })
            .then_state(|state| {
                assert_eq!(state.items.len(), 1);
                assert!(!state.contains(TodoId(2)));
            })
            .run();
    }

    #[test]
    fn test_selection_setters_leave_items_alone() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(seeded_state())
            .when_action(TodoAction::SetSort { mode: SortMode::ById })
            .when_action(TodoAction::SetFilter { mode: FilterMode::Done })
            .then_state(|state| {
                assert_eq!(state.sort_mode, SortMode::ById);
                assert_eq!(state.filter_mode, FilterMode::Done);
                assert_eq!(state.items, seeded_state().items);
            })
            .run();
    }

    #[test]
    fn test_clear_error() {
        ReducerTest::new(TodoReducer::new())
            .with_env(test_env())
            .given_state(TodoState {
                last_error: Some(TodoError::FetchFailed),
                ..TodoState::default()
            })
            .when_action(TodoAction::ClearError)
            .then_state(|state| assert_eq!(state.last_error, None))
            .run();
    }
}
