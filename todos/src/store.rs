//! Facade over the runtime store for the todo list.
//!
//! Presentation code calls these methods instead of building actions by hand.
//! Every call goes through the same [`Store`], so operations are serialized
//! and each one runs to completion before the next starts.

use crate::fetch::TodoFetcher;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{FilterMode, SortMode, Todo, TodoAction, TodoError, TodoId, TodoState, TodoStats};
use std::sync::Arc;
use tasklist_core::environment::Clock;
use tasklist_runtime::{EffectHandle, Store, StoreError};

/// Runtime store specialised to the todo reducer
pub type TodoRuntime = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Todo store handle
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct TodoStore {
    runtime: TodoRuntime,
}

impl TodoStore {
    /// Creates an empty store
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, fetcher: Arc<dyn TodoFetcher>) -> Self {
        Self::with_state(TodoState::new(), clock, fetcher)
    }

    /// Creates a store with injected initial state
    #[must_use]
    pub fn with_state(
        state: TodoState,
        clock: Arc<dyn Clock>,
        fetcher: Arc<dyn TodoFetcher>,
    ) -> Self {
        let env = TodoEnvironment::new(clock, fetcher);
        Self {
            runtime: Store::new(state, TodoReducer::new(), env),
        }
    }

    /// The underlying runtime, for action subscriptions and shutdown
    #[must_use]
    pub const fn runtime(&self) -> &TodoRuntime {
        &self.runtime
    }

    /// Fetches the remote list and waits until the result has been applied
    ///
    /// A failed fetch is not an error here; it shows up in [`TodoStore::last_error`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn load(&self) -> Result<(), StoreError> {
        let mut handle = self.start_load().await?;
        handle.wait().await;
        Ok(())
    }

    /// Starts a fetch and returns without waiting for it
    ///
    /// Mutations made before the returned handle completes are overwritten
    /// when the fetch lands.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn start_load(&self) -> Result<EffectHandle, StoreError> {
        self.runtime.send(TodoAction::Load).await
    }

    /// Adds a local todo at the front of the list; blank titles are ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn add(&self, title: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Add {
            title: title.into(),
        })
        .await
    }

    /// Flips a todo's completion flag
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn toggle(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Toggle { id }).await
    }

    /// Retitles a todo; blank titles are ignored
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn edit(&self, id: TodoId, title: impl Into<String>) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Edit {
            id,
            title: title.into(),
        })
        .await
    }

    /// Removes a todo
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn remove(&self, id: TodoId) -> Result<(), StoreError> {
        self.dispatch(TodoAction::Remove { id }).await
    }

    /// Sets the ordering of [`TodoStore::visible_items`]
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn set_sort(&self, mode: SortMode) -> Result<(), StoreError> {
        self.dispatch(TodoAction::SetSort { mode }).await
    }

    /// Sets the filter of [`TodoStore::visible_items`]
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn set_filter(&self, mode: FilterMode) -> Result<(), StoreError> {
        self.dispatch(TodoAction::SetFilter { mode }).await
    }

    /// Clears the last fetch error
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
    pub async fn clear_error(&self) -> Result<(), StoreError> {
        self.dispatch(TodoAction::ClearError).await
    }

    /// Filtered, sorted copy of the list
    pub async fn visible_items(&self) -> Vec<Todo> {
        self.runtime.state(TodoState::visible_items).await
    }

    /// Aggregate counts over the whole list
    pub async fn stats(&self) -> TodoStats {
        self.runtime.state(TodoState::stats).await
    }

    /// Records in store order
    pub async fn items(&self) -> Vec<Todo> {
        self.runtime.state(|s| s.items.clone()).await
    }

    /// Whether a fetch is outstanding
    pub async fn is_loading(&self) -> bool {
        self.runtime.state(|s| s.loading).await
    }

    /// Last fetch error, if any
    pub async fn last_error(&self) -> Option<TodoError> {
        self.runtime.state(|s| s.last_error).await
    }

    /// Copy of the full state
    pub async fn snapshot(&self) -> TodoState {
        self.runtime.state(TodoState::clone).await
    }

    async fn dispatch(&self, action: TodoAction) -> Result<(), StoreError> {
        self.runtime.send(action).await.map(|_| ())
    }
}
