//! Todo list store built on the reducer/store architecture.
//!
//! The store holds an ordered list of todo records plus the active sort and
//! filter selection. It is seeded by one fetch from a remote collection
//! endpoint and then mutated locally:
//!
//! - `load` fetches the remote list and replaces every record
//! - `add`, `toggle`, `edit`, `remove` mutate the list synchronously
//! - `set_sort`, `set_filter`, `clear_error` change view state
//! - `visible_items` and `stats` derive read-only views
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tasklist::{FilterMode, HttpTodoFetcher, TasklistConfig, TodoStore};
//! use tasklist_core::environment::SystemClock;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = TasklistConfig::from_env()?;
//! let fetcher = HttpTodoFetcher::from_config(&config.api)?;
//! let store = TodoStore::new(Arc::new(SystemClock), Arc::new(fetcher));
//!
//! store.load().await?;
//! store.add("Buy milk").await?;
//! store.set_filter(FilterMode::Active).await?;
//!
//! for todo in store.visible_items().await {
//!     println!("{} {}", todo.id, todo.title);
//! }
//! println!("{:?}", store.stats().await);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod fetch;
pub mod format;
pub mod mocks;
pub mod reducer;
pub mod selectors;
pub mod store;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::{ApiConfig, ConfigError, TasklistConfig};
pub use fetch::{FetchError, HttpTodoFetcher, RemoteTodo, TodoFetcher};
pub use format::format_relative;
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::{TodoRuntime, TodoStore};
pub use types::{
    FilterMode, SortMode, Todo, TodoAction, TodoError, TodoId, TodoState, TodoStats,
};
pub use validation::{TitleError, validate_title};
