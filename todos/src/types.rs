//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of records that can be fetched from a
//! remote source, created locally, toggled, retitled, and removed. Alongside the
//! records the state carries the active sort and filter selection, a loading
//! flag, and the last fetch error.

use crate::fetch::RemoteTodo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Owner tag stamped on locally created records
pub const LOCAL_OWNER: i64 = 1;

/// Identifier of a todo record
///
/// Remote records carry small integers; local records use a millisecond
/// timestamp, so the two ranges do not meet in practice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl TodoId {
    /// Returns the raw integer value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier
    pub id: TodoId,
    /// Title, never empty after trimming
    pub title: String,
    /// Whether the todo is done
    pub completed: bool,
    /// Opaque owner tag carried from the source
    #[serde(rename = "userId")]
    pub owner: i64,
    /// When the record entered the store
    pub created_at: DateTime<Utc>,
    /// When the record was last touched
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates a locally authored todo
    #[must_use]
    pub const fn new_local(id: TodoId, title: String, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title,
            completed: false,
            owner: LOCAL_OWNER,
            created_at: now,
            updated_at: now,
        }
    }

    /// Stamps a fetched record with local timestamps
    #[must_use]
    pub fn from_remote(remote: RemoteTodo, now: DateTime<Utc>) -> Self {
        Self {
            id: TodoId(remote.id),
            title: remote.title,
            completed: remote.completed,
            owner: remote.user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Flips the completion flag
    pub fn toggle(&mut self, now: DateTime<Utc>) {
        self.completed = !self.completed;
        self.touch(now);
    }

    /// Replaces the title with an already trimmed, non-empty value
    pub fn retitle(&mut self, title: String, now: DateTime<Utc>) {
        self.title = title;
        self.touch(now);
    }

    // updated_at never drops below created_at, even if the clock steps back
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
    }
}

/// Ordering applied by the visible-items selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Most recently touched first
    #[default]
    #[serde(rename = "most_recent")]
    ByRecency,
    /// Ascending numeric id
    #[serde(rename = "id")]
    ById,
}

/// Completion filter applied by the visible-items selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every record
    #[default]
    All,
    /// Records not yet completed
    Active,
    /// Completed records
    Done,
}

impl FilterMode {
    /// Whether a record passes this filter
    #[must_use]
    pub const fn matches(self, todo: &Todo) -> bool {
        match self {
            Self::All => true,
            Self::Active => !todo.completed,
            Self::Done => todo.completed,
        }
    }
}

/// Returned when a sort or filter token is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseModeError {
    kind: &'static str,
    value: String,
}

impl FromStr for SortMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "most_recent" => Ok(Self::ByRecency),
            "id" => Ok(Self::ById),
            other => Err(ParseModeError {
                kind: "sort mode",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ByRecency => "most_recent",
            Self::ById => "id",
        })
    }
}

impl FromStr for FilterMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "done" => Ok(Self::Done),
            other => Err(ParseModeError {
                kind: "filter mode",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Done => "done",
        })
    }
}

/// Errors surfaced through `TodoState::last_error`
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoError {
    /// The remote list could not be fetched or decoded
    #[error("Failed to fetch todos")]
    FetchFailed,
}

/// Aggregate counts over every record in the store
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoStats {
    /// Number of records
    pub total: usize,
    /// Records with `completed == true`
    pub completed: usize,
    /// `total - completed`
    pub active: usize,
}

impl TodoStats {
    /// Fraction of records completed, `0.0` for an empty list
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // list sizes are tiny
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// State of the todo store
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoState {
    /// Records in display-independent order (newest local first, then fetch order)
    pub items: Vec<Todo>,
    /// Active ordering for the visible-items selector
    pub sort_mode: SortMode,
    /// Active filter for the visible-items selector
    pub filter_mode: FilterMode,
    /// True only while a fetch is outstanding
    pub loading: bool,
    /// Last fetch error, if any
    pub last_error: Option<TodoError>,
}

impl TodoState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state pre-populated with records
    #[must_use]
    pub fn with_items(items: Vec<Todo>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns a record by id
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|todo| todo.id == id)
    }

    /// Returns a mutable record by id
    pub fn get_mut(&mut self, id: TodoId) -> Option<&mut Todo> {
        self.items.iter_mut().find(|todo| todo.id == id)
    }

    /// Checks whether a record exists
    #[must_use]
    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    /// Picks an id for a local record created at `now`
    ///
    /// Uses the millisecond timestamp unless a record already holds it, in
    /// which case it moves past the largest id in the store.
    #[must_use]
    pub fn next_local_id(&self, now: DateTime<Utc>) -> TodoId {
        let candidate = now.timestamp_millis();
        if !self.contains(TodoId(candidate)) {
            return TodoId(candidate);
        }
        let max = self.items.iter().map(|todo| todo.id.0).max().unwrap_or(candidate);
        TodoId(max.saturating_add(1))
    }
}

/// Inputs to the todo reducer
///
/// User intents (`Load`, `Add`, `Toggle`, ...) plus the two results the fetch
/// effect feeds back (`Loaded`, `LoadFailed`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TodoAction {
    /// Start fetching the remote list
    Load,
    /// The fetch succeeded; replaces every record
    Loaded {
        /// Validated records in fetch order
        records: Vec<RemoteTodo>,
    },
    /// The fetch failed
    LoadFailed {
        /// Diagnostic detail, logged but not exposed through state
        reason: String,
    },
    /// Create a local record at the front of the list
    Add {
        /// Raw title; trimmed by the reducer
        title: String,
    },
    /// Flip a record's completion flag
    Toggle {
        /// Record to toggle
        id: TodoId,
    },
    /// Replace a record's title
    Edit {
        /// Record to edit
        id: TodoId,
        /// Raw title; trimmed by the reducer
        title: String,
    },
    /// Remove a record
    Remove {
        /// Record to remove
        id: TodoId,
    },
    /// Change the ordering of the visible list
    SetSort {
        /// New ordering
        mode: SortMode,
    },
    /// Change the filter of the visible list
    SetFilter {
        /// New filter
        mode: FilterMode,
    },
    /// Forget the last fetch error
    ClearError,
}
