//! In-memory fetchers for tests and offline demos.

use crate::fetch::{FetchError, RemoteTodo, TodoFetcher};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, FetchError>> + Send + 'a>>;

/// Fetcher that answers every call with the same scripted response
#[derive(Debug)]
pub struct StaticFetcher {
    response: Option<Vec<RemoteTodo>>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    /// Always returns `records`
    #[must_use]
    pub const fn new(records: Vec<RemoteTodo>) -> Self {
        Self {
            response: Some(records),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always returns an empty list
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Always fails as if the server answered 500
    #[must_use]
    pub const fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetches made so far
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TodoFetcher for StaticFetcher {
    fn fetch_todos(&self) -> FetchFuture<'_> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = self
            .response
            .clone()
            .ok_or(FetchError::Status { status: 500 });
        Box::pin(async move { response })
    }
}

/// Releases one pending [`GatedFetcher`] call
#[derive(Clone, Debug)]
pub struct FetchGate(Arc<Notify>);

impl FetchGate {
    /// Lets the matching fetch resolve
    ///
    /// Releasing before the fetch starts waiting is fine; the permit is kept.
    pub fn release(&self) {
        self.0.notify_one();
    }
}

/// Fetcher whose calls block until the test releases them
///
/// Each call consumes the next scripted response in order. Gates can be
/// released in any order, which lets a test decide which of two overlapping
/// fetches lands last.
#[derive(Debug, Default)]
pub struct GatedFetcher {
    script: Mutex<VecDeque<(Arc<Notify>, Option<Vec<RemoteTodo>>)>>,
}

impl GatedFetcher {
    /// Creates a fetcher with no scripted responses
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the next call; `None` makes it fail
    pub fn push(&self, response: Option<Vec<RemoteTodo>>) -> FetchGate {
        let gate = Arc::new(Notify::new());
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back((Arc::clone(&gate), response));
        FetchGate(gate)
    }

    /// Scripted responses not yet claimed by a call
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl TodoFetcher for GatedFetcher {
    fn fetch_todos(&self) -> FetchFuture<'_> {
        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        Box::pin(async move {
            let Some((gate, response)) = next else {
                return Err(FetchError::Request("no scripted response".to_string()));
            };
            gate.notified().await;
            response.ok_or(FetchError::Status { status: 503 })
        })
    }
}
