//! Remote fetch collaborator.
//!
//! One GET to a fixed collection endpoint that returns a JSON array of task
//! objects. The payload is decoded loosely and coerced into [`RemoteTodo`]
//! records at this boundary so nothing past it has to trust the wire shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while fetching the remote list
///
/// The store collapses all of these into a single fetch failure; the detail
/// only reaches the logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (connect, timeout, TLS)
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("Unexpected status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The body was not valid JSON
    #[error("Response decoding failed: {0}")]
    Decode(String),

    /// The body was JSON but not an array
    #[error("Response body is not a JSON array")]
    NotAnArray,
}

/// A validated task record as supplied by the remote source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTodo {
    /// Source-assigned id
    pub id: i64,
    /// Trimmed, non-empty title
    pub title: String,
    /// Completion flag (`false` when absent)
    pub completed: bool,
    /// Owner tag (`1` when absent)
    #[serde(rename = "userId")]
    pub user_id: i64,
}

impl RemoteTodo {
    /// Coerces one loose JSON entry into a record
    ///
    /// Returns `None` when the entry has no integer `id` or no usable `title`.
    /// A missing or mistyped `completed` becomes `false`, and `userId` becomes `1`.
    #[must_use]
    pub fn coerce(entry: &Value) -> Option<Self> {
        let id = entry.get("id").and_then(Value::as_i64)?;
        let title = entry
            .get("title")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|title| !title.is_empty())?;

        Some(Self {
            id,
            title: title.to_string(),
            completed: entry.get("completed").and_then(Value::as_bool).unwrap_or(false),
            user_id: entry
                .get("userId")
                .and_then(Value::as_i64)
                .unwrap_or(crate::types::LOCAL_OWNER),
        })
    }
}

/// Validates a decoded payload into records, dropping malformed entries
///
/// # Errors
///
/// Returns [`FetchError::NotAnArray`] if the payload is not a JSON array.
pub fn ingest(payload: Value) -> Result<Vec<RemoteTodo>, FetchError> {
    let Value::Array(entries) = payload else {
        return Err(FetchError::NotAnArray);
    };

    let total = entries.len();
    let records: Vec<RemoteTodo> = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let record = RemoteTodo::coerce(entry);
            if record.is_none() {
                tracing::warn!(index, "Dropping malformed todo entry");
            }
            record
        })
        .collect();

    tracing::debug!(total, kept = records.len(), "Ingested remote todos");
    Ok(records)
}

/// Source of the initial todo list
///
/// Returns boxed futures so the fetcher can live behind `Arc<dyn TodoFetcher>`
/// inside the reducer environment and be captured by effects.
pub trait TodoFetcher: Send + Sync {
    /// Fetch the full remote list
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-success status, or a
    /// body that is not a JSON array.
    fn fetch_todos(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, FetchError>> + Send + '_>>;
}

/// HTTP implementation of [`TodoFetcher`]
#[derive(Clone, Debug)]
pub struct HttpTodoFetcher {
    client: reqwest::Client,
    url: String,
    page_limit: u32,
}

impl HttpTodoFetcher {
    /// Creates a fetcher for `url`, requesting at most `page_limit` records
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        page_limit: u32,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            page_limit,
        })
    }

    /// Creates a fetcher from loaded configuration
    ///
    /// # Errors
    ///
    /// Same as [`HttpTodoFetcher::new`].
    pub fn from_config(config: &crate::config::ApiConfig) -> Result<Self, FetchError> {
        Self::new(
            config.url.clone(),
            config.page_limit,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// The collection endpoint
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[tracing::instrument(skip(self), fields(url = %self.url, limit = self.page_limit))]
    async fn get(&self) -> Result<Vec<RemoteTodo>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("_limit", self.page_limit)])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        ingest(payload)
    }
}

impl TodoFetcher for HttpTodoFetcher {
    fn fetch_todos(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RemoteTodo>, FetchError>> + Send + '_>> {
        Box::pin(async move {
            let result = self.get().await;
            let outcome = if result.is_ok() { "success" } else { "failure" };
            metrics::counter!("todos.fetch.total", "outcome" => outcome).increment(1);
            result
        })
    }
}
