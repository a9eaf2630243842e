//! HTTP fetcher against a local mock server.

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tasklist::{ApiConfig, FetchError, HttpTodoFetcher, TodoError, TodoFetcher, TodoStore};
use tasklist_testing::test_clock;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher_for(server: &MockServer, limit: u32) -> Result<HttpTodoFetcher, FetchError> {
    HttpTodoFetcher::new(
        format!("{}/todos", server.uri()),
        limit,
        Duration::from_secs(2),
    )
}

#[tokio::test]
async fn fetches_with_limit_and_coerces_entries() -> Result<(), FetchError> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("_limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"userId": 3, "id": 1, "title": "delectus aut autem", "completed": false},
            {"id": 2, "title": "  quis ut nam  "},
            {"id": "x", "title": "bad id"},
            {"id": 4, "title": ""},
            {"userId": 1, "id": 5, "title": "laboriosam", "completed": true},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = fetcher_for(&server, 5)?.fetch_todos().await?;

    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 5]);
    assert_eq!(records[0].user_id, 3);
    assert_eq!(records[1].title, "quis ut nam");
    assert!(!records[1].completed);
    assert_eq!(records[1].user_id, 1);
    assert!(records[2].completed);
    Ok(())
}

#[tokio::test]
async fn server_error_is_status_failure() -> Result<(), FetchError> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = fetcher_for(&server, 20)?.fetch_todos().await;
    assert!(matches!(result, Err(FetchError::Status { status: 500 })));
    Ok(())
}

#[tokio::test]
async fn object_body_is_rejected() -> Result<(), FetchError> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"todos": []})))
        .mount(&server)
        .await;

    let result = fetcher_for(&server, 20)?.fetch_todos().await;
    assert!(matches!(result, Err(FetchError::NotAnArray)));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_decode_failure() -> Result<(), FetchError> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": 1,"))
        .mount(&server)
        .await;

    let result = fetcher_for(&server, 20)?.fetch_todos().await;
    assert!(matches!(result, Err(FetchError::Decode(_))));
    Ok(())
}

#[tokio::test]
async fn unreachable_host_is_request_failure() -> Result<(), FetchError> {
    let fetcher = HttpTodoFetcher::new("http://127.0.0.1:1/todos", 20, Duration::from_secs(2))?;

    let result = fetcher.fetch_todos().await;
    assert!(matches!(result, Err(FetchError::Request(_))));
    Ok(())
}

#[tokio::test]
async fn store_loads_through_http() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .and(query_param("_limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"userId": 1, "id": 1, "title": "first", "completed": true},
            {"userId": 1, "id": 2, "title": "second", "completed": false},
        ])))
        .mount(&server)
        .await;

    let config = ApiConfig {
        url: format!("{}/todos", server.uri()),
        page_limit: 2,
        timeout_secs: 2,
    };
    let fetcher = HttpTodoFetcher::from_config(&config)?;
    assert_eq!(fetcher.url(), config.url);

    let store = TodoStore::new(Arc::new(test_clock()), Arc::new(fetcher));
    store.load().await?;

    let stats = store.stats().await;
    assert_eq!((stats.total, stats.completed, stats.active), (2, 1, 1));
    assert_eq!(store.last_error().await, None);
    Ok(())
}

#[tokio::test]
async fn store_reports_http_failure() -> anyhow::Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/todos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let store = TodoStore::new(Arc::new(test_clock()), Arc::new(fetcher_for(&server, 20)?));
    store.load().await?;

    assert_eq!(store.last_error().await, Some(TodoError::FetchFailed));
    assert!(store.items().await.is_empty());
    Ok(())
}
