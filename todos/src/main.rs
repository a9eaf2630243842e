//! Tasklist demo binary
//!
//! Fetches the remote list once, applies a few local mutations and prints the
//! resulting view.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin tasklist
//!
//! # Without network access
//! cargo run --bin tasklist -- --offline
//! ```

use std::sync::Arc;
use tasklist::mocks::StaticFetcher;
use tasklist::{
    FilterMode, HttpTodoFetcher, RemoteTodo, SortMode, TasklistConfig, TodoFetcher, TodoStore,
    format_relative, validate_title,
};
use tasklist_core::environment::{Clock, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn offline_records() -> Vec<RemoteTodo> {
    ["Read the manual", "Water the plants", "Book dentist"]
        .into_iter()
        .zip(1..)
        .map(|(title, id)| RemoteTodo {
            id,
            title: title.to_string(),
            completed: id == 2,
            user_id: 1,
        })
        .collect()
}

async fn print_view(store: &TodoStore, clock: &dyn Clock) {
    let now = clock.now();
    for todo in store.visible_items().await {
        println!(
            "  [{}] {:>14}  {}  ({})",
            if todo.completed { "x" } else { " " },
            todo.id,
            todo.title,
            format_relative(todo.updated_at, now),
        );
    }
    let stats = store.stats().await;
    println!(
        "  {} total, {} done, {} active ({:.0}% complete)",
        stats.total,
        stats.completed,
        stats.active,
        stats.completion_ratio() * 100.0
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = TasklistConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_level)
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let offline = std::env::args().any(|arg| arg == "--offline");
    let fetcher: Arc<dyn TodoFetcher> = if offline {
        tracing::info!("Using offline records");
        Arc::new(StaticFetcher::new(offline_records()))
    } else {
        tracing::info!(
            url = %config.api.url,
            limit = config.api.page_limit,
            "Configuration loaded"
        );
        Arc::new(HttpTodoFetcher::from_config(&config.api)?)
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let store = TodoStore::new(Arc::clone(&clock), fetcher);

    println!("=== Tasklist ===\n");

    store.load().await?;
    if let Some(error) = store.last_error().await {
        println!("! {error}");
        store.clear_error().await?;
    }
    print_view(&store, clock.as_ref()).await;

    println!("\n>>> Adding two todos");
    for input in ["Buy milk", "  Renew passport  ", "no"] {
        match validate_title(input) {
            Ok(title) => store.add(title).await?,
            Err(error) => println!("  skipped {input:?}: {error}"),
        }
    }

    let items = store.items().await;
    if let Some(newest) = items.first() {
        println!(">>> Completing {}", newest.id);
        store.toggle(newest.id).await?;
    }
    if let Some(last) = items.last() {
        println!(">>> Removing {}", last.id);
        store.remove(last.id).await?;
    }
    print_view(&store, clock.as_ref()).await;

    println!("\n>>> Active only, by id");
    store.set_filter(FilterMode::Active).await?;
    store.set_sort(SortMode::ById).await?;
    print_view(&store, clock.as_ref()).await;

    store.runtime().shutdown_default().await?;
    Ok(())
}
