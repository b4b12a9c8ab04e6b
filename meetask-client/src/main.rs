//! # MeeTask Client
//!
//! Command-line smoke tool for the client library: connects to the
//! configured backend with the session cookie jar, fetches the caller's
//! groups, and prints each group's board column counts.
//!
//! ## Usage
//!
//! ```bash
//! MEETASK_API_BASE_URL=http://localhost:8000 cargo run -p meetask-client
//! ```

use meetask_client::api::{ApiClient, TaskListQuery};
use meetask_client::cache::QueryCache;
use meetask_client::config::Config;
use meetask_client::error::ClientError;
use meetask_client::store::Store;
use meetask_shared::board::{BoardView, SortKey, TaskFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meetask_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("MeeTask client v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    tracing::info!(base_url = %config.base_url, "connecting");

    let store = Store::new(
        ApiClient::new(&config)?,
        QueryCache::new(config.retry_reads),
    );

    let user = match store.me().await {
        Ok(user) => user,
        Err(ClientError::Unauthenticated) => {
            println!("Not signed in. Open {} in a browser first.", store.login_url());
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    println!("Signed in as {}", user.user_name);

    let groups = store.groups().await?;
    if groups.is_empty() {
        println!("No groups yet.");
        return Ok(());
    }

    let filter = TaskFilter::default();
    for group in groups.iter() {
        let tasks = store.group_tasks(group.id, TaskListQuery::default()).await?;
        let board = BoardView::build(&tasks, &filter, SortKey::default());
        println!(
            "{:<24} not-started {:>3} | in-progress {:>3} | done {:>3}",
            group.name,
            board.not_started.len(),
            board.in_progress.len(),
            board.done.len(),
        );
    }

    Ok(())
}
