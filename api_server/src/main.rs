//! Serves the announcement handlers over HTTP.
//!
//! Run from repo root: `cargo run -p announcement-server`
//! Set `STORE=memory` to run without AWS credentials.

use announcement_api::{app, AnnouncementStore, AppState, Config, DynamoStore, MemoryStore, StoreBackend};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("announcement_api=info,announcement_server=info")),
        )
        .init();

    let config = Config::from_env()?;
    let page_size = config.scan_page_size;
    let store: Arc<dyn AnnouncementStore> = match (config.backend, config.table_name.as_deref()) {
        (StoreBackend::DynamoDb, Some(table)) => {
            tracing::info!(table, "using DynamoDB store");
            Arc::new(DynamoStore::from_env(table, page_size.map(|n| n.min(i32::MAX as u32) as i32)).await)
        }
        _ => {
            tracing::info!("using in-memory store");
            Arc::new(MemoryStore::new(page_size.map(|n| n as usize)))
        }
    };
    let bind_addr = config.bind_addr;
    let state = AppState::new(store, config);

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
