//! Carrier Quote Engine HTTP server.
//!
//! Usage: `DATA_DIR=./config PORT=3000 carrier-quote-engine`

use std::net::SocketAddr;

use carrier_quote_engine::api::{AppState, create_router};
use carrier_quote_engine::config::LazyTableStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carrier_quote_engine=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "./config".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    tracing::info!(data_dir = %data_dir, port, "Starting quote server");

    let state = AppState::new(LazyTableStore::new(&data_dir));
    // Fail at startup rather than on the first request.
    let store = state.tables()?;
    tracing::info!(carriers = store.carriers().count(), "Reference tables loaded");

    let app = create_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
