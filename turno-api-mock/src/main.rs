use anyhow::Result;
use std::sync::Arc;
use turno_api_mock::{AppState, router};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .init();

    let addr = std::env::var("MOCK_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let state = Arc::new(AppState::seeded());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mock reservation-block API listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
