mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod models;
mod repository;
mod routes;
mod service;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::Config;
use state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("inventory-manager starting");

    let config = Config::from_env()?;
    config.log_startup();

    let repository = repository::connect(&config.store).await?;
    let addr = config.bind_addr();
    let app = app::build_router(AppState::new(repository, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
