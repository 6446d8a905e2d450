use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codearena_backend::{AppState, app, config::Config, identity::IdentityApi};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to create PostgreSQL connection pool")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;
    info!("Database migrations completed");

    let identity = Arc::new(IdentityApi::new(
        config.identity_api_url.clone(),
        config.identity_api_key.clone(),
    ));

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        pool,
        config: Arc::new(config),
        identity,
    };

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app(state))
        .await
        .context("Server error")?;

    Ok(())
}
