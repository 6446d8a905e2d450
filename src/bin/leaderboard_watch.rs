use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codearena_backend::watch::{self, LeaderboardClient};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let base_url =
        std::env::var("LEADERBOARD_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
    let session_token = std::env::var("SESSION_TOKEN").ok();

    let client = LeaderboardClient::new(base_url, session_token);
    let cancellation_token = CancellationToken::new();
    let watch_task = tokio::spawn(watch::run(client, cancellation_token.clone()));

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down");
    cancellation_token.cancel();
    watch_task.await?;

    Ok(())
}
