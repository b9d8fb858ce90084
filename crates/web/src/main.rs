use anyhow::Context;
use importer::{DirectorySource, LeaderboardSource};
use leaderboard::LeaderboardConfig;
use web::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting leaderboard API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Loading leaderboards from {}", config.data_dir);
    let leaderboards = DirectorySource::new(&config.data_dir)
        .load()
        .context("Failed to load leaderboards")?;
    tracing::info!("{} leaderboard(s) loaded", leaderboards.len());

    let state = AppState::new(
        leaderboards,
        LeaderboardConfig::default().with_page_size(config.page_size),
    );

    let bind_address = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, web::app(state)).await?;

    Ok(())
}
