use anyhow::Context;
use trivia_api::db::{establish_connection, run_migrations};
use trivia_api::server::app::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let settings = Settings::load().context("Failed to load settings")?;
    let pool = establish_connection(&settings.database_url, settings.max_connections)
        .await
        .with_context(|| format!("Cannot connect to {}", settings.database_url))?;

    tracing::info!("Running db migrations...");
    run_migrations(&pool).await.context("Migrations failed")?;

    run_server(pool, &settings.bind_addr).await
}
