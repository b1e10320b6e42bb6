use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use agrowisata_booking::cache::{start_cache_warmer, CatalogCache};
use agrowisata_booking::config::Config;
use agrowisata_booking::{app, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();

    let config = Config::from_env()?;

    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let cache = CatalogCache::new(config.catalog_cache_ttl);
    tokio::spawn(start_cache_warmer(
        cache.clone(),
        db.clone(),
        config.catalog_refresh_interval,
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app(AppState::new(db, cache))).await?;

    Ok(())
}
