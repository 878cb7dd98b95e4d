//! Seed the PostgreSQL backend with demo cameras and incidents.
//!
//! Usage: `seed_db [config-file]`, or set DATABASE_URL to override the
//! configured connection string.

use anyhow::Result;
use log::info;
use securewatch::config;
use securewatch::db::DatabaseService;
use securewatch::seed;
use securewatch::store::PgIncidentStore;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let mut config = config::load_config(config_path.as_deref())?;

    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }
    // Seeding needs the schema in place
    config.database.auto_migrate = true;

    info!("Seeding database at {}", config.database.url);

    let db = DatabaseService::new(&config.database).await?;
    let store = PgIncidentStore::new(db.pool.clone());

    let summary = seed::seed_store(&store).await?;
    info!(
        "Done: seeded {} cameras and {} incidents",
        summary.cameras, summary.incidents
    );

    Ok(())
}
