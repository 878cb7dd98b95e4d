use anyhow::Result;
use log::info;
use securewatch::api::rest::{AppState, RestApi};
use securewatch::config::{self, StoreBackend};
use securewatch::seed;
use securewatch::store;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional config file path as the first argument
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = config::load_config(config_path.as_deref())?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(&config.api.log_level),
    )
    .init();

    info!("Starting SecureWatch incident dashboard server");

    let store = store::build_store(&config.database).await?;

    // The memory backend starts empty; give it a day of demo incidents
    if config.database.backend == StoreBackend::Memory {
        let summary = seed::seed_store(store.as_ref()).await?;
        info!(
            "Demo data ready: {} cameras, {} incidents",
            summary.cameras, summary.incidents
        );
    }

    let state = AppState::new(store);
    let server = RestApi::new(&config.api, state)?;
    server.run().await
}
