//! Pleural Effusion Work-up Assistant - Main Entry Point

use anyhow::Context;
use api::{init_logging, run_server, AppConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::var("PLEURAL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("pleural.toml"));
    let config = AppConfig::load(&path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))?;

    init_logging(&config.server.log_level, config.server.log_format)?;

    info!("=== Pleural Work-up Assistant v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Engine config: {:?}", config.engine);

    run_server(config).await?;

    Ok(())
}
