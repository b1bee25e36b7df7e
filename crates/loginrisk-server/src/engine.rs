//! Risk engine initialization
//!
//! Converts server configuration into a trained engine. Training runs to
//! completion here, before the router exists, so every request handler
//! sees a fully trained engine.

use crate::config::ServerConfig;
use anyhow::Result;
use loginrisk_sdk::{RiskEngine, RiskEngineBuilder, SyntheticHistoryProvider};
use tracing::info;

/// Initialize risk engine
pub fn init_engine(config: &ServerConfig) -> Result<RiskEngine> {
    let provider = SyntheticHistoryProvider::from_config(&config.history);
    info!(
        principal = %config.history.principal_id,
        records = config.history.records,
        "Generating training history"
    );

    let engine = RiskEngineBuilder::new()
        .with_config(config.engine.clone())
        .with_history_provider(&provider, &config.history.principal_id)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to train risk engine: {}", e))?;

    Ok(engine)
}
