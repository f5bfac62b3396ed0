//! Application setup and initialization
//!
//! Kept out of main.rs so integration tests can build the same router.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use reforma_core::Config;

use crate::services::{GeminiConfig, GeminiImageGenerator};
use crate::state::AppState;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Fail fast on misconfiguration
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let generator = GeminiImageGenerator::new(GeminiConfig::from_config(&config))?;
    let state = Arc::new(AppState::new(&config, Arc::new(generator)));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
