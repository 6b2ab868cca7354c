//! Server binary for Quakescope.
//!
//! Wires the configuration, the `PostgreSQL` event store, and the dashboard
//! API together, then serves until `Ctrl-C`.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `quakescope-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Connect the `PostgreSQL` pool
//! 4. Build dashboard state over the event store
//! 5. Serve HTTP until shutdown
//! 6. Close the pool

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use quakescope_core::config::{AppConfig, LoggingConfig};
use quakescope_dashboard::{AppState, ServerConfig};
use quakescope_db::{PgQuakeStore, PostgresConfig, PostgresPool};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG_PATH: &str = "quakescope-config.yaml";

/// Application entry point for the Quakescope server.
///
/// # Errors
///
/// Returns an error if any initialization step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = config_path();
    let (config, from_file) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    if !from_file {
        info!(config = %config_path.display(), "Config file not found, using defaults");
    }
    info!(
        config = %config_path.display(),
        host = %config.server.host,
        port = config.server.port,
        histogram_bins = config.dashboard.histogram_bins,
        "quakescope-server starting"
    );

    // 3. Connect to PostgreSQL.
    let pool = PostgresPool::connect(&PostgresConfig::from_database_config(&config.database))
        .await
        .map_err(ServerError::from)?;

    // 4. Build dashboard state.
    let store = PgQuakeStore::from_pool(&pool);
    let state = AppState::new(store, config.dashboard.clone()).map_err(ServerError::from)?;

    // 5. Serve until shutdown.
    let server_config = ServerConfig::from(&config.server);
    let served = quakescope_dashboard::start_server(&server_config, Arc::new(state)).await;

    // 6. Close the pool even if serving failed.
    pool.close().await;
    served.map_err(ServerError::from)?;

    info!("quakescope-server stopped");
    Ok(())
}

/// Config path from `QUAKESCOPE_CONFIG`, or the default file name.
fn config_path() -> PathBuf {
    std::env::var_os("QUAKESCOPE_CONFIG")
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Load configuration, falling back to defaults when the file is absent.
///
/// Environment overrides apply in both cases. The flag reports whether
/// the file was read.
fn load_config(path: &Path) -> Result<(AppConfig, bool), ServerError> {
    if path.exists() {
        Ok((AppConfig::from_file(path)?, true))
    } else {
        Ok((AppConfig::parse("")?, false))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_file_yields_defaults() {
        let (config, from_file) = load_config(Path::new("does-not-exist.yaml")).unwrap();
        assert!(!from_file);
        assert_eq!(config.dashboard.histogram_bins, 20);
        assert_eq!(config.logging.level, "info");
    }
}
