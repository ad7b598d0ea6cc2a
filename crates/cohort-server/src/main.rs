//! Cohort analytics API server.
//!
//! Accepts batches of person records, caches them in memory, and serves
//! aggregate statistics over the cached snapshot.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `cohort-config.yaml` (or `$COHORT_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Create the record store and application state
//! 4. Serve HTTP until `Ctrl-C` / `SIGTERM`

mod config;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use cohort_api::AppState;
use cohort_core::RecordStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_PATH_ENV, CohortConfig, DEFAULT_CONFIG_PATH, LoggingConfig};
use crate::error::StartupError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, logging, or the server fails.
#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // 1. Load configuration. Logging is not up yet, so the path is
    //    reported after init.
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);
    let config = CohortConfig::load_or_default(&config_path)?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;

    info!(
        config_path = %config_path.display(),
        config_found = config_path.exists(),
        host = config.server.host,
        port = config.server.port,
        log_level = config.logging.level,
        "cohort-server starting"
    );

    // 3. Create the record store.
    let state = Arc::new(AppState::with_store(RecordStore::new()));

    // 4. Serve.
    cohort_api::start_server(&config.server_config(), state).await?;

    info!("cohort-server exited cleanly");
    Ok(())
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), StartupError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| StartupError::Logging {
            message: format!("invalid log level {:?}: {e}", logging.level),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
