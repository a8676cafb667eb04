use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{AppConfig, LogFormat};

/// Install the global tracing subscriber. Returns `false` when one was
/// already installed.
pub fn init_tracing(config: &AppConfig) -> bool {
    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));

    match config.log_format {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .try_init()
            .is_ok(),
        LogFormat::Text => fmt().with_env_filter(filter).try_init().is_ok(),
    }
}
