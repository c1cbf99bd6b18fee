//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level when present.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};
use crate::errors::{ConfigError, ConfigResult};

/// Install the global tracing subscriber described by `config`
///
/// Returns an error if a global subscriber is already installed or the
/// level directive cannot be parsed.
pub fn init_logging(config: &LoggingConfig) -> ConfigResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| ConfigError::InvalidValue {
            key: "LOG_LEVEL".to_string(),
            value: format!("{} ({})", config.level, e),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| ConfigError::Logging {
        message: e.to_string(),
    })
}
