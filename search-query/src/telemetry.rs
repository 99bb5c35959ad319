//! Structured logging setup.

use tracing_subscriber::EnvFilter;

use crate::StartupError;

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `info`. Fails if a
/// subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> Result<(), StartupError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .try_init(),
    };

    result.map_err(|e| StartupError::TelemetryError(e.to_string()))
}
