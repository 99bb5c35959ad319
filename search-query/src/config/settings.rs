//! Settings read from the environment.

use std::env;

use search_query_repository::{ConnectionConfig, ErrorPolicy, QueryClientConfig};

use crate::telemetry::LogFormat;
use crate::StartupError;

/// Default cluster scheme.
const DEFAULT_SCHEME: &str = "http";

/// Default cluster host.
const DEFAULT_HOST: &str = "localhost";

/// Default cluster port.
const DEFAULT_PORT: u16 = 9200;

/// Everything the application needs to build its query client.
#[derive(Debug, Clone)]
pub struct Settings {
    pub connection: ConnectionConfig,
    pub query: QueryClientConfig,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ELASTIC_SCHEME`: URL scheme (default: http)
    /// - `ELASTIC_HOST`: cluster host (default: localhost)
    /// - `ELASTIC_PORT`: cluster port (default: 9200)
    /// - `ELASTIC_AUTH`: `true` or `1` to send basic-auth credentials
    /// - `ELASTIC_USER` / `ELASTIC_PASS`: credentials, required when auth is on
    /// - `APP_DEBUG`: `true` or `1` to surface backend failures as errors
    /// - `LOG_FORMAT`: `json` for JSON log lines (default: plain text)
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scheme = lookup("ELASTIC_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        let host = lookup("ELASTIC_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("ELASTIC_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| StartupError::config(format!("Invalid ELASTIC_PORT {:?}: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        let mut connection = ConnectionConfig::new(scheme, host, port);

        if is_truthy(lookup("ELASTIC_AUTH")) {
            let user = lookup("ELASTIC_USER")
                .ok_or_else(|| StartupError::config("ELASTIC_USER is required when ELASTIC_AUTH is set"))?;
            let pass = lookup("ELASTIC_PASS")
                .ok_or_else(|| StartupError::config("ELASTIC_PASS is required when ELASTIC_AUTH is set"))?;
            connection = connection.with_credentials(user, pass);
        }

        let query = if is_truthy(lookup("APP_DEBUG")) {
            QueryClientConfig::strict()
        } else {
            QueryClientConfig::lenient()
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            connection,
            query,
            log_format,
        })
    }

    /// The error policy selected by `APP_DEBUG`.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.query.error_policy
    }
}

fn is_truthy(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("1") | Some("true") | Some("yes") | Some("on")
    )
}
