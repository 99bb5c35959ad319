//! # Search Query
//!
//! Application wiring for the search query builder.
//!
//! This crate loads connection settings once at start-up, builds the shared
//! search engine handle, and installs structured logging.

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, Settings};
pub use telemetry::{init_tracing, LogFormat};

pub use search_query_repository::{
    ErrorPolicy, QueryBuilder, QueryClient, QueryError, SearchEngineClient, SearchError,
};
pub use search_query_shared::{Document, PageInfo, SearchResult, SortOrder};

use thiserror::Error;

/// Errors that can occur while wiring the query client.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_query_repository::SearchError),

    /// Logging could not be installed.
    #[error("Telemetry error: {0}")]
    TelemetryError(String),
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
