//! Dependency initialization and wiring for the query client.

use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Settings;
use crate::telemetry::{init_tracing, LogFormat};
use crate::StartupError;
use search_query_repository::{OpenSearchClient, QueryClient, SearchEngineClient};

/// Container for all initialized dependencies.
///
/// Build this once at process start and pass the query client by reference
/// (or clone it) wherever queries are made.
pub struct Dependencies {
    pub settings: Settings,
    /// Query client sharing the single engine handle.
    pub query_client: QueryClient,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// Loads a `.env` file if present, installs logging in the configured
    /// format, builds the OpenSearch client, and verifies that the cluster
    /// is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StartupError)` - If configuration is invalid or the cluster is unhealthy
    pub async fn from_env() -> Result<Self, StartupError> {
        dotenv::dotenv().ok();

        let settings = Settings::from_env()?;
        install_logging(settings.log_format);
        let dependencies = Self::from_settings(settings)?;

        // Verify the cluster is reachable
        let healthy = dependencies
            .query_client
            .engine()
            .health_check()
            .await
            .map_err(|e| StartupError::config(format!("Search cluster health check failed: {}", e)))?;

        if !healthy {
            return Err(StartupError::config("Search cluster is unhealthy"));
        }

        info!("Search cluster connection verified");

        Ok(dependencies)
    }

    /// Build dependencies from already-loaded settings without touching the network.
    pub fn from_settings(settings: Settings) -> Result<Self, StartupError> {
        info!(
            scheme = %settings.connection.scheme,
            host = %settings.connection.host,
            port = settings.connection.port,
            error_policy = ?settings.query.error_policy,
            "Initializing dependencies"
        );

        let engine = OpenSearchClient::new(&settings.connection)?;
        Ok(Self::with_engine(settings, Arc::new(engine)))
    }

    /// Wire dependencies around an existing engine handle.
    pub fn with_engine(settings: Settings, engine: Arc<dyn SearchEngineClient>) -> Self {
        let query_client = QueryClient::with_config(engine, settings.query.clone());
        Self {
            settings,
            query_client,
        }
    }
}

/// Install the tracing subscriber unless the host process already has one.
fn install_logging(format: LogFormat) {
    if let Err(e) = init_tracing(format) {
        debug!(error = %e, "Keeping existing tracing subscriber");
    }
}
