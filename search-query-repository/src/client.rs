//! Query client implementation.
//!
//! This module provides the entry point application code uses to start
//! queries against the shared search engine handle.

use std::sync::Arc;

use crate::builder::QueryBuilder;
use crate::config::{ErrorPolicy, QueryClientConfig};
use crate::interfaces::SearchEngineClient;

/// Hands out fresh query builders bound to one engine handle and policy.
///
/// Cloning is cheap: clones share the same engine.
#[derive(Clone)]
pub struct QueryClient {
    engine: Arc<dyn SearchEngineClient>,
    config: QueryClientConfig,
}

impl QueryClient {
    /// Create a new QueryClient with default configuration (lenient errors).
    pub fn new(engine: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            engine,
            config: QueryClientConfig::default(),
        }
    }

    /// Create a new QueryClient with custom configuration.
    pub fn with_config(engine: Arc<dyn SearchEngineClient>, config: QueryClientConfig) -> Self {
        Self { engine, config }
    }

    /// Start a new query.
    pub fn query(&self) -> QueryBuilder<'_> {
        QueryBuilder::new(self.engine.as_ref(), self.config.error_policy)
    }

    /// The error policy applied to every builder from this client.
    pub fn error_policy(&self) -> ErrorPolicy {
        self.config.error_policy
    }

    /// The shared engine handle.
    pub fn engine(&self) -> &Arc<dyn SearchEngineClient> {
        &self.engine
    }
}
