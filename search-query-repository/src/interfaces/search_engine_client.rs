//! Search engine client trait definition.
//!
//! This module defines the abstract interface the query builder talks to,
//! allowing for different backend implementations (OpenSearch, mocks, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{GetRequest, SearchRequest};

/// Abstract interface for search engine operations.
///
/// Implementations return the raw response body; reshaping it into result
/// types is the query builder's job.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so a single handle can be
/// shared by every builder in the process.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Execute a search request.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw response body (`{"hits": {...}}`)
    /// * `Err(SearchError)` - If the request could not be sent or the
    ///   engine answered with a failure status
    async fn search(&self, request: &SearchRequest) -> Result<Value, SearchError>;

    /// Fetch a single document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw response body (`{"_source": {...}}`)
    /// * `Err(SearchError::NotFound)` - If the document does not exist
    /// * `Err(SearchError)` - If the fetch fails
    async fn get(&self, request: &GetRequest) -> Result<Value, SearchError>;

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine is healthy
    /// * `Ok(false)` - If the search engine is unhealthy
    /// * `Err(SearchError)` - If the health check fails to execute
    async fn health_check(&self) -> Result<bool, SearchError>;
}
