//! Backend failures reported by a `SearchEngineClient`.

use thiserror::Error;

/// Why a search or document fetch against the cluster did not produce a body.
#[derive(Error, Debug)]
pub enum SearchError {
    /// The endpoint URL or transport could not be set up, or the cluster
    /// did not answer.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The cluster answered with a failure status.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The response body was not valid JSON.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The request lacks something the backend needs, such as an index for `get`.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The cluster answered 404 for the index or document.
    #[error("Document not found: {0}")]
    NotFound(String),
}

impl SearchError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Whether the cluster reported the target as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
