//! Query builder error types.

use thiserror::Error;

use super::SearchError;

/// Failure surfaced by a query execution under `ErrorPolicy::Strict`.
///
/// The display message stays generic. The backend failure is available as
/// the error source.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A search request failed.
    #[error("Search failed")]
    SearchFailed(#[source] SearchError),

    /// A single-document fetch failed.
    #[error("Document fetch failed")]
    FetchFailed(#[source] SearchError),
}

impl QueryError {
    /// The backend error behind this failure.
    pub fn backend(&self) -> &SearchError {
        match self {
            Self::SearchFailed(e) | Self::FetchFailed(e) => e,
        }
    }
}
