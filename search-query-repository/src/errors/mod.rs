//! Error types for the search query repository.

mod query_error;
mod search_error;

pub use query_error::QueryError;
pub use search_error::SearchError;
