//! # Search Query Repository
//!
//! This crate provides a fluent query builder over a search engine, the
//! trait it talks to, and a concrete implementation for OpenSearch. It also
//! includes the filter AST, error types, and configuration types.

pub mod builder;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use builder::{QueryBuilder, DELETED_AT_FIELD};
pub use client::QueryClient;
pub use config::{ConnectionConfig, Credentials, ErrorPolicy, QueryClientConfig};
pub use errors::{QueryError, SearchError};
pub use interfaces::SearchEngineClient;
pub use opensearch::OpenSearchClient;
pub use types::{Comparator, FilterTerm, GetRequest, Operator, SearchRequest};
