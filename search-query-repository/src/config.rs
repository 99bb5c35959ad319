//! Configuration types for the search client and query builder.

use url::Url;

use crate::errors::SearchError;

/// Basic-auth credentials for the search cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

/// Connection settings for the search cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// URL scheme, `http` or `https`.
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Credentials to send with every request, if the cluster requires auth.
    pub credentials: Option<Credentials>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            scheme: "http".to_string(),
            host: "localhost".to_string(),
            port: 9200,
            credentials: None,
        }
    }
}

impl ConnectionConfig {
    /// Create a config for the given endpoint without credentials.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
            credentials: None,
        }
    }

    /// Attach basic-auth credentials.
    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            user: user.into(),
            pass: pass.into(),
        });
        self
    }

    /// Render the cluster endpoint URL.
    pub fn url(&self) -> Result<Url, SearchError> {
        let raw = format!("{}://{}:{}", self.scheme, self.host, self.port);
        Url::parse(&raw).map_err(|e| SearchError::connection(format!("{}: {}", raw, e)))
    }
}

/// How the query builder reacts to backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Surface backend failures as `QueryError`.
    Strict,
    /// Log backend failures and return empty results.
    #[default]
    Lenient,
}

/// Configuration for the QueryClient.
#[derive(Debug, Clone, Default)]
pub struct QueryClientConfig {
    pub error_policy: ErrorPolicy,
}

impl QueryClientConfig {
    /// Create a config that surfaces backend failures.
    pub fn strict() -> Self {
        Self {
            error_policy: ErrorPolicy::Strict,
        }
    }

    /// Create a config that swallows backend failures.
    pub fn lenient() -> Self {
        Self {
            error_policy: ErrorPolicy::Lenient,
        }
    }
}
