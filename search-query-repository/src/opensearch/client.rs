//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials as BasicCredentials,
    cluster::ClusterHealthParts,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    GetParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};

use crate::config::ConnectionConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::queries::build_search_body;
use crate::types::{GetRequest, SearchRequest};

/// OpenSearch client implementation.
///
/// Holds a single transport to one cluster node. Build it once at start-up
/// and share it behind an `Arc` with every query client.
///
/// # Example
///
/// ```ignore
/// use search_query_repository::{ConnectionConfig, OpenSearchClient};
///
/// let config = ConnectionConfig::new("http", "localhost", 9200);
/// let client = OpenSearchClient::new(&config)?;
/// let healthy = client.health_check().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured endpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(config: &ConnectionConfig) -> Result<Self, SearchError> {
        let url = config.url()?;

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some(ref credentials) = config.credentials {
            builder = builder.auth(BasicCredentials::Basic(
                credentials.user.clone(),
                credentials.pass.clone(),
            ));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            auth = config.credentials.is_some(),
            "Created OpenSearch client"
        );

        Ok(Self { client })
    }

    /// Turn a non-success response into an error, reading its body for context.
    async fn check_status(response: Response, action: &str) -> Result<Response, SearchError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        if status.as_u16() == 404 {
            debug!(action = action, body = %error_body, "Resource not found");
            return Err(SearchError::not_found(error_body));
        }

        error!(status = %status, body = %error_body, action = action, "Request failed");
        Err(SearchError::query(format!(
            "{} failed with status {}: {}",
            action, status, error_body
        )))
    }

    fn log_ignored_type(doc_type: &Option<String>) {
        if let Some(doc_type) = doc_type {
            debug!(doc_type = %doc_type, "OpenSearch has no mapping types; type not sent");
        }
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self, request), fields(index = ?request.index))]
    async fn search(&self, request: &SearchRequest) -> Result<Value, SearchError> {
        Self::log_ignored_type(&request.doc_type);

        let body = build_search_body(&request.body);
        debug!(body = %body, "Sending search request");

        let indices: Vec<&str> = request.index.iter().map(String::as_str).collect();
        let parts = if indices.is_empty() {
            SearchParts::None
        } else {
            SearchParts::Index(&indices)
        };

        let response = self
            .client
            .search(parts)
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let response = Self::check_status(response, "Search").await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    #[instrument(skip(self, request), fields(id = %request.id, index = ?request.index))]
    async fn get(&self, request: &GetRequest) -> Result<Value, SearchError> {
        Self::log_ignored_type(&request.doc_type);

        let index = request
            .index
            .as_deref()
            .ok_or_else(|| SearchError::invalid_query("get requires an index"))?;

        let response = self
            .client
            .get(GetParts::IndexId(index, &request.id))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let response = Self::check_status(response, "Get").await?;

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Ok(false);
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let status = body["status"].as_str().unwrap_or("red");
        debug!(status = status, "Cluster health");

        Ok(status != "red")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoolQuery, FilterTerm, SearchBody};
    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OpenSearchClient {
        let url = Url::parse(&server.uri()).unwrap();
        let config = ConnectionConfig::new(
            "http",
            url.host_str().unwrap(),
            url.port().unwrap(),
        );
        OpenSearchClient::new(&config).unwrap()
    }

    fn search_request(index: Option<&str>) -> SearchRequest {
        SearchRequest {
            index: index.map(str::to_string),
            doc_type: None,
            body: SearchBody {
                from: 16,
                size: 16,
                sort: Vec::new(),
                source: None,
                query: BoolQuery {
                    must: vec![FilterTerm::phrase_match("status", "active")],
                    must_not: vec![FilterTerm::exists("deleted_at")],
                },
            },
        }
    }

    fn get_request(id: &str) -> GetRequest {
        GetRequest {
            id: id.to_string(),
            index: Some("users".to_string()),
            doc_type: None,
        }
    }

    #[test]
    fn test_new_client() {
        let config = ConnectionConfig::default();
        assert!(OpenSearchClient::new(&config).is_ok());
    }

    #[test]
    fn test_new_client_with_credentials() {
        let config =
            ConnectionConfig::new("https", "search.internal", 9243).with_credentials("u", "p");
        assert!(OpenSearchClient::new(&config).is_ok());
    }

    #[test]
    fn test_new_client_invalid_url() {
        let config = ConnectionConfig::new("http", "bad host", 9200);
        assert!(matches!(
            OpenSearchClient::new(&config),
            Err(SearchError::ConnectionError(_))
        ));
    }

    #[tokio::test]
    async fn test_get_requires_index() {
        let client = OpenSearchClient::new(&ConnectionConfig::default()).unwrap();
        let request = GetRequest {
            id: "1".to_string(),
            index: None,
            doc_type: None,
        };

        let result = client.get(&request).await;
        assert!(matches!(result, Err(SearchError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_search_scoped_to_index_sends_body() {
        let server = MockServer::start().await;
        let request = search_request(Some("users"));
        let hits = json!({"hits": {"hits": [{"_source": {"id": 1}}], "total": 1}});

        Mock::given(method("POST"))
            .and(path("/users/_search"))
            .and(body_json(build_search_body(&request.body)))
            .respond_with(ResponseTemplate::new(200).set_body_json(hits.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).search(&request).await.unwrap();
        assert_eq!(response, hits);
    }

    #[tokio::test]
    async fn test_search_without_index_hits_root() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/_search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .search(&search_request(None))
            .await
            .unwrap();
        assert_eq!(response, json!({"hits": {}}));
    }

    #[tokio::test]
    async fn test_search_server_error_is_query_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/users/_search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("shard failure"))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .search(&search_request(Some("users")))
            .await;
        match result {
            Err(SearchError::QueryError(msg)) => assert!(msg.contains("shard failure")),
            other => panic!("expected QueryError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_returns_document() {
        let server = MockServer::start().await;
        let body = json!({"_id": "1", "found": true, "_source": {"name": "x"}});

        Mock::given(method("GET"))
            .and(path("/users/_doc/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server).get(&get_request("1")).await.unwrap();
        assert_eq!(response, body);
    }

    #[tokio::test]
    async fn test_get_missing_document_is_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/_doc/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"_id": "missing", "found": false})),
            )
            .mount(&server)
            .await;

        let result = client_for(&server).get(&get_request("missing")).await;
        assert!(matches!(result, Err(SearchError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_server_error_is_query_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/_doc/1"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let result = client_for(&server).get(&get_request("1")).await;
        assert!(matches!(result, Err(SearchError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_missing_document_through_lenient_builder() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/_doc/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"found": false})))
            .mount(&server)
            .await;

        let engine = client_for(&server);
        let document = crate::builder::QueryBuilder::new(&engine, crate::config::ErrorPolicy::Lenient)
            .index("users")
            .get("missing")
            .await
            .unwrap();
        assert!(document.is_empty());
    }

    #[tokio::test]
    async fn test_health_check_status() {
        for (status, healthy) in [("green", true), ("yellow", true), ("red", false)] {
            let server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/_cluster/health"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!({"status": status})),
                )
                .mount(&server)
                .await;

            let result = client_for(&server).health_check().await.unwrap();
            assert_eq!(result, healthy, "cluster status {}", status);
        }
    }

    #[tokio::test]
    async fn test_health_check_failure_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/_cluster/health"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(!client_for(&server).health_check().await.unwrap());
    }
}
