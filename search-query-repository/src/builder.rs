//! Fluent query builder.
//!
//! A `QueryBuilder` accumulates index selection, filters, sort, pagination,
//! and field projection, then runs exactly once through `search` or `get`.
//! Both execution methods consume the builder.

use serde_json::Value;
use tracing::{debug, instrument, warn};

use search_query_shared::{
    Document, PageInfo, SearchResult, SortOrder, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};

use crate::config::ErrorPolicy;
use crate::errors::{QueryError, SearchError};
use crate::interfaces::SearchEngineClient;
use crate::types::{
    BoolQuery, FilterTerm, GetRequest, Operator, SearchBody, SearchRequest,
};

/// Documents with a value in this field are soft-deleted and never returned.
pub const DELETED_AT_FIELD: &str = "deleted_at";

/// Accumulates search parameters for a single query.
///
/// # Example
///
/// ```ignore
/// let result = client
///     .query()
///     .index("users")
///     .where_eq("status", "active")
///     .where_op("age", ">=", 18)
///     .sort("created_at", SortOrder::Desc)
///     .paginate(2, 20)
///     .search()
///     .await?;
/// ```
pub struct QueryBuilder<'a> {
    engine: &'a dyn SearchEngineClient,
    policy: ErrorPolicy,
    index: Option<String>,
    doc_type: Option<String>,
    page: u64,
    page_size: u64,
    sort: Vec<(String, SortOrder)>,
    fields: Option<Vec<String>>,
    query: BoolQuery,
}

impl<'a> QueryBuilder<'a> {
    /// Create a builder with default pagination (page 1, 16 per page).
    pub fn new(engine: &'a dyn SearchEngineClient, policy: ErrorPolicy) -> Self {
        Self {
            engine,
            policy,
            index: None,
            doc_type: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Vec::new(),
            fields: None,
            query: BoolQuery::default(),
        }
    }

    /// Set the target index. Empty names are ignored.
    pub fn index(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.index = Some(name);
        }
        self
    }

    /// Set the target document type. Empty names are ignored.
    pub fn doc_type(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.doc_type = Some(name);
        }
        self
    }

    /// Set page and page size. Both must be non-zero, otherwise neither changes.
    pub fn paginate(mut self, page: u64, page_size: u64) -> Self {
        if page != 0 && page_size != 0 {
            self.page = page;
            self.page_size = page_size;
        }
        self
    }

    /// Sort by `field`. Re-sorting a field replaces its direction in place.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        let field = field.into();
        match self.sort.iter_mut().find(|(existing, _)| *existing == field) {
            Some(entry) => entry.1 = order,
            None => self.sort.push((field, order)),
        }
        self
    }

    /// Restrict returned documents to these source fields.
    ///
    /// An empty list leaves the projection unchanged.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut projection: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !projection.contains(&field) {
                projection.push(field);
            }
        }

        if !projection.is_empty() {
            self.fields = Some(projection);
        }
        self
    }

    /// Add a filter, mirroring the two- and three-argument `where` forms.
    ///
    /// With no `value` (or a JSON null), `operator` is the value to
    /// phrase-match. Otherwise the operator decides the clause, see
    /// [`QueryBuilder::where_op`].
    pub fn filter(
        self,
        field: impl Into<String>,
        operator: impl Into<Value>,
        value: Option<Value>,
    ) -> Self {
        let operator = operator.into();
        match value {
            None | Some(Value::Null) => self.where_eq(field, operator),
            Some(value) => match operator.as_str() {
                Some(op) => self.where_op(field, op, value),
                None => {
                    warn!(operator = %operator, "Ignoring filter with non-string operator");
                    self
                }
            },
        }
    }

    /// Require `field` to match `value` as a phrase.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.query
            .must
            .push(FilterTerm::phrase_match(field, value));
        self
    }

    /// Add a filter using one of `=`, `!=`, `>`, `>=`, `<`, `<=`.
    ///
    /// `!=` excludes phrase matches. Any other operator adds nothing.
    pub fn where_op(
        mut self,
        field: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Self {
        let field = field.into();
        match operator.parse::<Operator>() {
            Ok(Operator::Eq) => self.query.must.push(FilterTerm::phrase_match(field, value)),
            Ok(Operator::NotEq) => self
                .query
                .must_not
                .push(FilterTerm::phrase_match(field, value)),
            Ok(Operator::Compare(comparator)) => self
                .query
                .must
                .push(FilterTerm::range(field, comparator, value)),
            Err(()) => {
                warn!(field = %field, operator = operator, "Ignoring filter with unknown operator");
            }
        }
        self
    }

    /// Current page number.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Current page size.
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Compose the request `search` would send, without sending it.
    ///
    /// The soft-delete exclusion is appended here, once per composed request.
    pub fn build_search_request(&self) -> SearchRequest {
        let mut query = self.query.clone();
        query.must_not.push(FilterTerm::exists(DELETED_AT_FIELD));

        SearchRequest {
            index: self.index.clone(),
            doc_type: self.doc_type.clone(),
            body: SearchBody {
                from: (self.page - 1).saturating_mul(self.page_size),
                size: self.page_size,
                sort: self.sort.clone(),
                source: self.fields.clone(),
                query,
            },
        }
    }

    /// Compose the request `get` would send for `document_id`.
    pub fn build_get_request(&self, document_id: impl Into<String>) -> GetRequest {
        GetRequest {
            id: document_id.into(),
            index: self.index.clone(),
            doc_type: self.doc_type.clone(),
        }
    }

    /// Run the search and normalize the response.
    ///
    /// Under `ErrorPolicy::Lenient` a backend failure yields an empty result.
    #[instrument(skip(self), fields(index = ?self.index, page = self.page, page_size = self.page_size))]
    pub async fn search(self) -> Result<SearchResult, QueryError> {
        let request = self.build_search_request();

        let response = match self.engine.search(&request).await {
            Ok(response) => response,
            Err(e) => self.recover(e, QueryError::SearchFailed)?,
        };

        let result = self.normalize_search_response(&response);
        if result.is_empty() {
            debug!("Search matched no documents");
        } else {
            debug!(
                total = result.page.total,
                returned = result.data.len(),
                "Search completed"
            );
        }
        Ok(result)
    }

    /// Fetch one document by id, filtered to the field projection if set.
    ///
    /// Under `ErrorPolicy::Lenient` a missing document or backend failure
    /// yields an empty document.
    #[instrument(skip(self, document_id), fields(index = ?self.index))]
    pub async fn get(self, document_id: impl Into<String>) -> Result<Document, QueryError> {
        let request = self.build_get_request(document_id);

        let response = match self.engine.get(&request).await {
            Ok(response) => response,
            Err(e) => self.recover(e, QueryError::FetchFailed)?,
        };

        Ok(self.normalize_document(&response))
    }

    /// Apply the error policy to a backend failure.
    fn recover(
        &self,
        error: SearchError,
        wrap: fn(SearchError) -> QueryError,
    ) -> Result<Value, QueryError> {
        match self.policy {
            ErrorPolicy::Strict => Err(wrap(error)),
            ErrorPolicy::Lenient => {
                if error.is_not_found() {
                    debug!(error = %error, "Target not found; returning empty response");
                } else {
                    warn!(error = %error, "Search backend failed; returning empty response");
                }
                Ok(Value::Object(Default::default()))
            }
        }
    }

    /// Reshape a raw search response into a paginated result.
    ///
    /// Hits are only read when both `hits.hits` and `hits.total` are
    /// non-empty; anything else is treated as zero results.
    pub fn normalize_search_response(&self, response: &Value) -> SearchResult {
        let hits = response["hits"]["hits"]
            .as_array()
            .filter(|hits| !hits.is_empty());
        let total = extract_total(&response["hits"]["total"]).filter(|total| *total > 0);

        let (total, data) = match (hits, total) {
            (Some(hits), Some(total)) => {
                let data = hits
                    .iter()
                    .map(|hit| hit.get("_source").cloned().unwrap_or(Value::Null))
                    .collect();
                (total, data)
            }
            _ => (0, Vec::new()),
        };

        SearchResult {
            page: PageInfo::new(total, self.page, self.page_size),
            data,
        }
    }

    /// Extract `_source` from a raw get response, applying the projection.
    ///
    /// Projected fields missing from the document are not added.
    pub fn normalize_document(&self, response: &Value) -> Document {
        let source = match response.get("_source") {
            Some(Value::Object(source)) => source.clone(),
            _ => return Document::new(),
        };

        match self.fields {
            Some(ref fields) => source
                .into_iter()
                .filter(|(key, _)| fields.contains(key))
                .collect(),
            None => source,
        }
    }
}

/// Read `hits.total` as either a bare count or `{"value": n, ...}`.
fn extract_total(total: &Value) -> Option<u64> {
    match total {
        Value::Number(n) => number_as_count(n),
        Value::Object(map) => match map.get("value") {
            Some(Value::Number(n)) => number_as_count(n),
            _ => None,
        },
        _ => None,
    }
}

/// Counts as `u64`; non-negative floats such as `2.0` are truncated.
fn number_as_count(n: &serde_json::Number) -> Option<u64> {
    n.as_u64().or_else(|| {
        n.as_f64()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
    })
}
