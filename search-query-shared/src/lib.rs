//! # Search Query Shared
//!
//! Plain data types shared between the query builder and its callers:
//! paginated search results, documents, and sort directions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A document payload as stored in the search index (`_source`).
pub type Document = Map<String, Value>;

/// Default page number used when pagination is not set.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size used when pagination is not set.
pub const DEFAULT_PAGE_SIZE: u64 = 16;

/// Sort direction for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// The wire representation of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Pagination metadata returned alongside search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of matching documents reported by the cluster.
    pub total: u64,
    /// The page that was requested.
    pub current_page: u64,
    /// `ceil(total / page_size)`; zero when nothing matched.
    pub final_page: u64,
    /// Number of documents per page.
    pub page_size: u64,
}

impl PageInfo {
    /// Build page info for `total` hits, deriving the final page.
    pub fn new(total: u64, current_page: u64, page_size: u64) -> Self {
        let final_page = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };

        Self {
            total,
            current_page,
            final_page,
            page_size,
        }
    }

    /// Page info for a search that returned nothing.
    pub fn empty(current_page: u64, page_size: u64) -> Self {
        Self::new(0, current_page, page_size)
    }
}

/// A normalized, paginated search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub page: PageInfo,
    /// The `_source` payload of each hit, in response order.
    pub data: Vec<Value>,
}

impl SearchResult {
    /// An empty result for the given pagination.
    pub fn empty(current_page: u64, page_size: u64) -> Self {
        Self {
            page: PageInfo::empty(current_page, page_size),
            data: Vec::new(),
        }
    }

    /// Whether the result holds no documents.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_info_final_page() {
        assert_eq!(PageInfo::new(2, 1, 16).final_page, 1);
        assert_eq!(PageInfo::new(32, 1, 16).final_page, 2);
        assert_eq!(PageInfo::new(33, 1, 16).final_page, 3);
        assert_eq!(PageInfo::new(0, 1, 16).final_page, 0);
    }

    #[test]
    fn test_empty_result_serialization() {
        let result = SearchResult::empty(1, 16);
        assert!(result.is_empty());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            json!({
                "page": {"total": 0, "current_page": 1, "final_page": 0, "page_size": 16},
                "data": []
            })
        );
    }

    #[test]
    fn test_sort_order_serialization() {
        assert_eq!(serde_json::to_value(SortOrder::Asc).unwrap(), json!("asc"));
        assert_eq!(SortOrder::Desc.as_str(), "desc");
    }
}
