//! OpenSearch query builders.
//!
//! This module turns the filter AST and search body into the JSON query
//! DSL understood by OpenSearch (and Elasticsearch).

use serde_json::{json, Map, Value};

use crate::types::{BoolQuery, FilterTerm, SearchBody};

/// Build the DSL clause for a single filter term.
///
/// - `PhraseMatch` becomes `match_phrase`
/// - `Range` becomes `range` with a single comparator bound
/// - `Exists` becomes `exists`
pub fn build_filter_term(term: &FilterTerm) -> Value {
    match term {
        FilterTerm::PhraseMatch { field, value } => json!({
            "match_phrase": { field.as_str(): value }
        }),
        FilterTerm::Range {
            field,
            comparator,
            value,
        } => json!({
            "range": { field.as_str(): { comparator.as_str(): value } }
        }),
        FilterTerm::Exists { field } => json!({
            "exists": { "field": field }
        }),
    }
}

/// Build a `bool` query from must and must-not terms.
fn build_bool_query(query: &BoolQuery) -> Value {
    let must: Vec<Value> = query.must.iter().map(build_filter_term).collect();
    let must_not: Vec<Value> = query.must_not.iter().map(build_filter_term).collect();

    json!({
        "bool": {
            "must": must,
            "must_not": must_not
        }
    })
}

/// Build the full search request body.
///
/// Sort is written as an array of single-key objects so that field order
/// survives serialization. `sort` and `_source` are omitted when unset.
pub fn build_search_body(body: &SearchBody) -> Value {
    let mut root = Map::new();
    root.insert("from".to_string(), json!(body.from));
    root.insert("size".to_string(), json!(body.size));

    if !body.sort.is_empty() {
        let sort: Vec<Value> = body
            .sort
            .iter()
            .map(|(field, order)| json!({ field.as_str(): order.as_str() }))
            .collect();
        root.insert("sort".to_string(), Value::Array(sort));
    }

    if let Some(ref source) = body.source {
        root.insert("_source".to_string(), json!(source));
    }

    root.insert("query".to_string(), build_bool_query(&body.query));

    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Comparator;
    use search_query_shared::SortOrder;

    fn body_with(query: BoolQuery) -> SearchBody {
        SearchBody {
            from: 0,
            size: 16,
            sort: Vec::new(),
            source: None,
            query,
        }
    }

    #[test]
    fn test_build_phrase_match() {
        let clause = build_filter_term(&FilterTerm::phrase_match("status", "active"));
        assert_eq!(clause, json!({"match_phrase": {"status": "active"}}));
    }

    #[test]
    fn test_build_range() {
        let clause = build_filter_term(&FilterTerm::range("age", Comparator::Gt, 30));
        assert_eq!(clause, json!({"range": {"age": {"gt": 30}}}));

        let clause = build_filter_term(&FilterTerm::range("age", Comparator::Lte, 65));
        assert_eq!(clause, json!({"range": {"age": {"lte": 65}}}));
    }

    #[test]
    fn test_build_exists() {
        let clause = build_filter_term(&FilterTerm::exists("deleted_at"));
        assert_eq!(clause, json!({"exists": {"field": "deleted_at"}}));
    }

    #[test]
    fn test_build_search_body_minimal() {
        let body = build_search_body(&body_with(BoolQuery::default()));

        assert_eq!(body["from"], 0);
        assert_eq!(body["size"], 16);
        assert!(body.get("sort").is_none());
        assert!(body.get("_source").is_none());
        assert_eq!(body["query"]["bool"]["must"], json!([]));
        assert_eq!(body["query"]["bool"]["must_not"], json!([]));
    }

    #[test]
    fn test_build_search_body_full() {
        let mut body = body_with(BoolQuery {
            must: vec![FilterTerm::phrase_match("status", "active")],
            must_not: vec![FilterTerm::exists("deleted_at")],
        });
        body.from = 32;
        body.sort = vec![
            ("created_at".to_string(), SortOrder::Desc),
            ("name".to_string(), SortOrder::Asc),
        ];
        body.source = Some(vec!["name".to_string(), "age".to_string()]);

        let value = build_search_body(&body);

        assert_eq!(value["from"], 32);
        assert_eq!(
            value["sort"],
            json!([{"created_at": "desc"}, {"name": "asc"}])
        );
        assert_eq!(value["_source"], json!(["name", "age"]));
        assert_eq!(
            value["query"]["bool"]["must"][0],
            json!({"match_phrase": {"status": "active"}})
        );
        assert_eq!(
            value["query"]["bool"]["must_not"][0],
            json!({"exists": {"field": "deleted_at"}})
        );
    }
}
