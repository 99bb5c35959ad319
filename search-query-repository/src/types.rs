//! Request types and the filter AST sent to the search engine.

use std::str::FromStr;

use serde_json::Value;

use search_query_shared::SortOrder;

/// Range comparator for a `Range` filter term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Comparator {
    /// The key used inside a `range` clause.
    pub fn as_str(&self) -> &'static str {
        match self {
            Comparator::Gt => "gt",
            Comparator::Gte => "gte",
            Comparator::Lt => "lt",
            Comparator::Lte => "lte",
        }
    }
}

/// Filter operator accepted by `QueryBuilder::where_op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `>`, `>=`, `<`, `<=`
    Compare(Comparator),
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Operator::Eq),
            "!=" => Ok(Operator::NotEq),
            ">" => Ok(Operator::Compare(Comparator::Gt)),
            ">=" => Ok(Operator::Compare(Comparator::Gte)),
            "<" => Ok(Operator::Compare(Comparator::Lt)),
            "<=" => Ok(Operator::Compare(Comparator::Lte)),
            _ => Err(()),
        }
    }
}

/// A single predicate in a bool query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterTerm {
    /// Exact phrase match of `value` against `field`.
    PhraseMatch { field: String, value: Value },
    /// Bounded comparison of `field` against `value`.
    Range {
        field: String,
        comparator: Comparator,
        value: Value,
    },
    /// `field` is present with a non-null value.
    Exists { field: String },
}

impl FilterTerm {
    pub fn phrase_match(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::PhraseMatch {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn range(field: impl Into<String>, comparator: Comparator, value: impl Into<Value>) -> Self {
        Self::Range {
            field: field.into(),
            comparator,
            value: value.into(),
        }
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::Exists {
            field: field.into(),
        }
    }
}

/// The `bool` query: terms that must match and terms that must not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    pub must: Vec<FilterTerm>,
    pub must_not: Vec<FilterTerm>,
}

/// Body of a search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchBody {
    /// Offset of the first hit, `(page - 1) * page_size`.
    pub from: u64,
    /// Number of hits to return.
    pub size: u64,
    /// Sort fields in the order they were added.
    pub sort: Vec<(String, SortOrder)>,
    /// Source fields to return; `None` returns the whole document.
    pub source: Option<Vec<String>>,
    pub query: BoolQuery,
}

/// A search request scoped to an optional index and type.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: Option<String>,
    pub doc_type: Option<String>,
    pub body: SearchBody,
}

/// A request for a single document by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetRequest {
    pub id: String,
    pub index: Option<String>,
    pub doc_type: Option<String>,
}
