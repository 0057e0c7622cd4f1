//! Search building, execution and pagination.

pub mod builder;
pub mod function_score;
pub mod paginator;
pub mod result;

pub use self::builder::{PageResolver, SearchBuilder};
pub use self::function_score::FunctionScoreBuilder;
pub use self::paginator::{PageWindow, Paginator};
pub use self::result::{Hit, SearchResult, SharedHits, SharedItems};

use serde::Serialize;
use serde_json::Value;

/// A compiled search request, ready to hand to a connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    /// Target index; all indices when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// Target mapping type (legacy engines only).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    /// The compiled request body.
    pub body: Value,
}

impl SearchRequest {
    /// Create a request for all indices.
    pub fn new(body: Value) -> Self {
        SearchRequest {
            index: None,
            doc_type: None,
            body,
        }
    }

    /// Set the target index.
    pub fn with_index<S: Into<String>>(mut self, index: S) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set the target mapping type.
    pub fn with_doc_type<S: Into<String>>(mut self, doc_type: S) -> Self {
        self.doc_type = Some(doc_type.into());
        self
    }

    /// The `_search` endpoint path this request targets.
    pub fn path(&self) -> String {
        match (&self.index, &self.doc_type) {
            (Some(index), Some(doc_type)) => format!("/{index}/{doc_type}/_search"),
            (Some(index), None) => format!("/{index}/_search"),
            (None, Some(doc_type)) => format!("/_all/{doc_type}/_search"),
            (None, None) => "/_search".to_string(),
        }
    }
}
