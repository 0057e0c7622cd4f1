//! Search results parsed from an engine response.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DevToolsError, Result};

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// The document ID.
    #[serde(rename = "_id")]
    pub id: String,
    /// The index the document lives in.
    #[serde(rename = "_index", default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    /// The relevance score; absent when results are sorted by a field.
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// The stored document, empty when `_source` is disabled.
    #[serde(rename = "_source", default)]
    pub source: Map<String, Value>,
    /// Highlighted fragments per field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HashMap<String, Vec<String>>>,
    /// Sort values of this hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,
}

impl Hit {
    /// Create a hit with an empty source.
    pub fn new<S: Into<String>>(id: S) -> Self {
        Hit {
            id: id.into(),
            index: None,
            score: None,
            source: Map::new(),
            highlight: None,
            sort: None,
        }
    }

    /// Set the score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Set a source field.
    pub fn with_field<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.source.insert(name.to_string(), value.into());
        self
    }

    /// Get a source field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.source.get(name)
    }
}

/// An item list shared between a [`SearchResult`] and the views built on it.
///
/// Clones are handles to the same buffer: a replacement or in-place edit
/// through one handle is observed through every other. Items start out as
/// [`Hit`]s and may be hydrated into any other type.
#[derive(Debug)]
pub struct SharedItems<T = Hit>(Rc<RefCell<Vec<T>>>);

/// The shared buffer of raw hits.
pub type SharedHits = SharedItems<Hit>;

impl<T> SharedItems<T> {
    /// Wrap an item list in a new shared buffer.
    pub fn new(items: Vec<T>) -> Self {
        SharedItems(Rc::new(RefCell::new(items)))
    }

    /// Borrow the items.
    ///
    /// # Panics
    ///
    /// Panics if the items are currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.0.borrow()
    }

    /// Borrow the items mutably.
    ///
    /// # Panics
    ///
    /// Panics if the items are currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<T>> {
        self.0.borrow_mut()
    }

    /// Replace the whole list, returning the previous one.
    pub fn replace(&self, items: Vec<T>) -> Vec<T> {
        self.0.replace(items)
    }

    /// Move the list out, leaving the buffer empty.
    pub fn take(&self) -> Vec<T> {
        self.0.take()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Check whether two handles refer to the same buffer.
    pub fn ptr_eq(&self, other: &SharedItems<T>) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for SharedItems<T> {
    fn clone(&self) -> Self {
        SharedItems(Rc::clone(&self.0))
    }
}

impl<T> Default for SharedItems<T> {
    fn default() -> Self {
        SharedItems::new(Vec::new())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Count(u64),
    Object {
        value: u64,
        #[serde(default)]
        relation: Option<String>,
    },
}

#[derive(Deserialize)]
struct RawHits {
    total: RawTotal,
    #[serde(default)]
    max_score: Option<f64>,
    hits: Vec<Hit>,
}

#[derive(Deserialize)]
struct RawResponse {
    #[serde(default)]
    took: Option<u64>,
    #[serde(default)]
    timed_out: bool,
    hits: RawHits,
    #[serde(default)]
    aggregations: Option<Value>,
}

/// The outcome of an executed search.
///
/// Hits are raw [`Hit`]s until [`hydrate`](Self::hydrate) swaps them for
/// domain records.
#[derive(Debug)]
pub struct SearchResult<T = Hit> {
    took: Option<u64>,
    timed_out: bool,
    total: u64,
    total_relation: Option<String>,
    max_score: Option<f64>,
    hits: SharedItems<T>,
    aggregations: Option<Value>,
}

impl<T> Clone for SearchResult<T> {
    fn clone(&self) -> Self {
        SearchResult {
            took: self.took,
            timed_out: self.timed_out,
            total: self.total,
            total_relation: self.total_relation.clone(),
            max_score: self.max_score,
            hits: self.hits.clone(),
            aggregations: self.aggregations.clone(),
        }
    }
}

impl SearchResult {
    /// Parse a raw engine response.
    ///
    /// Fails with [`DevToolsError::MalformedResponse`] when `hits`,
    /// `hits.total` or `hits.hits` is missing or a hit has no `_id`.
    pub fn from_response(response: Value) -> Result<Self> {
        let raw: RawResponse = serde_json::from_value(response)
            .map_err(|e| DevToolsError::malformed_response(e.to_string()))?;

        let (total, total_relation) = match raw.hits.total {
            RawTotal::Count(count) => (count, None),
            RawTotal::Object { value, relation } => (value, relation),
        };

        Ok(SearchResult {
            took: raw.took,
            timed_out: raw.timed_out,
            total,
            total_relation,
            max_score: raw.hits.max_score,
            hits: SharedItems::new(raw.hits.hits),
            aggregations: raw.aggregations,
        })
    }
}

impl<T> SearchResult<T> {

    /// Total number of matching documents reported by the engine.
    pub fn total_hits(&self) -> u64 {
        self.total
    }

    /// Whether the total is exact (`eq`) or a lower bound (`gte`), when reported.
    pub fn total_relation(&self) -> Option<&str> {
        self.total_relation.as_deref()
    }

    /// Borrow the hits of this page.
    pub fn hits(&self) -> Ref<'_, Vec<T>> {
        self.hits.borrow()
    }

    /// Borrow the hits mutably, e.g. to edit them in place.
    pub fn hits_mut(&self) -> RefMut<'_, Vec<T>> {
        self.hits.borrow_mut()
    }

    /// Replace the hit list; every view sharing it observes the new list.
    pub fn set_hits(&self, hits: Vec<T>) {
        self.hits.replace(hits);
    }

    /// A handle to the shared hit buffer.
    pub fn shared_hits(&self) -> SharedItems<T> {
        self.hits.clone()
    }

    /// Convert the hits into other records, e.g. domain objects loaded by ID.
    ///
    /// The hits are moved out of the shared buffer and handed to `hydrate`;
    /// the returned result owns a new buffer holding its output. Handles
    /// taken earlier with [`shared_hits`](Self::shared_hits) are left empty.
    pub fn hydrate<U, F>(self, hydrate: F) -> Result<SearchResult<U>>
    where
        F: FnOnce(Vec<T>) -> Result<Vec<U>>,
    {
        let hits = hydrate(self.hits.take())?;
        Ok(SearchResult {
            took: self.took,
            timed_out: self.timed_out,
            total: self.total,
            total_relation: self.total_relation,
            max_score: self.max_score,
            hits: SharedItems::new(hits),
            aggregations: self.aggregations,
        })
    }

    /// Milliseconds the engine spent on the search.
    pub fn took(&self) -> Option<u64> {
        self.took
    }

    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    pub fn max_score(&self) -> Option<f64> {
        self.max_score
    }

    /// The raw `aggregations` object of the response.
    pub fn aggregations(&self) -> Option<&Value> {
        self.aggregations.as_ref()
    }

    /// The raw result of a single aggregation.
    pub fn aggregation(&self, alias: &str) -> Option<&Value> {
        self.aggregations.as_ref().and_then(|aggs| aggs.get(alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response() -> Value {
        json!({
            "took": 3,
            "timed_out": false,
            "hits": {
                "total": {"value": 2, "relation": "eq"},
                "max_score": 1.5,
                "hits": [
                    {"_index": "products", "_id": "1", "_score": 1.5, "_source": {"name": "lamp"}},
                    {"_id": "2", "_score": null, "sort": [10],
                     "highlight": {"name": ["<mark>desk</mark>"]}}
                ]
            },
            "aggregations": {"avg_price": {"value": 12.5}}
        })
    }

    #[test]
    fn test_parse_response() -> Result<()> {
        let result = SearchResult::from_response(response())?;

        assert_eq!(result.total_hits(), 2);
        assert_eq!(result.total_relation(), Some("eq"));
        assert_eq!(result.took(), Some(3));
        assert_eq!(result.max_score(), Some(1.5));
        assert_eq!(result.aggregation("avg_price"), Some(&json!({"value": 12.5})));

        let hits = result.hits();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].field("name"), Some(&json!("lamp")));
        assert_eq!(hits[1].score, None);
        assert!(hits[1].source.is_empty());
        assert_eq!(hits[1].highlight.as_ref().unwrap()["name"], vec!["<mark>desk</mark>"]);
        Ok(())
    }

    #[test]
    fn test_legacy_numeric_total() -> Result<()> {
        let result = SearchResult::from_response(json!({"hits": {"total": 7, "hits": []}}))?;
        assert_eq!(result.total_hits(), 7);
        assert!(result.total_relation().is_none());
        assert!(result.hits().is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_responses() {
        let cases = [
            json!({}),
            json!({"hits": {"hits": []}}),
            json!({"hits": {"total": 1}}),
            json!({"hits": {"total": 1, "hits": [{"_score": 1.0}]}}),
        ];
        for case in cases {
            assert!(matches!(
                SearchResult::from_response(case),
                Err(DevToolsError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_set_hits_is_shared() -> Result<()> {
        let result = SearchResult::from_response(response())?;
        let handle = result.shared_hits();

        result.set_hits(vec![Hit::new("x")]);
        assert_eq!(handle.borrow()[0].id, "x");

        handle.borrow_mut().push(Hit::new("y"));
        assert_eq!(result.hits().len(), 2);
        assert!(handle.ptr_eq(&result.shared_hits()));
        Ok(())
    }

    #[test]
    fn test_hydrate_keeps_metadata() -> Result<()> {
        let result = SearchResult::from_response(response())?;
        let stale = result.shared_hits();

        let names = result.hydrate(|hits| {
            Ok(hits
                .into_iter()
                .map(|hit| hit.field("name").and_then(Value::as_str).unwrap_or("").to_string())
                .collect::<Vec<String>>())
        })?;

        assert_eq!(names.total_hits(), 2);
        assert_eq!(names.max_score(), Some(1.5));
        assert_eq!(*names.hits(), vec!["lamp".to_string(), String::new()]);
        assert!(stale.is_empty());
        Ok(())
    }

    #[test]
    fn test_hydrate_error_propagates() -> Result<()> {
        let result = SearchResult::from_response(response())?;
        let hydrated: Result<SearchResult<String>> =
            result.hydrate(|_| Err(DevToolsError::invalid_argument("unknown record")));
        assert!(matches!(hydrated, Err(DevToolsError::InvalidArgument(_))));
        Ok(())
    }
}
