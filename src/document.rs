//! The in-progress search request: role-tagged clauses, aggregations,
//! sort, highlight, window and score threshold.

use serde_json::{Map, Value};

use crate::aggregation::Aggregation;
use crate::query::boolean::{BoolQuery, BooleanClause, Occur};
use crate::query::clause::Clause;
use crate::query::highlight::Highlight;
use crate::query::sort::FieldSort;
use crate::util::put;

/// Accumulated state of a search request.
///
/// Compilation is a pure function of this state: calling [`compile`](Self::compile)
/// any number of times yields the same document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryDocument {
    query: BoolQuery,
    aggregations: Vec<(String, Aggregation)>,
    sort: Vec<FieldSort>,
    highlight: Option<Highlight>,
    from: Option<u64>,
    size: Option<u64>,
    min_score: Option<f64>,
}

impl QueryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// File a clause under the given role.
    pub fn add_clause(&mut self, clause: Clause, occur: Occur) {
        self.query.add_clause(clause, occur);
    }

    /// Clauses in insertion order.
    pub fn clauses(&self) -> &[BooleanClause] {
        self.query.clauses()
    }

    /// The boolean query built so far.
    pub fn query(&self) -> &BoolQuery {
        &self.query
    }

    /// Consume the document, keeping only its clauses and bool-level options.
    pub fn into_query(self) -> BoolQuery {
        self.query
    }

    pub fn set_minimum_should_match<V: Into<Value>>(&mut self, minimum: V) {
        self.query.set_minimum_should_match(minimum);
    }

    pub fn set_boost(&mut self, boost: f64) {
        self.query.set_boost(boost);
    }

    /// Register an aggregation.
    ///
    /// An alias that is already registered keeps its position and takes the
    /// new aggregation; the previous one is returned.
    pub fn add_aggregation(&mut self, alias: String, aggregation: Aggregation) -> Option<Aggregation> {
        match self.aggregations.iter_mut().find(|(name, _)| *name == alias) {
            Some(entry) => {
                log::debug!("aggregation alias `{alias}` replaced");
                Some(std::mem::replace(&mut entry.1, aggregation))
            }
            None => {
                self.aggregations.push((alias, aggregation));
                None
            }
        }
    }

    /// Look up an aggregation by alias.
    pub fn aggregation(&self, alias: &str) -> Option<&Aggregation> {
        self.aggregations
            .iter()
            .find(|(name, _)| name == alias)
            .map(|(_, aggregation)| aggregation)
    }

    /// Registered aggregations in registration order.
    pub fn aggregations(&self) -> impl Iterator<Item = (&str, &Aggregation)> {
        self.aggregations
            .iter()
            .map(|(alias, aggregation)| (alias.as_str(), aggregation))
    }

    pub fn add_sort(&mut self, sort: FieldSort) {
        self.sort.push(sort);
    }

    pub fn sorts(&self) -> &[FieldSort] {
        &self.sort
    }

    /// Set the highlight, replacing any previous one.
    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = Some(highlight);
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn set_from(&mut self, from: u64) {
        self.from = Some(from);
    }

    pub fn from(&self) -> Option<u64> {
        self.from
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn set_min_score(&mut self, min_score: f64) {
        self.min_score = Some(min_score);
    }

    pub fn min_score(&self) -> Option<f64> {
        self.min_score
    }

    /// Compile the document into a search request body.
    ///
    /// Keys appear in the order `query`, `aggs`, `sort`, `highlight`, `from`,
    /// `size`, `min_score`; absent parts are omitted, so an empty document
    /// compiles to `{}`.
    pub fn compile(&self) -> Value {
        let mut body = Map::new();

        if !self.query.is_empty() {
            body.insert("query".to_string(), self.query.to_value());
        }

        if !self.aggregations.is_empty() {
            let aggs: Map<String, Value> = self
                .aggregations
                .iter()
                .map(|(alias, aggregation)| (alias.clone(), aggregation.to_value()))
                .collect();
            body.insert("aggs".to_string(), Value::Object(aggs));
        }

        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(FieldSort::to_value).collect()),
            );
        }

        if let Some(highlight) = &self.highlight {
            body.insert("highlight".to_string(), highlight.to_value());
        }

        put(&mut body, "from", self.from);
        put(&mut body, "size", self.size);
        put(&mut body, "min_score", self.min_score);

        Value::Object(body)
    }
}
