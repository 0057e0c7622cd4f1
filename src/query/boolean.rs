//! Boolean query model for combining clauses by role.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::clause::Clause;
use crate::util::{object, put};

/// Occurrence requirements for boolean clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occur {
    /// The clause must match and contributes to the score.
    #[default]
    Must,
    /// The clause should match (equivalent to OR).
    Should,
    /// The clause must not match (equivalent to NOT).
    MustNot,
    /// The clause must match but does not contribute to the score.
    Filter,
}

impl Occur {
    /// Key of this role inside a compiled `bool` object.
    pub fn as_str(&self) -> &'static str {
        match self {
            Occur::Must => "must",
            Occur::Should => "should",
            Occur::MustNot => "must_not",
            Occur::Filter => "filter",
        }
    }
}

/// A clause in a boolean query.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanClause {
    /// The clause.
    pub clause: Clause,
    /// The occurrence requirement.
    pub occur: Occur,
}

impl BooleanClause {
    /// Create a new boolean clause.
    pub fn new(clause: Clause, occur: Occur) -> Self {
        BooleanClause { clause, occur }
    }
}

/// A boolean query that combines clauses with boolean logic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoolQuery {
    /// The clauses in insertion order.
    clauses: Vec<BooleanClause>,
    /// Minimum number (or percentage) of should clauses that must match.
    minimum_should_match: Option<Value>,
    /// The boost factor for this query.
    boost: Option<f64>,
}

impl BoolQuery {
    /// Create a new empty boolean query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clause under the given role.
    pub fn add_clause(&mut self, clause: Clause, occur: Occur) {
        self.clauses.push(BooleanClause::new(clause, occur));
    }

    /// Set the minimum number of should clauses that must match.
    pub fn set_minimum_should_match<V: Into<Value>>(&mut self, minimum: V) {
        self.minimum_should_match = Some(minimum.into());
    }

    /// Set the boost factor.
    pub fn set_boost(&mut self, boost: f64) {
        self.boost = Some(boost);
    }

    /// Get the clauses.
    pub fn clauses(&self) -> &[BooleanClause] {
        &self.clauses
    }

    /// Get clauses by occurrence type.
    pub fn clauses_by_occur(&self, occur: Occur) -> Vec<&Clause> {
        self.clauses
            .iter()
            .filter(|c| c.occur == occur)
            .map(|c| &c.clause)
            .collect()
    }

    /// Check if this query is empty.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Get the number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    fn has_options(&self) -> bool {
        self.minimum_should_match.is_some() || self.boost.is_some()
    }

    /// Serialize the query.
    ///
    /// A lone MUST clause without bool-level options compiles to the bare
    /// clause. Roles appear in the order they were first used.
    pub fn to_value(&self) -> Value {
        if let [only] = self.clauses.as_slice() {
            if only.occur == Occur::Must && !self.has_options() {
                return only.clause.to_value();
            }
        }

        let mut map = Map::new();
        for boolean_clause in &self.clauses {
            let entry = map
                .entry(boolean_clause.occur.as_str())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = entry {
                list.push(boolean_clause.clause.to_value());
            }
        }
        put(&mut map, "minimum_should_match", self.minimum_should_match.clone());
        put(&mut map, "boost", self.boost);

        object("bool", Value::Object(map))
    }
}
