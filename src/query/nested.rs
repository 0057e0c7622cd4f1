//! Nested clause wrapping a sub-document's clauses under an object path.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::query::boolean::BoolQuery;

/// How scores of matching nested objects are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMode {
    #[default]
    Avg,
    Max,
    Min,
    Sum,
    None,
}

impl ScoreMode {
    /// Wire name of the score mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreMode::Avg => "avg",
            ScoreMode::Max => "max",
            ScoreMode::Min => "min",
            ScoreMode::Sum => "sum",
            ScoreMode::None => "none",
        }
    }
}

/// A nested query over the objects stored under `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct NestedQuery {
    /// The nested object path.
    pub path: String,
    /// Clauses collected from the sub-builder.
    pub query: BoolQuery,
    /// Score combination.
    pub score_mode: ScoreMode,
}

impl NestedQuery {
    /// Create a new nested query.
    pub fn new<S: Into<String>>(path: S, query: BoolQuery, score_mode: ScoreMode) -> Self {
        NestedQuery {
            path: path.into(),
            query,
            score_mode,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        json!({
            "nested": {
                "path": self.path,
                "query": self.query.to_value(),
                "score_mode": self.score_mode.as_str(),
            }
        })
    }
}
