//! Function score clause: modifies the score of an inner query.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::query::boolean::BoolQuery;
use crate::query::script::Script;
use crate::util::{Extra, merge_extra, object, put};

/// Modifier applied to a field value before it multiplies the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldValueModifier {
    #[default]
    None,
    Log,
    Log1p,
    Log2p,
    Ln,
    Ln1p,
    Ln2p,
    Square,
    Sqrt,
    Reciprocal,
}

impl FieldValueModifier {
    /// Wire name of the modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldValueModifier::None => "none",
            FieldValueModifier::Log => "log",
            FieldValueModifier::Log1p => "log1p",
            FieldValueModifier::Log2p => "log2p",
            FieldValueModifier::Ln => "ln",
            FieldValueModifier::Ln1p => "ln1p",
            FieldValueModifier::Ln2p => "ln2p",
            FieldValueModifier::Square => "square",
            FieldValueModifier::Sqrt => "sqrt",
            FieldValueModifier::Reciprocal => "reciprocal",
        }
    }
}

/// Shape of a decay function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecayKind {
    Gauss,
    Linear,
    Exp,
}

impl DecayKind {
    /// Wire name of the decay function.
    pub fn as_str(&self) -> &'static str {
        match self {
            DecayKind::Gauss => "gauss",
            DecayKind::Linear => "linear",
            DecayKind::Exp => "exp",
        }
    }
}

/// Parameters of a decay function.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayParams {
    /// Point of full score (number, date or geo point).
    pub origin: Value,
    /// Distance from `origin + offset` at which the score equals `decay`.
    pub scale: Value,
    /// Distance from origin within which the score is not reduced.
    pub offset: Option<Value>,
    /// Score at `scale` distance.
    pub decay: Option<f64>,
}

impl DecayParams {
    /// Create decay parameters from origin and scale.
    pub fn new<O: Into<Value>, S: Into<Value>>(origin: O, scale: S) -> Self {
        DecayParams {
            origin: origin.into(),
            scale: scale.into(),
            offset: None,
            decay: None,
        }
    }

    /// Set the offset.
    pub fn with_offset<V: Into<Value>>(mut self, offset: V) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Set the decay at scale distance.
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = Some(decay);
        self
    }

    fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("origin".to_string(), self.origin.clone());
        map.insert("scale".to_string(), self.scale.clone());
        put(&mut map, "offset", self.offset.clone());
        put(&mut map, "decay", self.decay);
        Value::Object(map)
    }
}

/// A single score function.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreFunction {
    /// Multiply the score by a (modified) field value.
    FieldValueFactor {
        field: String,
        factor: Option<f64>,
        modifier: Option<FieldValueModifier>,
        missing: Option<f64>,
    },
    /// Constant weight.
    Weight(f64),
    /// Uniformly distributed random score.
    RandomScore {
        seed: Option<Value>,
        field: Option<String>,
    },
    /// Score computed by a script.
    ScriptScore(Script),
    /// Score decaying with the distance of a field value from an origin.
    Decay {
        kind: DecayKind,
        field: String,
        params: DecayParams,
    },
}

impl ScoreFunction {
    fn write_into(&self, map: &mut Map<String, Value>) {
        match self {
            ScoreFunction::FieldValueFactor {
                field,
                factor,
                modifier,
                missing,
            } => {
                let mut inner = Map::new();
                inner.insert("field".to_string(), Value::from(field.clone()));
                put(&mut inner, "factor", *factor);
                put(&mut inner, "modifier", modifier.map(|m| m.as_str()));
                put(&mut inner, "missing", *missing);
                map.insert("field_value_factor".to_string(), Value::Object(inner));
            }
            ScoreFunction::Weight(weight) => {
                map.insert("weight".to_string(), Value::from(*weight));
            }
            ScoreFunction::RandomScore { seed, field } => {
                let mut inner = Map::new();
                put(&mut inner, "seed", seed.clone());
                put(&mut inner, "field", field.clone());
                map.insert("random_score".to_string(), Value::Object(inner));
            }
            ScoreFunction::ScriptScore(script) => {
                map.insert(
                    "script_score".to_string(),
                    object("script", script.to_value()),
                );
            }
            ScoreFunction::Decay {
                kind,
                field,
                params,
            } => {
                map.insert(
                    kind.as_str().to_string(),
                    object(field.clone(), params.to_value()),
                );
            }
        }
    }
}

/// A score function with its optional filter and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredFunction {
    /// The function.
    pub function: ScoreFunction,
    /// Restricts the function to documents matching this query.
    pub filter: Option<BoolQuery>,
    /// Weight multiplied into the function's score.
    pub weight: Option<f64>,
}

impl FilteredFunction {
    /// Wrap a function without filter or weight.
    pub fn new(function: ScoreFunction) -> Self {
        FilteredFunction {
            function,
            filter: None,
            weight: None,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = Map::new();
        self.function.write_into(&mut map);
        if let Some(filter) = &self.filter {
            map.insert("filter".to_string(), filter.to_value());
        }
        // An explicit weight overrides the value of a weight function.
        put(&mut map, "weight", self.weight);
        Value::Object(map)
    }
}

/// How the scores of the individual functions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionScoreMode {
    Multiply,
    Sum,
    Avg,
    First,
    Max,
    Min,
}

impl FunctionScoreMode {
    /// Wire name of the score mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionScoreMode::Multiply => "multiply",
            FunctionScoreMode::Sum => "sum",
            FunctionScoreMode::Avg => "avg",
            FunctionScoreMode::First => "first",
            FunctionScoreMode::Max => "max",
            FunctionScoreMode::Min => "min",
        }
    }
}

/// How the combined function score is merged with the query score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoostMode {
    Multiply,
    Replace,
    Sum,
    Avg,
    Max,
    Min,
}

impl BoostMode {
    /// Wire name of the boost mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoostMode::Multiply => "multiply",
            BoostMode::Replace => "replace",
            BoostMode::Sum => "sum",
            BoostMode::Avg => "avg",
            BoostMode::Max => "max",
            BoostMode::Min => "min",
        }
    }
}

/// Top-level options of a function score clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FunctionScoreOptions {
    /// Function score combination.
    pub score_mode: Option<FunctionScoreMode>,
    /// Query/function score combination.
    pub boost_mode: Option<BoostMode>,
    /// Upper limit of the function score.
    pub max_boost: Option<f64>,
    /// Documents scoring below are excluded.
    pub min_score: Option<f64>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl FunctionScoreOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score mode.
    pub fn with_score_mode(mut self, mode: FunctionScoreMode) -> Self {
        self.score_mode = Some(mode);
        self
    }

    /// Set the boost mode.
    pub fn with_boost_mode(mut self, mode: BoostMode) -> Self {
        self.boost_mode = Some(mode);
        self
    }

    /// Set the maximum function score.
    pub fn with_max_boost(mut self, max_boost: f64) -> Self {
        self.max_boost = Some(max_boost);
        self
    }

    /// Set the minimum score.
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "score_mode", self.score_mode.map(|m| m.as_str()));
        put(map, "boost_mode", self.boost_mode.map(|m| m.as_str()));
        put(map, "max_boost", self.max_boost);
        put(map, "min_score", self.min_score);
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// A function score query.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionScoreQuery {
    /// Clauses collected from the query sub-builder.
    pub query: BoolQuery,
    /// Score functions in insertion order.
    pub functions: Vec<FilteredFunction>,
    /// Top-level options.
    pub options: FunctionScoreOptions,
}

impl FunctionScoreQuery {
    /// Create a new function score query.
    pub fn new(
        query: BoolQuery,
        functions: Vec<FilteredFunction>,
        options: FunctionScoreOptions,
    ) -> Self {
        FunctionScoreQuery {
            query,
            functions,
            options,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("query".to_string(), self.query.to_value());
        map.insert(
            "functions".to_string(),
            Value::Array(self.functions.iter().map(|f| f.to_value()).collect()),
        );
        self.options.write_into(&mut map);
        object("function_score", Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decay_function_serialization() {
        let function = FilteredFunction::new(ScoreFunction::Decay {
            kind: DecayKind::Gauss,
            field: "published_at".to_string(),
            params: DecayParams::new("now", "10d").with_decay(0.5),
        });

        assert_eq!(
            function.to_value(),
            json!({"gauss": {"published_at": {"origin": "now", "scale": "10d", "decay": 0.5}}})
        );
    }

    #[test]
    fn test_field_value_factor_with_weight() {
        let mut function = FilteredFunction::new(ScoreFunction::FieldValueFactor {
            field: "likes".to_string(),
            factor: Some(1.2),
            modifier: Some(FieldValueModifier::Log1p),
            missing: None,
        });
        function.weight = Some(3.0);

        assert_eq!(
            function.to_value(),
            json!({
                "field_value_factor": {"field": "likes", "factor": 1.2, "modifier": "log1p"},
                "weight": 3.0
            })
        );
    }

    #[test]
    fn test_explicit_weight_overrides_weight_function() {
        let mut function = FilteredFunction::new(ScoreFunction::Weight(1.0));
        assert_eq!(function.to_value(), json!({"weight": 1.0}));

        function.weight = Some(3.0);
        assert_eq!(function.to_value(), json!({"weight": 3.0}));
    }

    #[test]
    fn test_function_score_query_serialization() {
        let query = FunctionScoreQuery::new(
            BoolQuery::new(),
            vec![FilteredFunction::new(ScoreFunction::Weight(2.0))],
            FunctionScoreOptions::new().with_boost_mode(BoostMode::Replace),
        );

        assert_eq!(
            query.to_value(),
            json!({
                "function_score": {
                    "query": {"bool": {}},
                    "functions": [{"weight": 2.0}],
                    "boost_mode": "replace"
                }
            })
        );
    }
}
