//! Typed per-kind options for leaf clauses.
//!
//! Every options struct carries the engine options documented for its clause
//! kind plus an `extra` map for anything engine specific. Extra keys never
//! override a typed option of the same name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::{Extra, merge_extra, put};

/// Boolean operator used to combine analyzed terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// All terms must match.
    And,
    /// Any term may match.
    Or,
}

impl Operator {
    /// Wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

/// Allowed edit distance for fuzzy matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuzziness {
    /// Let the engine derive the distance from the term length.
    Auto,
    /// Fixed number of edits.
    Edits(u8),
}

impl From<Fuzziness> for Value {
    fn from(fuzziness: Fuzziness) -> Self {
        match fuzziness {
            Fuzziness::Auto => Value::from("AUTO"),
            Fuzziness::Edits(edits) => Value::from(edits),
        }
    }
}

/// How a multi_match query combines per-field scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiMatchType {
    /// Best matching field.
    BestFields,
    /// Most matching fields.
    MostFields,
    /// Cross-field matching.
    CrossFields,
    /// Phrase on each field.
    Phrase,
    /// Phrase prefix on each field.
    PhrasePrefix,
    /// Boolean prefix on each field.
    BoolPrefix,
}

impl MultiMatchType {
    /// Wire name of the type.
    pub fn as_str(&self) -> &'static str {
        match self {
            MultiMatchType::BestFields => "best_fields",
            MultiMatchType::MostFields => "most_fields",
            MultiMatchType::CrossFields => "cross_fields",
            MultiMatchType::Phrase => "phrase",
            MultiMatchType::PhrasePrefix => "phrase_prefix",
            MultiMatchType::BoolPrefix => "bool_prefix",
        }
    }
}

/// Options shared by clauses that only accept a boost.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoostOptions {
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl BoostOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// Options for term, terms, prefix and wildcard clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermOptions {
    /// The boost factor.
    pub boost: Option<f64>,
    /// Match regardless of ASCII case.
    pub case_insensitive: Option<bool>,
    /// Engine-specific extras (e.g. `rewrite`).
    pub extra: Extra,
}

impl TermOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Enable case-insensitive matching.
    pub fn with_case_insensitive(mut self, case_insensitive: bool) -> Self {
        self.case_insensitive = Some(case_insensitive);
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// Check whether no option is set.
    pub fn is_empty(&self) -> bool {
        self.boost.is_none() && self.case_insensitive.is_none() && self.extra.is_empty()
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "boost", self.boost);
        put(map, "case_insensitive", self.case_insensitive);
        merge_extra(map, &self.extra);
    }
}

/// Options for match clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOptions {
    /// Operator combining analyzed terms.
    pub operator: Option<Operator>,
    /// Analyzer applied to the query text.
    pub analyzer: Option<String>,
    /// Allowed edit distance.
    pub fuzziness: Option<Fuzziness>,
    /// Minimum number (or percentage) of terms that must match.
    pub minimum_should_match: Option<String>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl MatchOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Set the analyzer.
    pub fn with_analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    /// Set the fuzziness.
    pub fn with_fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    /// Set the minimum should match value.
    pub fn with_minimum_should_match<S: Into<String>>(mut self, minimum: S) -> Self {
        self.minimum_should_match = Some(minimum.into());
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "operator", self.operator.map(|op| op.as_str()));
        put(map, "analyzer", self.analyzer.clone());
        put(map, "fuzziness", self.fuzziness);
        put(map, "minimum_should_match", self.minimum_should_match.clone());
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// Options for multi_match clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiMatchOptions {
    /// Score combination type.
    pub match_type: Option<MultiMatchType>,
    /// Operator combining analyzed terms.
    pub operator: Option<Operator>,
    /// Analyzer applied to the query text.
    pub analyzer: Option<String>,
    /// Weight of non-best fields.
    pub tie_breaker: Option<f64>,
    /// Allowed edit distance.
    pub fuzziness: Option<Fuzziness>,
    /// Minimum number (or percentage) of terms that must match.
    pub minimum_should_match: Option<String>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl MultiMatchOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the score combination type.
    pub fn with_type(mut self, match_type: MultiMatchType) -> Self {
        self.match_type = Some(match_type);
        self
    }

    /// Set the operator.
    pub fn with_operator(mut self, operator: Operator) -> Self {
        self.operator = Some(operator);
        self
    }

    /// Set the tie breaker.
    pub fn with_tie_breaker(mut self, tie_breaker: f64) -> Self {
        self.tie_breaker = Some(tie_breaker);
        self
    }

    /// Set the fuzziness.
    pub fn with_fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "type", self.match_type.map(|t| t.as_str()));
        put(map, "operator", self.operator.map(|op| op.as_str()));
        put(map, "analyzer", self.analyzer.clone());
        put(map, "tie_breaker", self.tie_breaker);
        put(map, "fuzziness", self.fuzziness);
        put(map, "minimum_should_match", self.minimum_should_match.clone());
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// Options for fuzzy clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FuzzyOptions {
    /// Allowed edit distance.
    pub fuzziness: Option<Fuzziness>,
    /// Number of leading characters left unchanged.
    pub prefix_length: Option<u32>,
    /// Maximum number of variations considered.
    pub max_expansions: Option<u32>,
    /// Count swapped adjacent characters as one edit.
    pub transpositions: Option<bool>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl FuzzyOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fuzziness.
    pub fn with_fuzziness(mut self, fuzziness: Fuzziness) -> Self {
        self.fuzziness = Some(fuzziness);
        self
    }

    /// Set the prefix length.
    pub fn with_prefix_length(mut self, prefix_length: u32) -> Self {
        self.prefix_length = Some(prefix_length);
        self
    }

    /// Set the maximum number of expansions.
    pub fn with_max_expansions(mut self, max_expansions: u32) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Enable or disable transpositions.
    pub fn with_transpositions(mut self, transpositions: bool) -> Self {
        self.transpositions = Some(transpositions);
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "fuzziness", self.fuzziness);
        put(map, "prefix_length", self.prefix_length);
        put(map, "max_expansions", self.max_expansions);
        put(map, "transpositions", self.transpositions);
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// Options for regexp clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegexpOptions {
    /// Enabled optional operators, e.g. `ALL` or `INTERSECTION|COMPLEMENT`.
    pub flags: Option<String>,
    /// Match regardless of ASCII case.
    pub case_insensitive: Option<bool>,
    /// Limit on automaton states.
    pub max_determinized_states: Option<u32>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl RegexpOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operator flags.
    pub fn with_flags<S: Into<String>>(mut self, flags: S) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Set the automaton state limit.
    pub fn with_max_determinized_states(mut self, states: u32) -> Self {
        self.max_determinized_states = Some(states);
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "flags", self.flags.clone());
        put(map, "case_insensitive", self.case_insensitive);
        put(map, "max_determinized_states", self.max_determinized_states);
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// Options for query_string and simple_query_string clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryStringOptions {
    /// Field searched when the query names none.
    pub default_field: Option<String>,
    /// Fields searched by the query.
    pub fields: Vec<String>,
    /// Operator used between terms without an explicit one.
    pub default_operator: Option<Operator>,
    /// Analyzer applied to the query text.
    pub analyzer: Option<String>,
    /// Analyze wildcard terms.
    pub analyze_wildcard: Option<bool>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl QueryStringOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default field.
    pub fn with_default_field<S: Into<String>>(mut self, field: S) -> Self {
        self.default_field = Some(field.into());
        self
    }

    /// Set the searched fields.
    pub fn with_fields<S: Into<String>>(mut self, fields: Vec<S>) -> Self {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default operator.
    pub fn with_default_operator(mut self, operator: Operator) -> Self {
        self.default_operator = Some(operator);
        self
    }

    /// Set the analyzer.
    pub fn with_analyzer<S: Into<String>>(mut self, analyzer: S) -> Self {
        self.analyzer = Some(analyzer.into());
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "default_field", self.default_field.clone());
        if !self.fields.is_empty() {
            map.insert("fields".to_string(), Value::from(self.fields.clone()));
        }
        put(
            map,
            "default_operator",
            self.default_operator.map(|op| op.as_str()),
        );
        put(map, "analyzer", self.analyzer.clone());
        put(map, "analyze_wildcard", self.analyze_wildcard);
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}

/// Options for common terms clauses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommonTermsOptions {
    /// Frequency above which a term counts as common.
    pub cutoff_frequency: Option<f64>,
    /// Operator for low frequency terms.
    pub low_freq_operator: Option<Operator>,
    /// Operator for high frequency terms.
    pub high_freq_operator: Option<Operator>,
    /// Minimum number (or percentage) of low frequency terms that must match.
    pub minimum_should_match: Option<String>,
    /// Analyzer applied to the query text.
    pub analyzer: Option<String>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl CommonTermsOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cutoff frequency.
    pub fn with_cutoff_frequency(mut self, cutoff: f64) -> Self {
        self.cutoff_frequency = Some(cutoff);
        self
    }

    /// Set the low frequency operator.
    pub fn with_low_freq_operator(mut self, operator: Operator) -> Self {
        self.low_freq_operator = Some(operator);
        self
    }

    /// Set the high frequency operator.
    pub fn with_high_freq_operator(mut self, operator: Operator) -> Self {
        self.high_freq_operator = Some(operator);
        self
    }

    /// Set the boost factor.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = Some(boost);
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "cutoff_frequency", self.cutoff_frequency);
        put(
            map,
            "low_freq_operator",
            self.low_freq_operator.map(|op| op.as_str()),
        );
        put(
            map,
            "high_freq_operator",
            self.high_freq_operator.map(|op| op.as_str()),
        );
        put(map, "minimum_should_match", self.minimum_should_match.clone());
        put(map, "analyzer", self.analyzer.clone());
        put(map, "boost", self.boost);
        merge_extra(map, &self.extra);
    }
}
