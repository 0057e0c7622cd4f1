//! Range bounds for range clauses.

use serde_json::{Map, Value};

use crate::util::{Extra, merge_extra, put};

/// Bound type for range clauses.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Bound<T> {
    /// Inclusive bound (`gte` / `lte`).
    Included(T),
    /// Exclusive bound (`gt` / `lt`).
    Excluded(T),
    /// Unbounded (no limit).
    #[default]
    Unbounded,
}

impl<T> Bound<T> {
    /// Check whether this bound limits the range.
    pub fn is_bounded(&self) -> bool {
        !matches!(self, Bound::Unbounded)
    }
}

/// Bounds and options of a range clause.
///
/// Values are kept as JSON so numbers, dates and date-math expressions
/// (`"now-1d/d"`) are all accepted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeBounds {
    /// Lower bound of the range.
    pub lower: Bound<Value>,
    /// Upper bound of the range.
    pub upper: Bound<Value>,
    /// Date format used to parse the bounds.
    pub format: Option<String>,
    /// Time zone applied to date bounds.
    pub time_zone: Option<String>,
    /// The boost factor.
    pub boost: Option<f64>,
    /// Engine-specific extras (e.g. `relation`).
    pub extra: Extra,
}

impl RangeBounds {
    /// Create an unbounded range.
    pub fn new() -> Self {
        Self::default()
    }

    /// Values greater than or equal to `value`.
    pub fn gte<V: Into<Value>>(mut self, value: V) -> Self {
        self.lower = Bound::Included(value.into());
        self
    }

    /// Values strictly greater than `value`.
    pub fn gt<V: Into<Value>>(mut self, value: V) -> Self {
        self.lower = Bound::Excluded(value.into());
        self
    }

    /// Values less than or equal to `value`.
    pub fn lte<V: Into<Value>>(mut self, value: V) -> Self {
        self.upper = Bound::Included(value.into());
        self
    }

    /// Values strictly less than `value`.
    pub fn lt<V: Into<Value>>(mut self, value: V) -> Self {
        self.upper = Bound::Excluded(value.into());
        self
    }

    /// Set the date format.
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the time zone.
    pub fn with_time_zone<S: Into<String>>(mut self, time_zone: S) -> Self {
        self.time_zone = Some(time_zone.into());
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

    /// Check whether at least one side is bounded.
    pub fn has_bound(&self) -> bool {
        self.lower.is_bounded() || self.upper.is_bounded()
    }

    pub(crate) fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        match &self.lower {
            Bound::Included(v) => put(&mut map, "gte", Some(v.clone())),
            Bound::Excluded(v) => put(&mut map, "gt", Some(v.clone())),
            Bound::Unbounded => {}
        }
        match &self.upper {
            Bound::Included(v) => put(&mut map, "lte", Some(v.clone())),
            Bound::Excluded(v) => put(&mut map, "lt", Some(v.clone())),
            Bound::Unbounded => {}
        }
        put(&mut map, "format", self.format.clone());
        put(&mut map, "time_zone", self.time_zone.clone());
        put(&mut map, "boost", self.boost);
        merge_extra(&mut map, &self.extra);
        map
    }
}
