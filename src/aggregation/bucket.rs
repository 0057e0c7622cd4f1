//! Bucket boundaries and bucket-aggregation options.

use serde_json::{Map, Value};

use crate::query::sort::SortOrder;
use crate::util::{Extra, merge_extra, object, put};

/// A numeric range bucket (range and geo_distance aggregations).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeBucket {
    /// Bucket key, generated by the engine when unset.
    pub key: Option<String>,
    /// Inclusive lower bound.
    pub from: Option<f64>,
    /// Exclusive upper bound.
    pub to: Option<f64>,
}

impl RangeBucket {
    /// Bucket for values in `[from, to)`.
    pub fn between(from: f64, to: f64) -> Self {
        RangeBucket {
            key: None,
            from: Some(from),
            to: Some(to),
        }
    }

    /// Bucket for values `>= from`.
    pub fn above(from: f64) -> Self {
        RangeBucket {
            from: Some(from),
            ..Default::default()
        }
    }

    /// Bucket for values `< to`.
    pub fn below(to: f64) -> Self {
        RangeBucket {
            to: Some(to),
            ..Default::default()
        }
    }

    /// Set the bucket key.
    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = Map::new();
        put(&mut map, "key", self.key.clone());
        put(&mut map, "from", self.from);
        put(&mut map, "to", self.to);
        Value::Object(map)
    }
}

/// A date range bucket; bounds accept dates or date math (`now-10M/M`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DateRangeBucket {
    /// Bucket key, generated by the engine when unset.
    pub key: Option<String>,
    /// Inclusive lower bound.
    pub from: Option<String>,
    /// Exclusive upper bound.
    pub to: Option<String>,
}

impl DateRangeBucket {
    /// Bucket for dates in `[from, to)`.
    pub fn between<F: Into<String>, T: Into<String>>(from: F, to: T) -> Self {
        DateRangeBucket {
            key: None,
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Bucket for dates `>= from`.
    pub fn after<S: Into<String>>(from: S) -> Self {
        DateRangeBucket {
            from: Some(from.into()),
            ..Default::default()
        }
    }

    /// Bucket for dates `< to`.
    pub fn before<S: Into<String>>(to: S) -> Self {
        DateRangeBucket {
            to: Some(to.into()),
            ..Default::default()
        }
    }

    /// Set the bucket key.
    pub fn with_key<S: Into<String>>(mut self, key: S) -> Self {
        self.key = Some(key.into());
        self
    }

    pub(crate) fn is_bounded(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub(crate) fn to_value(&self) -> Value {
        let mut map = Map::new();
        put(&mut map, "key", self.key.clone());
        put(&mut map, "from", self.from.clone());
        put(&mut map, "to", self.to.clone());
        Value::Object(map)
    }
}

/// An IPv4 range bucket.
#[derive(Debug, Clone, PartialEq)]
pub enum IpRangeBucket {
    /// Addresses in `[from, to)`; either side may be open.
    Range {
        from: Option<String>,
        to: Option<String>,
    },
    /// Addresses in a CIDR block, e.g. `10.0.0.0/25`.
    Mask(String),
}

impl IpRangeBucket {
    /// Bucket for addresses in `[from, to)`.
    pub fn between<F: Into<String>, T: Into<String>>(from: F, to: T) -> Self {
        IpRangeBucket::Range {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Bucket for a CIDR block.
    pub fn mask<S: Into<String>>(mask: S) -> Self {
        IpRangeBucket::Mask(mask.into())
    }

    pub(crate) fn is_bounded(&self) -> bool {
        match self {
            IpRangeBucket::Range { from, to } => from.is_some() || to.is_some(),
            IpRangeBucket::Mask(mask) => !mask.is_empty(),
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        match self {
            IpRangeBucket::Range { from, to } => {
                let mut map = Map::new();
                put(&mut map, "from", from.clone());
                put(&mut map, "to", to.clone());
                Value::Object(map)
            }
            IpRangeBucket::Mask(mask) => object("mask", Value::from(mask.clone())),
        }
    }
}

/// Ordering of buckets, e.g. `{"_count": "desc"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketOrder {
    /// Ordering key: `_key`, `_count` or a metric path.
    pub key: String,
    /// Direction.
    pub direction: SortOrder,
}

impl BucketOrder {
    /// Order by document count.
    pub fn count(direction: SortOrder) -> Self {
        BucketOrder {
            key: "_count".to_string(),
            direction,
        }
    }

    /// Order by bucket key.
    pub fn key(direction: SortOrder) -> Self {
        BucketOrder {
            key: "_key".to_string(),
            direction,
        }
    }

    pub(crate) fn to_value(&self) -> Value {
        object(self.key.clone(), Value::from(self.direction.as_str()))
    }
}

/// Options of a histogram aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistogramOptions {
    /// Buckets with fewer documents are dropped.
    pub min_doc_count: Option<u64>,
    /// Bucket ordering.
    pub order: Option<BucketOrder>,
    /// Forces buckets to span at least `[min, max]`.
    pub extended_bounds: Option<(f64, f64)>,
    /// Return buckets as an object keyed by bucket key.
    pub keyed: Option<bool>,
}

impl HistogramOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum document count.
    pub fn with_min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    /// Set the bucket ordering.
    pub fn with_order(mut self, order: BucketOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the extended bounds.
    pub fn with_extended_bounds(mut self, min: f64, max: f64) -> Self {
        self.extended_bounds = Some((min, max));
        self
    }

    /// Return keyed buckets.
    pub fn with_keyed(mut self, keyed: bool) -> Self {
        self.keyed = Some(keyed);
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "min_doc_count", self.min_doc_count);
        if let Some(order) = &self.order {
            map.insert("order".to_string(), order.to_value());
        }
        if let Some((min, max)) = self.extended_bounds {
            let mut bounds = Map::new();
            bounds.insert("min".to_string(), Value::from(min));
            bounds.insert("max".to_string(), Value::from(max));
            map.insert("extended_bounds".to_string(), Value::Object(bounds));
        }
        put(map, "keyed", self.keyed);
    }
}

/// Options of a terms aggregation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermsOptions {
    /// Number of buckets returned.
    pub size: Option<u64>,
    /// Buckets with fewer documents are dropped.
    pub min_doc_count: Option<u64>,
    /// Bucket ordering.
    pub order: Option<BucketOrder>,
    /// Only terms matching this pattern or list are bucketed.
    pub include: Option<Value>,
    /// Terms matching this pattern or list are skipped.
    pub exclude: Option<Value>,
    /// Value assumed for documents missing the field.
    pub missing: Option<Value>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl TermsOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of buckets.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the minimum document count.
    pub fn with_min_doc_count(mut self, count: u64) -> Self {
        self.min_doc_count = Some(count);
        self
    }

    /// Set the bucket ordering.
    pub fn with_order(mut self, order: BucketOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the include filter.
    pub fn with_include<V: Into<Value>>(mut self, include: V) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Set the exclude filter.
    pub fn with_exclude<V: Into<Value>>(mut self, exclude: V) -> Self {
        self.exclude = Some(exclude.into());
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub(crate) fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "size", self.size);
        put(map, "min_doc_count", self.min_doc_count);
        if let Some(order) = &self.order {
            map.insert("order".to_string(), order.to_value());
        }
        put(map, "include", self.include.clone());
        put(map, "exclude", self.exclude.clone());
        put(map, "missing", self.missing.clone());
        merge_extra(map, &self.extra);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_bucket_serialization() {
        assert_eq!(
            RangeBucket::between(50.0, 100.0).with_key("mid").to_value(),
            json!({"key": "mid", "from": 50.0, "to": 100.0})
        );
        assert_eq!(RangeBucket::below(50.0).to_value(), json!({"to": 50.0}));
        assert!(!RangeBucket::default().is_bounded());
    }

    #[test]
    fn test_ip_range_bucket_serialization() {
        assert_eq!(
            IpRangeBucket::mask("10.0.0.0/25").to_value(),
            json!({"mask": "10.0.0.0/25"})
        );
        assert_eq!(
            IpRangeBucket::between("10.0.0.5", "10.0.0.10").to_value(),
            json!({"from": "10.0.0.5", "to": "10.0.0.10"})
        );
    }

    #[test]
    fn test_histogram_options_serialization() {
        let options = HistogramOptions::new()
            .with_min_doc_count(1)
            .with_order(BucketOrder::key(SortOrder::Desc))
            .with_extended_bounds(0.0, 500.0);

        let mut map = Map::new();
        options.write_into(&mut map);

        assert_eq!(
            Value::Object(map),
            json!({
                "min_doc_count": 1,
                "order": {"_key": "desc"},
                "extended_bounds": {"min": 0.0, "max": 500.0}
            })
        );
    }
}
