//! Aggregation model: the closed set of aggregation kinds and their wire format.
//!
//! Aggregations are registered on a [`QueryDocument`](crate::document::QueryDocument)
//! under a caller-chosen alias through an [`AggregationBuilder`] and compiled
//! into the top-level `aggs` object as `{alias: {kind: {..}}}`.
//! Sub-aggregations are not supported.

pub mod bucket;
pub mod builder;

use serde_json::{Map, Value};

use crate::error::{DevToolsError, Result};
use crate::query::geo::{DistanceType, GeoPoint};
use crate::query::script::Script;
use crate::util::{object, put};

pub use self::bucket::{
    BucketOrder, DateRangeBucket, HistogramOptions, IpRangeBucket, RangeBucket, TermsOptions,
};
pub use self::builder::AggregationBuilder;

/// Where a metric reads its values from: a field, a script, or both.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricSource {
    /// Source field.
    pub field: Option<String>,
    /// Value script; applied to the field values when both are set.
    pub script: Option<Script>,
}

impl MetricSource {
    /// Read values from a field.
    pub fn field<S: Into<String>>(field: S) -> Self {
        MetricSource {
            field: Some(field.into()),
            script: None,
        }
    }

    /// Compute values with a script.
    pub fn script<S: Into<Script>>(script: S) -> Self {
        MetricSource {
            field: None,
            script: Some(script.into()),
        }
    }

    /// Attach a value script to a field source.
    pub fn with_script<S: Into<Script>>(mut self, script: S) -> Self {
        self.script = Some(script.into());
        self
    }

    fn is_empty(&self) -> bool {
        let no_field = self.field.as_deref().is_none_or(|f| f.trim().is_empty());
        let no_script = self.script.as_ref().is_none_or(Script::is_blank);
        no_field && no_script
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "field", self.field.clone());
        if let Some(script) = &self.script {
            map.insert("script".to_string(), script.to_value());
        }
    }
}

impl From<&str> for MetricSource {
    fn from(field: &str) -> Self {
        MetricSource::field(field)
    }
}

impl From<String> for MetricSource {
    fn from(field: String) -> Self {
        MetricSource::field(field)
    }
}

impl From<Script> for MetricSource {
    fn from(script: Script) -> Self {
        MetricSource::script(script)
    }
}

/// A single aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    Avg(MetricSource),
    Sum(MetricSource),
    Min(MetricSource),
    Max(MetricSource),
    Stats(MetricSource),
    ValueCount(MetricSource),
    Cardinality {
        source: MetricSource,
        precision_threshold: Option<u64>,
        rehash: Option<bool>,
    },
    Percentiles {
        source: MetricSource,
        percents: Vec<f64>,
        compression: Option<f64>,
    },
    PercentileRanks {
        source: MetricSource,
        values: Vec<f64>,
        compression: Option<f64>,
    },
    Histogram {
        field: String,
        interval: f64,
        options: HistogramOptions,
    },
    Range {
        field: String,
        ranges: Vec<RangeBucket>,
        keyed: bool,
    },
    DateRange {
        field: String,
        format: String,
        ranges: Vec<DateRangeBucket>,
    },
    IpRange {
        field: String,
        ranges: Vec<IpRangeBucket>,
    },
    GeoDistance {
        field: String,
        origin: GeoPoint,
        ranges: Vec<RangeBucket>,
        unit: Option<String>,
        distance_type: Option<DistanceType>,
    },
    GeoHashGrid {
        field: String,
        precision: u8,
        size: Option<u64>,
        shard_size: Option<u64>,
    },
    GeoBounds {
        field: String,
        wrap_longitude: Option<bool>,
    },
    Missing {
        field: String,
    },
    Terms {
        source: MetricSource,
        options: TermsOptions,
    },
}

fn require_field(kind: &str, field: &str) -> Result<()> {
    if field.trim().is_empty() {
        return Err(DevToolsError::invalid_argument(format!(
            "{kind} aggregation needs a field"
        )));
    }
    Ok(())
}

fn require_compression(kind: &str, compression: Option<f64>) -> Result<()> {
    match compression {
        Some(c) if !(c.is_finite() && c > 0.0) => Err(DevToolsError::invalid_argument(format!(
            "{kind} compression must be positive, got {c}"
        ))),
        _ => Ok(()),
    }
}

fn require_buckets(kind: &str, count: usize, all_bounded: bool) -> Result<()> {
    if count == 0 {
        return Err(DevToolsError::invalid_argument(format!(
            "{kind} aggregation needs at least one range"
        )));
    }
    if !all_bounded {
        return Err(DevToolsError::invalid_argument(format!(
            "{kind} aggregation range needs a lower or upper bound"
        )));
    }
    Ok(())
}

impl Aggregation {
    /// Wire key of this aggregation kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Aggregation::Avg(_) => "avg",
            Aggregation::Sum(_) => "sum",
            Aggregation::Min(_) => "min",
            Aggregation::Max(_) => "max",
            Aggregation::Stats(_) => "stats",
            Aggregation::ValueCount(_) => "value_count",
            Aggregation::Cardinality { .. } => "cardinality",
            Aggregation::Percentiles { .. } => "percentiles",
            Aggregation::PercentileRanks { .. } => "percentile_ranks",
            Aggregation::Histogram { .. } => "histogram",
            Aggregation::Range { .. } => "range",
            Aggregation::DateRange { .. } => "date_range",
            Aggregation::IpRange { .. } => "ip_range",
            Aggregation::GeoDistance { .. } => "geo_distance",
            Aggregation::GeoHashGrid { .. } => "geohash_grid",
            Aggregation::GeoBounds { .. } => "geo_bounds",
            Aggregation::Missing { .. } => "missing",
            Aggregation::Terms { .. } => "terms",
        }
    }

    /// Check the parameters required by this kind.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind_name();
        match self {
            Aggregation::Avg(source)
            | Aggregation::Sum(source)
            | Aggregation::Min(source)
            | Aggregation::Max(source)
            | Aggregation::Stats(source)
            | Aggregation::ValueCount(source)
            | Aggregation::Cardinality { source, .. }
            | Aggregation::Terms { source, .. } => {
                if source.is_empty() {
                    return Err(DevToolsError::invalid_argument(format!(
                        "{kind} aggregation needs a field or a script"
                    )));
                }
            }
            Aggregation::Percentiles {
                source,
                compression,
                ..
            } => {
                if source.is_empty() {
                    return Err(DevToolsError::invalid_argument(format!(
                        "{kind} aggregation needs a field or a script"
                    )));
                }
                require_compression(kind, *compression)?;
            }
            Aggregation::PercentileRanks {
                source,
                values,
                compression,
            } => {
                if source.is_empty() {
                    return Err(DevToolsError::invalid_argument(format!(
                        "{kind} aggregation needs a field or a script"
                    )));
                }
                require_compression(kind, *compression)?;
                if values.is_empty() {
                    return Err(DevToolsError::invalid_argument(
                        "percentile_ranks aggregation needs at least one value",
                    ));
                }
            }
            Aggregation::Histogram {
                field, interval, ..
            } => {
                require_field(kind, field)?;
                if !(interval.is_finite() && *interval > 0.0) {
                    return Err(DevToolsError::invalid_argument(format!(
                        "histogram interval must be positive, got {interval}"
                    )));
                }
            }
            Aggregation::Range { field, ranges, .. } => {
                require_field(kind, field)?;
                require_buckets(kind, ranges.len(), ranges.iter().all(RangeBucket::is_bounded))?;
            }
            Aggregation::DateRange {
                field,
                format,
                ranges,
            } => {
                require_field(kind, field)?;
                if format.trim().is_empty() {
                    return Err(DevToolsError::invalid_argument(
                        "date_range aggregation needs a format",
                    ));
                }
                require_buckets(
                    kind,
                    ranges.len(),
                    ranges.iter().all(DateRangeBucket::is_bounded),
                )?;
            }
            Aggregation::IpRange { field, ranges } => {
                require_field(kind, field)?;
                require_buckets(
                    kind,
                    ranges.len(),
                    ranges.iter().all(IpRangeBucket::is_bounded),
                )?;
            }
            Aggregation::GeoDistance { field, ranges, .. } => {
                require_field(kind, field)?;
                require_buckets(kind, ranges.len(), ranges.iter().all(RangeBucket::is_bounded))?;
            }
            Aggregation::GeoHashGrid {
                field,
                precision,
                size,
                shard_size,
            } => {
                require_field(kind, field)?;
                if !(1..=12).contains(precision) {
                    return Err(DevToolsError::invalid_argument(format!(
                        "geohash_grid precision must be within 1..=12, got {precision}"
                    )));
                }
                if *size == Some(0) || *shard_size == Some(0) {
                    return Err(DevToolsError::invalid_argument(
                        "geohash_grid size and shard_size must be at least 1",
                    ));
                }
            }
            Aggregation::GeoBounds { field, .. } | Aggregation::Missing { field } => {
                require_field(kind, field)?;
            }
        }
        Ok(())
    }

    /// Serialize as `{kind: {..}}`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        match self {
            Aggregation::Avg(source)
            | Aggregation::Sum(source)
            | Aggregation::Min(source)
            | Aggregation::Max(source)
            | Aggregation::Stats(source)
            | Aggregation::ValueCount(source) => source.write_into(&mut map),
            Aggregation::Cardinality {
                source,
                precision_threshold,
                rehash,
            } => {
                source.write_into(&mut map);
                put(&mut map, "precision_threshold", *precision_threshold);
                put(&mut map, "rehash", *rehash);
            }
            Aggregation::Percentiles {
                source,
                percents,
                compression,
            } => {
                source.write_into(&mut map);
                if !percents.is_empty() {
                    map.insert("percents".to_string(), Value::from(percents.clone()));
                }
                put(&mut map, "compression", *compression);
            }
            Aggregation::PercentileRanks {
                source,
                values,
                compression,
            } => {
                source.write_into(&mut map);
                map.insert("values".to_string(), Value::from(values.clone()));
                put(&mut map, "compression", *compression);
            }
            Aggregation::Histogram {
                field,
                interval,
                options,
            } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                map.insert("interval".to_string(), Value::from(*interval));
                options.write_into(&mut map);
            }
            Aggregation::Range {
                field,
                ranges,
                keyed,
            } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                map.insert("ranges".to_string(), range_list(ranges, RangeBucket::to_value));
                if *keyed {
                    map.insert("keyed".to_string(), Value::Bool(true));
                }
            }
            Aggregation::DateRange {
                field,
                format,
                ranges,
            } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                map.insert("format".to_string(), Value::from(format.clone()));
                map.insert(
                    "ranges".to_string(),
                    range_list(ranges, DateRangeBucket::to_value),
                );
            }
            Aggregation::IpRange { field, ranges } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                map.insert(
                    "ranges".to_string(),
                    range_list(ranges, IpRangeBucket::to_value),
                );
            }
            Aggregation::GeoDistance {
                field,
                origin,
                ranges,
                unit,
                distance_type,
            } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                map.insert("origin".to_string(), origin.to_value());
                put(&mut map, "unit", unit.clone());
                put(&mut map, "distance_type", distance_type.map(|d| d.as_str()));
                map.insert("ranges".to_string(), range_list(ranges, RangeBucket::to_value));
            }
            Aggregation::GeoHashGrid {
                field,
                precision,
                size,
                shard_size,
            } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                map.insert("precision".to_string(), Value::from(*precision));
                put(&mut map, "size", *size);
                put(&mut map, "shard_size", *shard_size);
            }
            Aggregation::GeoBounds {
                field,
                wrap_longitude,
            } => {
                map.insert("field".to_string(), Value::from(field.clone()));
                put(&mut map, "wrap_longitude", *wrap_longitude);
            }
            Aggregation::Missing { field } => {
                map.insert("field".to_string(), Value::from(field.clone()));
            }
            Aggregation::Terms { source, options } => {
                source.write_into(&mut map);
                options.write_into(&mut map);
            }
        }
        object(self.kind_name(), Value::Object(map))
    }
}

fn range_list<T>(ranges: &[T], to_value: fn(&T) -> Value) -> Value {
    Value::Array(ranges.iter().map(to_value).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metric_serialization() {
        let avg = Aggregation::Avg("price".into());
        assert_eq!(avg.to_value(), json!({"avg": {"field": "price"}}));

        let scripted = Aggregation::Sum(
            MetricSource::field("price").with_script(Script::new("_value * 2")),
        );
        assert_eq!(
            scripted.to_value(),
            json!({"sum": {"field": "price", "script": {"source": "_value * 2"}}})
        );
    }

    #[test]
    fn test_metric_needs_source() {
        let avg = Aggregation::Avg(MetricSource::default());
        assert!(matches!(
            avg.validate(),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(Aggregation::Max(Script::new("doc['a'].value").into()).validate().is_ok());
    }

    #[test]
    fn test_range_validation() {
        let empty = Aggregation::Range {
            field: "price".to_string(),
            ranges: vec![],
            keyed: false,
        };
        assert!(empty.validate().is_err());

        let unbounded = Aggregation::Range {
            field: "price".to_string(),
            ranges: vec![RangeBucket::default()],
            keyed: false,
        };
        assert!(unbounded.validate().is_err());

        let ok = Aggregation::Range {
            field: "price".to_string(),
            ranges: vec![RangeBucket::below(50.0), RangeBucket::above(50.0)],
            keyed: true,
        };
        assert!(ok.validate().is_ok());
        assert_eq!(
            ok.to_value(),
            json!({"range": {
                "field": "price",
                "ranges": [{"to": 50.0}, {"from": 50.0}],
                "keyed": true
            }})
        );
    }

    #[test]
    fn test_geohash_grid_precision() {
        let grid = |precision| Aggregation::GeoHashGrid {
            field: "location".to_string(),
            precision,
            size: None,
            shard_size: None,
        };
        assert!(grid(0).validate().is_err());
        assert!(grid(13).validate().is_err());
        assert!(grid(5).validate().is_ok());
        assert_eq!(
            grid(5).to_value(),
            json!({"geohash_grid": {"field": "location", "precision": 5}})
        );
    }

    #[test]
    fn test_histogram_interval() {
        let histogram = Aggregation::Histogram {
            field: "price".to_string(),
            interval: 0.0,
            options: HistogramOptions::new(),
        };
        assert!(histogram.validate().is_err());
    }
}
