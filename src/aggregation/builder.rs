//! Fluent registration of aggregations on a query document.

use crate::aggregation::bucket::{
    DateRangeBucket, HistogramOptions, IpRangeBucket, RangeBucket, TermsOptions,
};
use crate::aggregation::{Aggregation, MetricSource};
use crate::document::QueryDocument;
use crate::error::{DevToolsError, Result};
use crate::query::geo::GeoPoint;

/// Registers aggregations on the document it is bound to.
///
/// Each method validates its input, then stores the aggregation under
/// `alias`. Registering an alias twice replaces the earlier aggregation.
///
/// # Examples
///
/// ```
/// use elastic_dev_tools::aggregation::{AggregationBuilder, RangeBucket};
/// use elastic_dev_tools::document::QueryDocument;
///
/// let mut document = QueryDocument::new();
/// let mut aggs = AggregationBuilder::new(&mut document);
/// aggs.avg("avg_price", "price").unwrap();
/// aggs.range("price_ranges", "price", vec![RangeBucket::below(50.0)], false)
///     .unwrap();
///
/// assert_eq!(document.aggregations().count(), 2);
/// ```
pub struct AggregationBuilder<'d> {
    document: &'d mut QueryDocument,
}

impl<'d> AggregationBuilder<'d> {
    /// Bind a builder to a document.
    pub fn new(document: &'d mut QueryDocument) -> Self {
        AggregationBuilder { document }
    }

    /// Validate and register an aggregation under `alias`.
    pub fn add<S: Into<String>>(&mut self, alias: S, aggregation: Aggregation) -> Result<&mut Self> {
        let alias = alias.into();
        if alias.trim().is_empty() {
            return Err(DevToolsError::invalid_argument(
                "aggregation alias must not be empty",
            ));
        }
        aggregation.validate().map_err(|e| match e {
            DevToolsError::InvalidArgument(msg) => {
                DevToolsError::invalid_argument(format!("aggregation `{alias}`: {msg}"))
            }
            other => other,
        })?;

        self.document.add_aggregation(alias, aggregation);
        Ok(self)
    }

    /// Average of the values.
    pub fn avg<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
    ) -> Result<&mut Self> {
        self.add(alias, Aggregation::Avg(source.into()))
    }

    /// Sum of the values.
    pub fn sum<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
    ) -> Result<&mut Self> {
        self.add(alias, Aggregation::Sum(source.into()))
    }

    /// Smallest value.
    pub fn min<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
    ) -> Result<&mut Self> {
        self.add(alias, Aggregation::Min(source.into()))
    }

    /// Largest value.
    pub fn max<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
    ) -> Result<&mut Self> {
        self.add(alias, Aggregation::Max(source.into()))
    }

    /// Count, min, max, avg and sum in one aggregation.
    pub fn stats<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
    ) -> Result<&mut Self> {
        self.add(alias, Aggregation::Stats(source.into()))
    }

    /// Number of values.
    pub fn value_count<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
    ) -> Result<&mut Self> {
        self.add(alias, Aggregation::ValueCount(source.into()))
    }

    /// Approximate count of distinct values.
    pub fn cardinality<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
        precision_threshold: Option<u64>,
    ) -> Result<&mut Self> {
        self.cardinality_with(alias, source, precision_threshold, None)
    }

    /// Approximate count of distinct values, choosing whether hashes are rehashed.
    pub fn cardinality_with<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
        precision_threshold: Option<u64>,
        rehash: Option<bool>,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::Cardinality {
                source: source.into(),
                precision_threshold,
                rehash,
            },
        )
    }

    /// Percentiles of the values; an empty `percents` uses the engine defaults.
    pub fn percentiles<S, M, I>(&mut self, alias: S, source: M, percents: I) -> Result<&mut Self>
    where
        S: Into<String>,
        M: Into<MetricSource>,
        I: IntoIterator<Item = f64>,
    {
        self.percentiles_with(alias, source, percents, None)
    }

    /// Percentiles with an explicit TDigest compression.
    pub fn percentiles_with<S, M, I>(
        &mut self,
        alias: S,
        source: M,
        percents: I,
        compression: Option<f64>,
    ) -> Result<&mut Self>
    where
        S: Into<String>,
        M: Into<MetricSource>,
        I: IntoIterator<Item = f64>,
    {
        self.add(
            alias,
            Aggregation::Percentiles {
                source: source.into(),
                percents: percents.into_iter().collect(),
                compression,
            },
        )
    }

    /// Percentile rank of each of `values`.
    ///
    /// A script goes in through the [`MetricSource`].
    pub fn percentile_ranks<S, M, I>(&mut self, alias: S, source: M, values: I) -> Result<&mut Self>
    where
        S: Into<String>,
        M: Into<MetricSource>,
        I: IntoIterator<Item = f64>,
    {
        self.percentile_ranks_with(alias, source, values, None)
    }

    pub fn percentile_ranks_with<S, M, I>(
        &mut self,
        alias: S,
        source: M,
        values: I,
        compression: Option<f64>,
    ) -> Result<&mut Self>
    where
        S: Into<String>,
        M: Into<MetricSource>,
        I: IntoIterator<Item = f64>,
    {
        self.add(
            alias,
            Aggregation::PercentileRanks {
                source: source.into(),
                values: values.into_iter().collect(),
                compression,
            },
        )
    }

    /// Fixed-interval numeric buckets.
    pub fn histogram<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        interval: f64,
        options: HistogramOptions,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::Histogram {
                field: field.into(),
                interval,
                options,
            },
        )
    }

    /// Caller-defined numeric buckets.
    pub fn range<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        ranges: Vec<RangeBucket>,
        keyed: bool,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::Range {
                field: field.into(),
                ranges,
                keyed,
            },
        )
    }

    /// Caller-defined date buckets.
    pub fn date_range<S: Into<String>, F: Into<String>, T: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        format: T,
        ranges: Vec<DateRangeBucket>,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::DateRange {
                field: field.into(),
                format: format.into(),
                ranges,
            },
        )
    }

    /// Caller-defined IPv4 buckets.
    pub fn ip_range<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        ranges: Vec<IpRangeBucket>,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::IpRange {
                field: field.into(),
                ranges,
            },
        )
    }

    /// Rings of distance around `origin`.
    pub fn geo_distance<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        origin: GeoPoint,
        ranges: Vec<RangeBucket>,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::GeoDistance {
                field: field.into(),
                origin,
                ranges,
                unit: None,
                distance_type: None,
            },
        )
    }

    /// Geohash cells of the given precision (1..=12).
    pub fn geohash_grid<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        precision: u8,
    ) -> Result<&mut Self> {
        self.geohash_grid_with(alias, field, precision, None, None)
    }

    /// Geohash cells, keeping at most `size` buckets (`shard_size` per shard).
    pub fn geohash_grid_with<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        precision: u8,
        size: Option<u64>,
        shard_size: Option<u64>,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::GeoHashGrid {
                field: field.into(),
                precision,
                size,
                shard_size,
            },
        )
    }

    /// Bounding box of all geo points.
    pub fn geo_bounds<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
        wrap_longitude: bool,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::GeoBounds {
                field: field.into(),
                wrap_longitude: Some(wrap_longitude),
            },
        )
    }

    /// Documents lacking a value for `field`.
    pub fn missing<S: Into<String>, F: Into<String>>(
        &mut self,
        alias: S,
        field: F,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::Missing {
                field: field.into(),
            },
        )
    }

    /// One bucket per distinct value.
    pub fn terms<S: Into<String>, M: Into<MetricSource>>(
        &mut self,
        alias: S,
        source: M,
        options: TermsOptions,
    ) -> Result<&mut Self> {
        self.add(
            alias,
            Aggregation::Terms {
                source: source.into(),
                options,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::script::Script;
    use serde_json::json;

    #[test]
    fn test_last_write_wins() -> Result<()> {
        let mut document = QueryDocument::new();
        {
            let mut aggs = AggregationBuilder::new(&mut document);
            aggs.avg("price_stat", "price")?;
            aggs.missing("no_price", "price")?;
            aggs.max("price_stat", "price")?;
        }

        let compiled = document.compile();
        assert_eq!(
            compiled["aggs"],
            json!({
                "price_stat": {"max": {"field": "price"}},
                "no_price": {"missing": {"field": "price"}}
            })
        );
        Ok(())
    }

    #[test]
    fn test_empty_alias_rejected() {
        let mut document = QueryDocument::new();
        let mut aggs = AggregationBuilder::new(&mut document);

        assert!(matches!(
            aggs.avg("", "price"),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(matches!(
            aggs.percentile_ranks("ranks", "load_time", Vec::new()),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert_eq!(document.aggregations().count(), 0);
    }

    #[test]
    fn test_tuning_parameters() -> Result<()> {
        let mut document = QueryDocument::new();
        {
            let mut aggs = AggregationBuilder::new(&mut document);
            aggs.cardinality_with("authors", "author_hash", Some(100), Some(false))?;
            aggs.percentiles_with("load", "load_time", [99.0], Some(200.0))?;
            aggs.percentile_ranks_with(
                "load_ranks",
                MetricSource::script(Script::new("doc['load_time'].value / 1000")),
                [1.5],
                Some(50.0),
            )?;
            aggs.geohash_grid_with("cells", "location", 5, Some(100), Some(400))?;
        }

        assert_eq!(
            document.compile()["aggs"],
            json!({
                "authors": {"cardinality": {
                    "field": "author_hash", "precision_threshold": 100, "rehash": false
                }},
                "load": {"percentiles": {
                    "field": "load_time", "percents": [99.0], "compression": 200.0
                }},
                "load_ranks": {"percentile_ranks": {
                    "script": {"source": "doc['load_time'].value / 1000"},
                    "values": [1.5],
                    "compression": 50.0
                }},
                "cells": {"geohash_grid": {
                    "field": "location", "precision": 5, "size": 100, "shard_size": 400
                }}
            })
        );
        Ok(())
    }

    #[test]
    fn test_tuning_parameters_validated() {
        let mut document = QueryDocument::new();
        let mut aggs = AggregationBuilder::new(&mut document);

        assert!(aggs.percentiles_with("load", "load_time", [99.0], Some(0.0)).is_err());
        assert!(aggs.percentile_ranks_with("r", "load_time", [1.0], Some(f64::NAN)).is_err());
        assert!(aggs.geohash_grid_with("cells", "location", 5, Some(0), None).is_err());
        assert_eq!(document.aggregations().count(), 0);
    }

    #[test]
    fn test_date_range_needs_format() {
        let mut document = QueryDocument::new();
        let mut aggs = AggregationBuilder::new(&mut document);

        let result = aggs.date_range(
            "published",
            "published_at",
            "",
            vec![DateRangeBucket::before("now-10M/M")],
        );
        assert!(result.is_err());

        aggs.date_range(
            "published",
            "published_at",
            "MM-yyyy",
            vec![DateRangeBucket::before("now-10M/M")],
        )
        .unwrap();
        assert_eq!(
            document.compile()["aggs"]["published"],
            json!({"date_range": {
                "field": "published_at",
                "format": "MM-yyyy",
                "ranges": [{"to": "now-10M/M"}]
            }})
        );
    }
}
