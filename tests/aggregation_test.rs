//! Integration tests for aggregations registered through SearchBuilder

use elastic_dev_tools::prelude::*;
use serde_json::json;

#[test]
fn test_aggregations_compile_under_aggs() -> Result<()> {
    let connection = StaticConnection::default();
    let mut search = SearchBuilder::new(&connection);

    search.term("category", "lighting")?;
    search.aggregate(|aggs| {
        aggs.stats("price_stats", "price")?;
        aggs.terms(
            "brands",
            "brand",
            TermsOptions::new()
                .with_size(5)
                .with_order(BucketOrder::count(SortOrder::Desc)),
        )?;
        aggs.histogram(
            "price_histogram",
            "price",
            50.0,
            HistogramOptions::new().with_min_doc_count(1),
        )?;
        aggs.geo_distance(
            "rings",
            "location",
            GeoPoint::new(52.376, 4.894)?,
            vec![RangeBucket::below(100.0), RangeBucket::between(100.0, 300.0)],
        )?;
        aggs.ip_range(
            "networks",
            "ip",
            vec![IpRangeBucket::mask("10.0.0.0/25")],
        )?;
        Ok(())
    })?;

    let compiled = search.compile();
    let keys: Vec<&String> = compiled.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["query", "aggs"]);

    assert_eq!(
        compiled["aggs"],
        json!({
            "price_stats": {"stats": {"field": "price"}},
            "brands": {"terms": {"field": "brand", "size": 5, "order": {"_count": "desc"}}},
            "price_histogram": {"histogram": {"field": "price", "interval": 50.0, "min_doc_count": 1}},
            "rings": {"geo_distance": {
                "field": "location",
                "origin": {"lat": 52.376, "lon": 4.894},
                "ranges": [{"to": 100.0}, {"from": 100.0, "to": 300.0}]
            }},
            "networks": {"ip_range": {"field": "ip", "ranges": [{"mask": "10.0.0.0/25"}]}}
        })
    );
    Ok(())
}

#[test]
fn test_alias_last_write_wins() -> Result<()> {
    let connection = StaticConnection::default();
    let mut search = SearchBuilder::new(&connection);

    search.aggregate(|aggs| {
        aggs.avg("price", "price")?;
        aggs.cardinality("sellers", "seller_id", Some(1000))?;
        Ok(())
    })?;
    search.aggregations().sum("price", "price")?;

    let compiled = search.compile();
    let aliases: Vec<&String> = compiled["aggs"].as_object().unwrap().keys().collect();
    assert_eq!(aliases, vec!["price", "sellers"]);
    assert_eq!(compiled["aggs"]["price"], json!({"sum": {"field": "price"}}));
    assert_eq!(
        compiled["aggs"]["sellers"],
        json!({"cardinality": {"field": "seller_id", "precision_threshold": 1000}})
    );
    Ok(())
}

#[test]
fn test_aggregation_validation() {
    let connection = StaticConnection::default();
    let mut search = SearchBuilder::new(&connection);
    let mut aggs = search.aggregations();

    assert!(matches!(
        aggs.geohash_grid("cells", "location", 13),
        Err(DevToolsError::InvalidArgument(_))
    ));
    assert!(matches!(
        aggs.histogram("h", "price", -5.0, HistogramOptions::new()),
        Err(DevToolsError::InvalidArgument(_))
    ));
    assert!(matches!(
        aggs.range("r", "price", vec![], false),
        Err(DevToolsError::InvalidArgument(_))
    ));
    assert!(matches!(
        aggs.missing("m", " "),
        Err(DevToolsError::InvalidArgument(_))
    ));
    assert!(search.compile().get("aggs").is_none());
}

#[test]
fn test_scripted_metrics_and_percentiles() -> Result<()> {
    let connection = StaticConnection::default();
    let mut search = SearchBuilder::new(&connection);

    search.aggregate(|aggs| {
        aggs.max(
            "max_discounted",
            MetricSource::field("price").with_script(Script::new("_value * params.rate").with_param("rate", 0.9)),
        )?;
        aggs.percentiles("load", "load_time", [95.0, 99.0])?;
        aggs.percentile_ranks("load_ranks", "load_time", [500.0])?;
        aggs.date_range(
            "recent",
            "published_at",
            "MM-yyyy",
            vec![DateRangeBucket::after("now-10M/M").with_key("recent")],
        )?;
        Ok(())
    })?;

    let aggs = search.compile()["aggs"].clone();
    assert_eq!(
        aggs["max_discounted"],
        json!({"max": {
            "field": "price",
            "script": {"source": "_value * params.rate", "params": {"rate": 0.9}}
        }})
    );
    assert_eq!(
        aggs["load"],
        json!({"percentiles": {"field": "load_time", "percents": [95.0, 99.0]}})
    );
    assert_eq!(
        aggs["load_ranks"],
        json!({"percentile_ranks": {"field": "load_time", "values": [500.0]}})
    );
    assert_eq!(
        aggs["recent"],
        json!({"date_range": {
            "field": "published_at",
            "format": "MM-yyyy",
            "ranges": [{"key": "recent", "from": "now-10M/M"}]
        }})
    );
    Ok(())
}
