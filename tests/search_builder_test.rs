//! Integration tests for SearchBuilder compilation and execution

use elastic_dev_tools::prelude::*;
use serde_json::{Value, json};

fn empty_response() -> Value {
    json!({"hits": {"total": {"value": 0, "relation": "eq"}, "hits": []}})
}

#[test]
fn test_compile_is_repeatable() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.term("color", "red")?;
    search.sort_by("price", Some(SortOrder::Desc), SortOptions::new())?;
    search.size(10)?;

    let first = search.compile();
    let second = search.compile();
    assert_eq!(first, second);
    assert_eq!(
        first,
        json!({
            "query": {"term": {"color": "red"}},
            "sort": [{"price": {"order": "desc"}}],
            "size": 10
        })
    );
    Ok(())
}

#[test]
fn test_role_retention_across_switches() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.filter().term("status", "published")?;
    search.must().match_query("title", "rust")?;
    search.filter().range("year", RangeBounds::new().gte(2020))?;
    search.should().prefix("tag", "sys")?;

    let compiled = search.compile();
    let bool_query = compiled["query"]["bool"].as_object().unwrap();
    let roles: Vec<&String> = bool_query.keys().collect();
    assert_eq!(roles, vec!["filter", "must", "should"]);
    assert_eq!(
        compiled["query"]["bool"]["filter"],
        json!([
            {"term": {"status": "published"}},
            {"range": {"year": {"gte": 2020}}}
        ])
    );
    assert_eq!(
        compiled["query"]["bool"]["must"],
        json!([{"match": {"title": {"query": "rust"}}}])
    );
    Ok(())
}

#[test]
fn test_exists_appends_one_clause_per_field() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.exists(["a", "b"])?;

    let clauses = search.document().clauses();
    assert_eq!(clauses.len(), 2);
    assert!(clauses.iter().all(|c| c.occur == Occur::Must));
    assert_eq!(
        search.compile()["query"],
        json!({"bool": {"must": [
            {"exists": {"field": "a"}},
            {"exists": {"field": "b"}}
        ]}})
    );
    Ok(())
}

#[test]
fn test_nested_role_isolation() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.should();
    search.nested("comments", |inner| {
        assert_eq!(inner.occur(), Occur::Must);
        inner.term("comments.author", "kim")?;
        inner.must_not().term("comments.hidden", true)?;
        Ok(())
    })?;
    search.term("featured", true)?;

    assert_eq!(search.occur(), Occur::Should);
    assert_eq!(
        search.compile()["query"],
        json!({"bool": {"should": [
            {"nested": {
                "path": "comments",
                "query": {"bool": {
                    "must": [{"term": {"comments.author": "kim"}}],
                    "must_not": [{"term": {"comments.hidden": true}}]
                }},
                "score_mode": "avg"
            }},
            {"term": {"featured": true}}
        ]}})
    );
    Ok(())
}

#[test]
fn test_empty_nested_compiles_to_empty_bool() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.nested_with("variants", ScoreMode::Max, |_| Ok(()))?;

    assert_eq!(
        search.compile()["query"],
        json!({"nested": {"path": "variants", "query": {"bool": {}}, "score_mode": "max"}})
    );
    Ok(())
}

#[test]
fn test_leaf_clause_options() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.match_query_with(
        "title",
        "quick brown fox",
        MatchOptions::new()
            .with_operator(Operator::And)
            .with_fuzziness(Fuzziness::Auto),
    )?;
    search.term_with("sku", "A-1", TermOptions::new().with_boost(2.0))?;
    search.multi_match(["title", "body"], "fox")?;
    search.geo_distance("location", "12km", GeoPoint::new(52.37, 4.89)?)?;
    search.ids(vec!["1", "2"])?;
    search.match_all()?;

    let must = search.compile()["query"]["bool"]["must"].clone();
    assert_eq!(
        must[0],
        json!({"match": {"title": {"query": "quick brown fox", "operator": "and", "fuzziness": "AUTO"}}})
    );
    assert_eq!(must[1], json!({"term": {"sku": {"value": "A-1", "boost": 2.0}}}));
    assert_eq!(
        must[2],
        json!({"multi_match": {"query": "fox", "fields": ["title", "body"]}})
    );
    assert_eq!(
        must[3],
        json!({"geo_distance": {"distance": "12km", "location": {"lat": 52.37, "lon": 4.89}}})
    );
    assert_eq!(must[4], json!({"ids": {"values": ["1", "2"]}}));
    assert_eq!(must[5], json!({"match_all": {}}));
    Ok(())
}

#[test]
fn test_invalid_clauses_rejected() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    assert!(matches!(
        search.match_query("", "x"),
        Err(DevToolsError::InvalidClause(_))
    ));
    assert!(matches!(
        search.terms("tag", Vec::<String>::new()),
        Err(DevToolsError::InvalidClause(_))
    ));
    assert!(matches!(
        search.range("price", RangeBounds::new()),
        Err(DevToolsError::InvalidClause(_))
    ));
    assert!(matches!(
        search.geo_polygon("area", vec![GeoPoint::new(0.0, 0.0)?]),
        Err(DevToolsError::InvalidClause(_))
    ));
    assert!(search.document().clauses().is_empty());
    Ok(())
}

#[test]
fn test_highlight_and_window() -> Result<()> {
    let connection = StaticConnection::new(empty_response());
    let mut search = SearchBuilder::new(&connection);

    search.highlight_with(
        [("title", HighlightOptions::new().with_fragment_size(50))],
        HighlightOptions::new().with_number_of_fragments(2),
        "<b>",
        "</b>",
    );
    search.from(20u32)?.size(10i64)?.min_score(0.5)?;

    let compiled = search.compile();
    let keys: Vec<&String> = compiled.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["highlight", "from", "size", "min_score"]);
    assert_eq!(
        compiled["highlight"],
        json!({
            "pre_tags": ["<b>"],
            "post_tags": ["</b>"],
            "number_of_fragments": 2,
            "fields": {"title": {"fragment_size": 50}}
        })
    );
    Ok(())
}

#[test]
fn test_execute_sends_request() -> Result<()> {
    let connection = StaticConnection::new(json!({
        "took": 2,
        "hits": {"total": 1, "hits": [{"_id": "7", "_score": 0.3, "_source": {"name": "lamp"}}]}
    }));
    let mut search = SearchBuilder::new(&connection);
    search.index("products")?.doc_type("doc")?;
    search.term("name", "lamp")?;

    let result = search.execute()?;

    assert_eq!(result.total_hits(), 1);
    assert_eq!(result.hits()[0].id, "7");
    let request = connection.last_request().unwrap();
    assert_eq!(request.index.as_deref(), Some("products"));
    assert_eq!(request.doc_type.as_deref(), Some("doc"));
    assert_eq!(request.body, search.compile());
    Ok(())
}

#[test]
fn test_connection_errors_propagate() -> Result<()> {
    let failing = |_: &SearchRequest| -> Result<Value> {
        Err(DevToolsError::connection("no living connections"))
    };
    let mut search = SearchBuilder::new(&failing);
    search.match_all()?;

    assert!(matches!(
        search.execute(),
        Err(DevToolsError::Connection(_))
    ));
    Ok(())
}

#[test]
fn test_malformed_response_surfaces() -> Result<()> {
    let connection = StaticConnection::new(json!({"hits": {"hits": []}}));
    let search = SearchBuilder::new(&connection);

    assert!(matches!(
        search.execute(),
        Err(DevToolsError::MalformedResponse(_))
    ));
    assert!(search.execute_raw().is_ok());
    Ok(())
}
