//! Command implementations for the edt CLI.

use serde_json::Value;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::Config;
use crate::error::{DevToolsError, Result};
use crate::query::boolean::Occur;
use crate::query::range::RangeBounds;
use crate::query::sort::{SortOptions, SortOrder};
use crate::search::{PageWindow, SearchBuilder, SearchRequest};

/// Execute a CLI command.
pub fn execute_command(args: EdtArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Compile(compile_args) => compile_request(compile_args, &config, &args),
        Command::Window(window_args) => show_window(window_args, &config, &args),
    }
}

fn load_config(args: &EdtArgs) -> Result<Config> {
    match &args.config {
        Some(path) => Config::load(path),
        None => Config::from_env(),
    }
}

/// Requests are only compiled here, never sent.
fn offline(_request: &SearchRequest) -> Result<Value> {
    Err(DevToolsError::connection(
        "the CLI compiles requests without contacting a cluster",
    ))
}

/// Compile a request from flags.
fn compile_request(args: &CompileArgs, config: &Config, cli_args: &EdtArgs) -> Result<()> {
    let connection = offline;
    let mut search = SearchBuilder::new(&connection);

    if let Some(index) = args.index.as_ref().or(config.default_index.as_ref()) {
        search.index(index.as_str())?;
    }
    if let Some(doc_type) = &args.doc_type {
        search.doc_type(doc_type.as_str())?;
    }

    let roles = [
        (Occur::Must, &args.must),
        (Occur::Should, &args.should),
        (Occur::MustNot, &args.must_not),
        (Occur::Filter, &args.filter),
    ];
    for (occur, flags) in roles {
        switch_role(&mut search, occur);
        for flag in flags {
            apply_clause(&mut search, flag)?;
        }
    }

    if let Some(minimum) = &args.minimum_should_match {
        search.minimum_should_match(parse_scalar(minimum));
    }

    for flag in &args.sort {
        let (field, order) = match flag.split_once(':') {
            Some((field, order)) => (field, Some(parse_order(order)?)),
            None => (flag.as_str(), None),
        };
        search.sort_by(field, order, SortOptions::new())?;
    }

    if !args.highlight.is_empty() {
        search.highlight(args.highlight.clone());
    }

    for flag in &args.agg {
        apply_aggregation(&mut search, flag)?;
    }

    if args.page.is_some() || args.limit.is_some() {
        let window = PageWindow::new(
            args.limit.unwrap_or(config.per_page),
            args.page.unwrap_or(1),
        )?;
        search.from(window.offset())?.size(window.per_page())?;
    }
    if let Some(from) = args.from {
        search.from(from)?;
    }
    if let Some(size) = args.size {
        search.size(size)?;
    }
    if let Some(min_score) = args.min_score {
        search.min_score(min_score)?;
    }

    let request = search.to_request();
    output_result(
        "Compiled search request",
        &CompileResult {
            path: request.path(),
            body: request.body,
        },
        cli_args,
    )
}

/// Show the page window for a result size.
fn show_window(args: &WindowArgs, config: &Config, cli_args: &EdtArgs) -> Result<()> {
    let window = PageWindow::new(args.limit.unwrap_or(config.per_page), args.page)?;
    let last_page = window.last_page(args.total);

    output_result(
        "Page window",
        &WindowResult {
            total: args.total,
            per_page: window.per_page(),
            page: window.page(),
            offset: window.offset(),
            last_page,
            has_more_pages: window.page() < last_page,
        },
        cli_args,
    )
}

fn switch_role(search: &mut SearchBuilder<'_>, occur: Occur) {
    match occur {
        Occur::Must => search.must(),
        Occur::Should => search.should(),
        Occur::MustNot => search.must_not(),
        Occur::Filter => search.filter(),
    };
}

/// Numbers and booleans keep their JSON type, anything else is a string.
fn parse_scalar(value: &str) -> Value {
    serde_json::from_str::<Value>(value)
        .ok()
        .filter(|v| v.is_number() || v.is_boolean())
        .unwrap_or_else(|| Value::from(value))
}

fn parse_list(values: &str) -> Vec<&str> {
    values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect()
}

fn parse_order(order: &str) -> Result<SortOrder> {
    order.parse().map_err(DevToolsError::invalid_argument)
}

/// `lo..hi`, `lo..` or `..hi`, both ends inclusive.
fn parse_range(value: &str) -> Result<RangeBounds> {
    let (lower, upper) = value.split_once("..").ok_or_else(|| {
        DevToolsError::invalid_argument(format!("range `{value}` must look like lo..hi"))
    })?;

    let mut bounds = RangeBounds::new();
    if !lower.is_empty() {
        bounds = bounds.gte(parse_scalar(lower));
    }
    if !upper.is_empty() {
        bounds = bounds.lte(parse_scalar(upper));
    }
    Ok(bounds)
}

fn apply_clause(search: &mut SearchBuilder<'_>, flag: &str) -> Result<()> {
    let (kind, rest) = flag.split_once(':').unwrap_or((flag, ""));

    match kind {
        "match_all" => search.match_all(),
        "exists" => search.exists(parse_list(rest)),
        "ids" => search.ids(parse_list(rest)),
        "query_string" => search.query_string(rest),
        "simple_query_string" => search.simple_query_string(rest),
        _ => {
            let (field, value) = rest.split_once('=').ok_or_else(|| {
                DevToolsError::invalid_argument(format!(
                    "clause `{flag}` must look like kind:field=value"
                ))
            })?;
            match kind {
                "term" => search.term(field, parse_scalar(value)),
                "terms" => search.terms(field, parse_list(value).into_iter().map(parse_scalar)),
                "match" => search.match_query(field, value),
                "prefix" => search.prefix(field, value),
                "wildcard" => search.wildcard(field, value),
                "regexp" => search.regexp(field, value),
                "fuzzy" => search.fuzzy(field, value),
                "common" => search.common_terms(field, value),
                "range" => search.range(field, parse_range(value)?),
                other => Err(DevToolsError::invalid_argument(format!(
                    "unsupported clause kind `{other}`"
                ))),
            }
        }
    }?;
    Ok(())
}

fn apply_aggregation(search: &mut SearchBuilder<'_>, flag: &str) -> Result<()> {
    let invalid = || {
        DevToolsError::invalid_argument(format!(
            "aggregation `{flag}` must look like kind:alias=field"
        ))
    };
    let (kind, rest) = flag.split_once(':').ok_or_else(invalid)?;
    let (alias, field) = rest.split_once('=').ok_or_else(invalid)?;

    let mut aggs = search.aggregations();
    match kind {
        "avg" => aggs.avg(alias, field),
        "sum" => aggs.sum(alias, field),
        "min" => aggs.min(alias, field),
        "max" => aggs.max(alias, field),
        "stats" => aggs.stats(alias, field),
        "value_count" => aggs.value_count(alias, field),
        "cardinality" => aggs.cardinality(alias, field, None),
        "missing" => aggs.missing(alias, field),
        "geo_bounds" => aggs.geo_bounds(alias, field, false),
        "terms" => aggs.terms(alias, field, Default::default()),
        other => Err(DevToolsError::invalid_argument(format!(
            "aggregation kind `{other}` is not available from the command line"
        ))),
    }?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(flags: &[(&str, Occur)]) -> Result<Value> {
        let connection = offline;
        let mut search = SearchBuilder::new(&connection);
        for (flag, occur) in flags {
            switch_role(&mut search, *occur);
            apply_clause(&mut search, flag)?;
        }
        Ok(search.compile())
    }

    #[test]
    fn test_apply_clause() -> Result<()> {
        let body = compile(&[
            ("term:stock=3", Occur::Filter),
            ("range:price=10..", Occur::Filter),
            ("terms:tag=a, b", Occur::Should),
            ("exists:title,body", Occur::Must),
        ])?;

        assert_eq!(
            body["query"],
            json!({"bool": {
                "filter": [
                    {"term": {"stock": 3}},
                    {"range": {"price": {"gte": 10}}}
                ],
                "should": [{"terms": {"tag": ["a", "b"]}}],
                "must": [
                    {"exists": {"field": "title"}},
                    {"exists": {"field": "body"}}
                ]
            }})
        );
        Ok(())
    }

    #[test]
    fn test_malformed_specs() {
        assert!(matches!(
            compile(&[("term:color", Occur::Must)]),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(matches!(
            compile(&[("bogus:a=b", Occur::Must)]),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(matches!(
            compile(&[("range:price=..", Occur::Must)]),
            Err(DevToolsError::InvalidClause(_))
        ));
    }

    #[test]
    fn test_apply_aggregation() -> Result<()> {
        let connection = offline;
        let mut search = SearchBuilder::new(&connection);
        apply_aggregation(&mut search, "avg:avg_price=price")?;
        assert!(apply_aggregation(&mut search, "histogram:h=price").is_err());
        assert!(apply_aggregation(&mut search, "avg").is_err());

        assert_eq!(
            search.compile()["aggs"],
            json!({"avg_price": {"avg": {"field": "price"}}})
        );
        Ok(())
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("3"), json!(3));
        assert_eq!(parse_scalar("true"), json!(true));
        assert_eq!(parse_scalar("red"), json!("red"));
        assert_eq!(parse_scalar("\"quoted\""), json!("\"quoted\""));
    }
}
