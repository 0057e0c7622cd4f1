//! Fluent construction of search requests.
//!
//! A [`SearchBuilder`] owns a [`QueryDocument`] and a current boolean role.
//! Every clause operation files its clause under the current role; switching
//! roles with [`must`](SearchBuilder::must), [`should`](SearchBuilder::should),
//! [`must_not`](SearchBuilder::must_not) or [`filter`](SearchBuilder::filter)
//! affects only the clauses that follow.
//!
//! # Examples
//!
//! ```
//! use elastic_dev_tools::connection::StaticConnection;
//! use elastic_dev_tools::search::SearchBuilder;
//! use serde_json::json;
//!
//! let connection = StaticConnection::new(json!({"hits": {"total": 0, "hits": []}}));
//! let mut search = SearchBuilder::new(&connection);
//! search.index("products").unwrap();
//! search.term("color", "red").unwrap();
//! search.should().match_query("name", "lamp").unwrap();
//!
//! let body = search.compile();
//! assert_eq!(body["query"]["bool"]["must"][0], json!({"term": {"color": "red"}}));
//! ```

use std::fmt::Display;
use std::rc::Rc;

use serde_json::Value;

use crate::aggregation::AggregationBuilder;
use crate::connection::Connection;
use crate::document::QueryDocument;
use crate::error::{DevToolsError, Result};
use crate::query::boolean::Occur;
use crate::query::clause::Clause;
use crate::query::function_score::{FunctionScoreOptions, FunctionScoreQuery};
use crate::query::geo::{GeoBoundingBox, GeoOptions, GeoPoint, GeoShape};
use crate::query::highlight::{Highlight, HighlightOptions};
use crate::query::nested::{NestedQuery, ScoreMode};
use crate::query::options::{
    BoostOptions, CommonTermsOptions, FuzzyOptions, MatchOptions, MultiMatchOptions,
    QueryStringOptions, RegexpOptions, TermOptions,
};
use crate::query::range::RangeBounds;
use crate::query::sort::{FieldSort, SortOptions, SortOrder};
use crate::search::SearchRequest;
use crate::search::function_score::FunctionScoreBuilder;
use crate::search::paginator::{PageWindow, Paginator};
use crate::search::result::SearchResult;
use crate::util::IntoFields;

/// Resolves the current page number from the caller's request context.
pub type PageResolver = Rc<dyn Fn() -> Option<u64>>;

/// Fluent builder of a single search request.
pub struct SearchBuilder<'c> {
    connection: &'c dyn Connection,
    document: QueryDocument,
    index: Option<String>,
    doc_type: Option<String>,
    occur: Occur,
    page_resolver: Option<PageResolver>,
}

fn require_name(what: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(DevToolsError::invalid_argument(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}

fn non_negative<N>(what: &str, value: N) -> Result<u64>
where
    N: TryInto<u64> + Display + Copy,
{
    value.try_into().map_err(|_| {
        DevToolsError::invalid_argument(format!(
            "{what} must be a non-negative integer, got {value}"
        ))
    })
}

impl<'c> SearchBuilder<'c> {
    /// Create a builder sending its requests through `connection`.
    pub fn new(connection: &'c dyn Connection) -> Self {
        SearchBuilder {
            connection,
            document: QueryDocument::new(),
            index: None,
            doc_type: None,
            occur: Occur::Must,
            page_resolver: None,
        }
    }

    /// Use `resolver` to find the current page when [`paginate`](Self::paginate)
    /// is called without one.
    pub fn with_page_resolver(mut self, resolver: PageResolver) -> Self {
        self.page_resolver = Some(resolver);
        self
    }

    /// A fresh builder on the same connection: empty document, role `Must`.
    pub(crate) fn sub_builder(&self) -> SearchBuilder<'c> {
        SearchBuilder::new(self.connection)
    }

    pub(crate) fn into_document(self) -> QueryDocument {
        self.document
    }

    // Role state

    /// File the following clauses under `must`.
    pub fn must(&mut self) -> &mut Self {
        self.occur = Occur::Must;
        self
    }

    /// File the following clauses under `should`.
    pub fn should(&mut self) -> &mut Self {
        self.occur = Occur::Should;
        self
    }

    /// File the following clauses under `must_not`.
    pub fn must_not(&mut self) -> &mut Self {
        self.occur = Occur::MustNot;
        self
    }

    /// File the following clauses under `filter`.
    pub fn filter(&mut self) -> &mut Self {
        self.occur = Occur::Filter;
        self
    }

    /// The role new clauses are filed under.
    pub fn occur(&self) -> Occur {
        self.occur
    }

    // Target and window

    /// Target an index.
    pub fn index<S: Into<String>>(&mut self, name: S) -> Result<&mut Self> {
        let name = name.into();
        require_name("index name", &name)?;
        self.index = Some(name);
        Ok(self)
    }

    /// Target a mapping type.
    pub fn doc_type<S: Into<String>>(&mut self, name: S) -> Result<&mut Self> {
        let name = name.into();
        require_name("type name", &name)?;
        self.doc_type = Some(name);
        Ok(self)
    }

    pub(crate) fn set_index(&mut self, name: String) {
        self.index = Some(name);
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn doc_type_name(&self) -> Option<&str> {
        self.doc_type.as_deref()
    }

    /// Skip the first `offset` hits.
    pub fn from<N>(&mut self, offset: N) -> Result<&mut Self>
    where
        N: TryInto<u64> + Display + Copy,
    {
        let offset = non_negative("offset", offset)?;
        self.document.set_from(offset);
        Ok(self)
    }

    /// Return at most `limit` hits.
    pub fn size<N>(&mut self, limit: N) -> Result<&mut Self>
    where
        N: TryInto<u64> + Display + Copy,
    {
        let limit = non_negative("size", limit)?;
        self.document.set_size(limit);
        Ok(self)
    }

    /// Drop hits scoring below `score`.
    pub fn min_score(&mut self, score: f64) -> Result<&mut Self> {
        if !score.is_finite() {
            return Err(DevToolsError::invalid_argument(format!(
                "min_score must be finite, got {score}"
            )));
        }
        self.document.set_min_score(score);
        Ok(self)
    }

    /// Minimum number (or percentage) of `should` clauses that must match.
    pub fn minimum_should_match<V: Into<Value>>(&mut self, minimum: V) -> &mut Self {
        self.document.set_minimum_should_match(minimum);
        self
    }

    /// Boost of the whole boolean query.
    pub fn boost(&mut self, boost: f64) -> Result<&mut Self> {
        if !boost.is_finite() {
            return Err(DevToolsError::invalid_argument(format!(
                "boost must be finite, got {boost}"
            )));
        }
        self.document.set_boost(boost);
        Ok(self)
    }

    // Leaf clauses

    /// Validate a clause and file it under the current role.
    pub fn append(&mut self, clause: Clause) -> Result<&mut Self> {
        clause.validate()?;
        log::trace!("{} clause filed under {}", clause.kind_name(), self.occur.as_str());
        self.document.add_clause(clause, self.occur);
        Ok(self)
    }

    /// Exact value match.
    pub fn term<F: Into<String>, V: Into<Value>>(&mut self, field: F, value: V) -> Result<&mut Self> {
        self.term_with(field, value, TermOptions::default())
    }

    pub fn term_with<F: Into<String>, V: Into<Value>>(
        &mut self,
        field: F,
        value: V,
        options: TermOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::Term {
            field: field.into(),
            value: value.into(),
            options,
        })
    }

    /// Match any of several exact values.
    pub fn terms<F, I, V>(&mut self, field: F, values: I) -> Result<&mut Self>
    where
        F: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.terms_with(field, values, TermOptions::default())
    }

    pub fn terms_with<F, I, V>(&mut self, field: F, values: I, options: TermOptions) -> Result<&mut Self>
    where
        F: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.append(Clause::Terms {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
            options,
        })
    }

    /// Full-text match on one field.
    pub fn match_query<F: Into<String>, Q: Into<String>>(&mut self, field: F, query: Q) -> Result<&mut Self> {
        self.match_query_with(field, query, MatchOptions::default())
    }

    pub fn match_query_with<F: Into<String>, Q: Into<String>>(
        &mut self,
        field: F,
        query: Q,
        options: MatchOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::Match {
            field: field.into(),
            query: query.into(),
            options,
        })
    }

    /// Full-text match across several fields.
    pub fn multi_match<F: IntoFields, Q: Into<String>>(&mut self, fields: F, query: Q) -> Result<&mut Self> {
        self.multi_match_with(fields, query, MultiMatchOptions::default())
    }

    pub fn multi_match_with<F: IntoFields, Q: Into<String>>(
        &mut self,
        fields: F,
        query: Q,
        options: MultiMatchOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::MultiMatch {
            fields: fields.into_fields(),
            query: query.into(),
            options,
        })
    }

    /// Values within bounds; format, time zone and boost travel with `bounds`.
    pub fn range<F: Into<String>>(&mut self, field: F, bounds: RangeBounds) -> Result<&mut Self> {
        self.append(Clause::Range {
            field: field.into(),
            bounds,
        })
    }

    /// Terms starting with `value`.
    pub fn prefix<F: Into<String>, V: Into<String>>(&mut self, field: F, value: V) -> Result<&mut Self> {
        self.prefix_with(field, value, TermOptions::default())
    }

    pub fn prefix_with<F: Into<String>, V: Into<String>>(
        &mut self,
        field: F,
        value: V,
        options: TermOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::Prefix {
            field: field.into(),
            value: value.into(),
            options,
        })
    }

    /// Terms matching a `*` / `?` pattern.
    pub fn wildcard<F: Into<String>, V: Into<String>>(&mut self, field: F, value: V) -> Result<&mut Self> {
        self.wildcard_with(field, value, TermOptions::default())
    }

    pub fn wildcard_with<F: Into<String>, V: Into<String>>(
        &mut self,
        field: F,
        value: V,
        options: TermOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::Wildcard {
            field: field.into(),
            value: value.into(),
            options,
        })
    }

    /// Terms matching a regular expression.
    pub fn regexp<F: Into<String>, V: Into<String>>(&mut self, field: F, value: V) -> Result<&mut Self> {
        self.regexp_with(field, value, RegexpOptions::default())
    }

    pub fn regexp_with<F: Into<String>, V: Into<String>>(
        &mut self,
        field: F,
        value: V,
        options: RegexpOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::Regexp {
            field: field.into(),
            value: value.into(),
            options,
        })
    }

    /// Terms within an edit distance of `value`.
    pub fn fuzzy<F: Into<String>, V: Into<String>>(&mut self, field: F, value: V) -> Result<&mut Self> {
        self.fuzzy_with(field, value, FuzzyOptions::default())
    }

    pub fn fuzzy_with<F: Into<String>, V: Into<String>>(
        &mut self,
        field: F,
        value: V,
        options: FuzzyOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::Fuzzy {
            field: field.into(),
            value: value.into(),
            options,
        })
    }

    /// Documents having a value for each field.
    ///
    /// Every field gets its own `exists` clause under the current role.
    pub fn exists<F: IntoFields>(&mut self, fields: F) -> Result<&mut Self> {
        let fields = fields.into_fields();
        if fields.is_empty() {
            return Err(DevToolsError::invalid_clause(
                "exists: at least one field is required",
            ));
        }
        let clauses: Vec<Clause> = fields
            .into_iter()
            .map(|field| Clause::Exists { field })
            .collect();
        for clause in &clauses {
            clause.validate()?;
        }
        for clause in clauses {
            self.append(clause)?;
        }
        Ok(self)
    }

    /// Documents with the given IDs.
    pub fn ids<I: IntoFields>(&mut self, ids: I) -> Result<&mut Self> {
        self.ids_with(ids, BoostOptions::default())
    }

    pub fn ids_with<I: IntoFields>(&mut self, ids: I, options: BoostOptions) -> Result<&mut Self> {
        self.append(Clause::Ids {
            values: ids.into_fields(),
            options,
        })
    }

    /// Geo points inside a bounding box.
    pub fn geo_bounding_box<F: Into<String>>(&mut self, field: F, bounds: GeoBoundingBox) -> Result<&mut Self> {
        self.geo_bounding_box_with(field, bounds, GeoOptions::default())
    }

    pub fn geo_bounding_box_with<F: Into<String>>(
        &mut self,
        field: F,
        bounds: GeoBoundingBox,
        options: GeoOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::GeoBoundingBox {
            field: field.into(),
            bounds,
            options,
        })
    }

    /// Geo points within `distance` (e.g. `"12km"`) of `location`.
    pub fn geo_distance<F: Into<String>, D: Into<String>>(
        &mut self,
        field: F,
        distance: D,
        location: GeoPoint,
    ) -> Result<&mut Self> {
        self.geo_distance_with(field, distance, location, GeoOptions::default())
    }

    pub fn geo_distance_with<F: Into<String>, D: Into<String>>(
        &mut self,
        field: F,
        distance: D,
        location: GeoPoint,
        options: GeoOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::GeoDistance {
            field: field.into(),
            distance: distance.into(),
            location,
            options,
        })
    }

    /// Geo points inside a polygon of at least three points.
    pub fn geo_polygon<F: Into<String>>(&mut self, field: F, points: Vec<GeoPoint>) -> Result<&mut Self> {
        self.geo_polygon_with(field, points, GeoOptions::default())
    }

    pub fn geo_polygon_with<F: Into<String>>(
        &mut self,
        field: F,
        points: Vec<GeoPoint>,
        options: GeoOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::GeoPolygon {
            field: field.into(),
            points,
            options,
        })
    }

    /// Geo shapes related to `shape`; relation and extras travel with the shape.
    pub fn geo_shape<F: Into<String>>(&mut self, field: F, shape: GeoShape) -> Result<&mut Self> {
        self.append(Clause::GeoShape {
            field: field.into(),
            shape,
        })
    }

    /// Lucene query string syntax.
    pub fn query_string<Q: Into<String>>(&mut self, query: Q) -> Result<&mut Self> {
        self.query_string_with(query, QueryStringOptions::default())
    }

    pub fn query_string_with<Q: Into<String>>(
        &mut self,
        query: Q,
        options: QueryStringOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::QueryString {
            query: query.into(),
            options,
        })
    }

    /// Forgiving query string syntax.
    pub fn simple_query_string<Q: Into<String>>(&mut self, query: Q) -> Result<&mut Self> {
        self.simple_query_string_with(query, QueryStringOptions::default())
    }

    pub fn simple_query_string_with<Q: Into<String>>(
        &mut self,
        query: Q,
        options: QueryStringOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::SimpleQueryString {
            query: query.into(),
            options,
        })
    }

    /// Every document.
    pub fn match_all(&mut self) -> Result<&mut Self> {
        self.match_all_with(BoostOptions::default())
    }

    pub fn match_all_with(&mut self, options: BoostOptions) -> Result<&mut Self> {
        self.append(Clause::MatchAll { options })
    }

    /// Common terms query: frequent terms only refine the score.
    pub fn common_terms<F: Into<String>, Q: Into<String>>(&mut self, field: F, query: Q) -> Result<&mut Self> {
        self.common_terms_with(field, query, CommonTermsOptions::default())
    }

    pub fn common_terms_with<F: Into<String>, Q: Into<String>>(
        &mut self,
        field: F,
        query: Q,
        options: CommonTermsOptions,
    ) -> Result<&mut Self> {
        self.append(Clause::CommonTerms {
            field: field.into(),
            query: query.into(),
            options,
        })
    }

    // Sort and highlight

    /// Sort by each of `fields`, in order.
    pub fn sort_by<F: IntoFields>(
        &mut self,
        fields: F,
        order: Option<SortOrder>,
        options: SortOptions,
    ) -> Result<&mut Self> {
        let fields = fields.into_fields();
        for field in &fields {
            require_name("sort field", field)?;
        }
        for field in fields {
            self.document
                .add_sort(FieldSort::new(field, order, options.clone()));
        }
        Ok(self)
    }

    /// Highlight matches in `fields` with the default tags.
    ///
    /// An empty list highlights every field (`*`).
    pub fn highlight<F: IntoFields>(&mut self, fields: F) -> &mut Self {
        let fields = fields.into_fields();
        let highlight = if fields.is_empty() {
            Highlight::default()
        } else {
            Highlight::new(
                fields
                    .into_iter()
                    .map(|field| (field, HighlightOptions::default())),
            )
        };
        self.document.set_highlight(highlight);
        self
    }

    /// Highlight with per-field options, global parameters and custom tags.
    pub fn highlight_with<I, S, P, Q>(
        &mut self,
        fields: I,
        parameters: HighlightOptions,
        pre_tag: P,
        post_tag: Q,
    ) -> &mut Self
    where
        I: IntoIterator<Item = (S, HighlightOptions)>,
        S: Into<String>,
        P: Into<String>,
        Q: Into<String>,
    {
        let mut highlight = Highlight::new(fields);
        if highlight.fields.is_empty() {
            highlight = Highlight::default();
        }
        self.document.set_highlight(
            highlight
                .with_tags(pre_tag, post_tag)
                .with_parameters(parameters),
        );
        self
    }

    // Compound clauses

    /// Query nested objects under `path` with the default `avg` score mode.
    pub fn nested<P, F>(&mut self, path: P, build: F) -> Result<&mut Self>
    where
        P: Into<String>,
        F: FnOnce(&mut SearchBuilder<'c>) -> Result<()>,
    {
        self.nested_with(path, ScoreMode::default(), build)
    }

    /// Query nested objects under `path`.
    ///
    /// `build` receives a fresh builder; only the clauses it collects end up
    /// in the nested query, which is filed under the current role.
    pub fn nested_with<P, F>(&mut self, path: P, score_mode: ScoreMode, build: F) -> Result<&mut Self>
    where
        P: Into<String>,
        F: FnOnce(&mut SearchBuilder<'c>) -> Result<()>,
    {
        let mut inner = self.sub_builder();
        build(&mut inner)?;
        let nested = NestedQuery::new(path, inner.into_document().into_query(), score_mode);
        self.append(Clause::Nested(nested))
    }

    /// Modify the scores of the documents matched by the query `build_query` collects.
    pub fn functions<Q, S>(
        &mut self,
        build_query: Q,
        build_functions: S,
        options: FunctionScoreOptions,
    ) -> Result<&mut Self>
    where
        Q: FnOnce(&mut SearchBuilder<'c>) -> Result<()>,
        S: FnOnce(&mut FunctionScoreBuilder<'c>) -> Result<()>,
    {
        let mut inner = self.sub_builder();
        build_query(&mut inner)?;

        let mut functions = FunctionScoreBuilder::new(self.connection);
        build_functions(&mut functions)?;

        let query = FunctionScoreQuery::new(
            inner.into_document().into_query(),
            functions.into_functions(),
            options,
        );
        self.append(Clause::FunctionScore(query))
    }

    // Aggregations

    /// Register aggregations on this builder's document.
    pub fn aggregate<F>(&mut self, build: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut AggregationBuilder<'_>) -> Result<()>,
    {
        build(&mut AggregationBuilder::new(&mut self.document))?;
        Ok(self)
    }

    /// An aggregation builder bound to this builder's document.
    pub fn aggregations(&mut self) -> AggregationBuilder<'_> {
        AggregationBuilder::new(&mut self.document)
    }

    // Compilation and execution

    /// The document built so far.
    pub fn document(&self) -> &QueryDocument {
        &self.document
    }

    /// Compile the request body. Repeated calls yield equal documents.
    pub fn compile(&self) -> Value {
        self.document.compile()
    }

    /// The request that [`execute`](Self::execute) would send.
    pub fn to_request(&self) -> SearchRequest {
        SearchRequest {
            index: self.index.clone(),
            doc_type: self.doc_type.clone(),
            body: self.compile(),
        }
    }

    /// Send the request and return the raw engine response.
    pub fn execute_raw(&self) -> Result<Value> {
        let request = self.to_request();
        log::debug!("executing search against {}", request.path());
        self.connection.search(&request)
    }

    /// Send the request and parse the response.
    pub fn execute(&self) -> Result<SearchResult> {
        let result = SearchResult::from_response(self.execute_raw()?)?;
        log::debug!(
            "search returned {} of {} hits",
            result.hits().len(),
            result.total_hits()
        );
        Ok(result)
    }

    /// Fetch one page of `limit` hits.
    ///
    /// The page is `page` when given, else the page resolver's answer, else 1.
    /// The builder's `from` / `size` are set to the page window before the
    /// request is sent, so calling this again re-executes the search.
    pub fn paginate(&mut self, limit: u64, page: Option<u64>) -> Result<Paginator> {
        let page = page
            .or_else(|| self.page_resolver.as_ref().and_then(|resolve| resolve()))
            .unwrap_or(1);
        let window = PageWindow::new(limit, page)?;

        self.document.set_from(window.offset());
        self.document.set_size(window.per_page());
        log::debug!(
            "paginating: page {} of size {} (offset {})",
            page,
            limit,
            window.offset()
        );

        Ok(Paginator::new(self.execute()?, window))
    }
}

impl std::fmt::Debug for SearchBuilder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBuilder")
            .field("document", &self.document)
            .field("index", &self.index)
            .field("doc_type", &self.doc_type)
            .field("occur", &self.occur)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::StaticConnection;
    use serde_json::json;

    fn connection() -> StaticConnection {
        StaticConnection::new(json!({"hits": {"total": 0, "hits": []}}))
    }

    #[test]
    fn test_role_state() -> Result<()> {
        let connection = connection();
        let mut search = SearchBuilder::new(&connection);

        search.term("a", "1")?;
        search.should().term("b", "2")?.term("c", "3")?;
        search.must_not().exists("d")?;

        assert_eq!(search.occur(), Occur::MustNot);
        assert_eq!(
            search.compile()["query"],
            json!({"bool": {
                "must": [{"term": {"a": "1"}}],
                "should": [{"term": {"b": "2"}}, {"term": {"c": "3"}}],
                "must_not": [{"exists": {"field": "d"}}]
            }})
        );
        Ok(())
    }

    #[test]
    fn test_negative_window_rejected() {
        let connection = connection();
        let mut search = SearchBuilder::new(&connection);

        assert!(matches!(
            search.from(-1),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(matches!(
            search.size(-10i64),
            Err(DevToolsError::InvalidArgument(_))
        ));
        assert!(search.min_score(f64::NAN).is_err());
        assert!(search.index("").is_err());
        assert_eq!(search.compile(), json!({}));
    }

    #[test]
    fn test_invalid_clause_not_filed() {
        let connection = connection();
        let mut search = SearchBuilder::new(&connection);

        assert!(matches!(
            search.term("", "x"),
            Err(DevToolsError::InvalidClause(_))
        ));
        assert!(search.document().clauses().is_empty());
    }

    #[test]
    fn test_exists_rejects_whole_list() {
        let connection = connection();
        let mut search = SearchBuilder::new(&connection);

        assert!(matches!(
            search.exists(vec!["a", ""]),
            Err(DevToolsError::InvalidClause(_))
        ));
        assert!(search.document().clauses().is_empty());
        assert_eq!(search.compile(), json!({}));
    }

    #[test]
    fn test_highlight_defaults() {
        let connection = connection();
        let mut search = SearchBuilder::new(&connection);
        search.highlight(Vec::<String>::new());

        assert_eq!(
            search.compile()["highlight"],
            json!({"pre_tags": ["<mark>"], "post_tags": ["</mark>"], "fields": {"*": {}}})
        );
    }
}
