//! The closed set of clause kinds and their wire format.

use serde_json::{Map, Value};

use crate::error::{DevToolsError, Result};
use crate::query::function_score::FunctionScoreQuery;
use crate::query::geo::{GeoBoundingBox, GeoOptions, GeoPoint, GeoShape};
use crate::query::nested::NestedQuery;
use crate::query::options::{
    BoostOptions, CommonTermsOptions, FuzzyOptions, MatchOptions, MultiMatchOptions,
    QueryStringOptions, RegexpOptions, TermOptions,
};
use crate::query::range::RangeBounds;
use crate::util::object;

/// One atomic condition contributed to a compiled query.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Term {
        field: String,
        value: Value,
        options: TermOptions,
    },
    Terms {
        field: String,
        values: Vec<Value>,
        options: TermOptions,
    },
    Match {
        field: String,
        query: String,
        options: MatchOptions,
    },
    MultiMatch {
        fields: Vec<String>,
        query: String,
        options: MultiMatchOptions,
    },
    Range {
        field: String,
        bounds: RangeBounds,
    },
    Prefix {
        field: String,
        value: String,
        options: TermOptions,
    },
    Wildcard {
        field: String,
        value: String,
        options: TermOptions,
    },
    Regexp {
        field: String,
        value: String,
        options: RegexpOptions,
    },
    Fuzzy {
        field: String,
        value: String,
        options: FuzzyOptions,
    },
    Exists {
        field: String,
    },
    Ids {
        values: Vec<String>,
        options: BoostOptions,
    },
    GeoBoundingBox {
        field: String,
        bounds: GeoBoundingBox,
        options: GeoOptions,
    },
    GeoDistance {
        field: String,
        distance: String,
        location: GeoPoint,
        options: GeoOptions,
    },
    GeoPolygon {
        field: String,
        points: Vec<GeoPoint>,
        options: GeoOptions,
    },
    GeoShape {
        field: String,
        shape: GeoShape,
    },
    Nested(NestedQuery),
    FunctionScore(FunctionScoreQuery),
    QueryString {
        query: String,
        options: QueryStringOptions,
    },
    SimpleQueryString {
        query: String,
        options: QueryStringOptions,
    },
    MatchAll {
        options: BoostOptions,
    },
    CommonTerms {
        field: String,
        query: String,
        options: CommonTermsOptions,
    },
}

fn require_field(kind: &str, field: &str) -> Result<()> {
    if field.trim().is_empty() {
        return Err(DevToolsError::invalid_clause(format!(
            "{kind}: field must not be empty"
        )));
    }
    Ok(())
}

fn require_text(kind: &str, what: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(DevToolsError::invalid_clause(format!(
            "{kind}: {what} must not be empty"
        )));
    }
    Ok(())
}

/// `{kind: {field: {first_key: first, ..options}}}`
fn field_object(
    kind: &str,
    field: &str,
    first_key: &str,
    first: Value,
    mut rest: Map<String, Value>,
) -> Value {
    let mut inner = Map::new();
    inner.insert(first_key.to_string(), first);
    inner.append(&mut rest);
    object(kind, object(field, Value::Object(inner)))
}

impl Clause {
    /// Wire name of this clause kind.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Clause::Term { .. } => "term",
            Clause::Terms { .. } => "terms",
            Clause::Match { .. } => "match",
            Clause::MultiMatch { .. } => "multi_match",
            Clause::Range { .. } => "range",
            Clause::Prefix { .. } => "prefix",
            Clause::Wildcard { .. } => "wildcard",
            Clause::Regexp { .. } => "regexp",
            Clause::Fuzzy { .. } => "fuzzy",
            Clause::Exists { .. } => "exists",
            Clause::Ids { .. } => "ids",
            Clause::GeoBoundingBox { .. } => "geo_bounding_box",
            Clause::GeoDistance { .. } => "geo_distance",
            Clause::GeoPolygon { .. } => "geo_polygon",
            Clause::GeoShape { .. } => "geo_shape",
            Clause::Nested(_) => "nested",
            Clause::FunctionScore(_) => "function_score",
            Clause::QueryString { .. } => "query_string",
            Clause::SimpleQueryString { .. } => "simple_query_string",
            Clause::MatchAll { .. } => "match_all",
            Clause::CommonTerms { .. } => "common",
        }
    }

    /// Check that the required field and value of this clause are present.
    pub fn validate(&self) -> Result<()> {
        let kind = self.kind_name();
        match self {
            Clause::Term { field, value, .. } => {
                require_field(kind, field)?;
                if value.is_null() {
                    return Err(DevToolsError::invalid_clause("term: value must not be null"));
                }
                Ok(())
            }
            Clause::Terms { field, values, .. } => {
                require_field(kind, field)?;
                if values.is_empty() {
                    return Err(DevToolsError::invalid_clause(
                        "terms: at least one value is required",
                    ));
                }
                Ok(())
            }
            Clause::Match { field, query, .. } | Clause::CommonTerms { field, query, .. } => {
                require_field(kind, field)?;
                require_text(kind, "query", query)
            }
            Clause::MultiMatch { fields, query, .. } => {
                if fields.is_empty() {
                    return Err(DevToolsError::invalid_clause(
                        "multi_match: at least one field is required",
                    ));
                }
                for field in fields {
                    require_field(kind, field)?;
                }
                require_text(kind, "query", query)
            }
            Clause::Range { field, bounds } => {
                require_field(kind, field)?;
                if !bounds.has_bound() {
                    return Err(DevToolsError::invalid_clause(
                        "range: at least one bound is required",
                    ));
                }
                Ok(())
            }
            Clause::Prefix { field, value, .. }
            | Clause::Wildcard { field, value, .. }
            | Clause::Regexp { field, value, .. }
            | Clause::Fuzzy { field, value, .. } => {
                require_field(kind, field)?;
                require_text(kind, "value", value)
            }
            Clause::Exists { field } => require_field(kind, field),
            Clause::Ids { values, .. } => {
                if values.is_empty() || values.iter().any(|id| id.is_empty()) {
                    return Err(DevToolsError::invalid_clause(
                        "ids: at least one non-empty id is required",
                    ));
                }
                Ok(())
            }
            Clause::GeoBoundingBox { field, .. } | Clause::GeoShape { field, .. } => {
                require_field(kind, field)
            }
            Clause::GeoDistance { field, distance, .. } => {
                require_field(kind, field)?;
                require_text(kind, "distance", distance)
            }
            Clause::GeoPolygon { field, points, .. } => {
                require_field(kind, field)?;
                if points.len() < 3 {
                    return Err(DevToolsError::invalid_clause(
                        "geo_polygon: at least three points are required",
                    ));
                }
                Ok(())
            }
            Clause::Nested(nested) => {
                if nested.path.trim().is_empty() {
                    return Err(DevToolsError::invalid_clause("nested: path must not be empty"));
                }
                Ok(())
            }
            Clause::FunctionScore(_) | Clause::MatchAll { .. } => Ok(()),
            Clause::QueryString { query, .. } | Clause::SimpleQueryString { query, .. } => {
                require_text(kind, "query", query)
            }
        }
    }

    /// Serialize this clause into its wire format.
    pub fn to_value(&self) -> Value {
        let kind = self.kind_name();
        match self {
            Clause::Term {
                field,
                value,
                options,
            } => {
                if options.is_empty() {
                    object(kind, object(field.clone(), value.clone()))
                } else {
                    let mut rest = Map::new();
                    options.write_into(&mut rest);
                    field_object(kind, field, "value", value.clone(), rest)
                }
            }
            Clause::Terms {
                field,
                values,
                options,
            } => {
                let mut map = Map::new();
                map.insert(field.clone(), Value::Array(values.clone()));
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::Match {
                field,
                query,
                options,
            } => {
                let mut rest = Map::new();
                options.write_into(&mut rest);
                field_object(kind, field, "query", Value::from(query.clone()), rest)
            }
            Clause::MultiMatch {
                fields,
                query,
                options,
            } => {
                let mut map = Map::new();
                map.insert("query".to_string(), Value::from(query.clone()));
                map.insert("fields".to_string(), Value::from(fields.clone()));
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::Range { field, bounds } => {
                object(kind, object(field.clone(), Value::Object(bounds.to_map())))
            }
            Clause::Prefix {
                field,
                value,
                options,
            }
            | Clause::Wildcard {
                field,
                value,
                options,
            } => {
                let mut rest = Map::new();
                options.write_into(&mut rest);
                field_object(kind, field, "value", Value::from(value.clone()), rest)
            }
            Clause::Regexp {
                field,
                value,
                options,
            } => {
                let mut rest = Map::new();
                options.write_into(&mut rest);
                field_object(kind, field, "value", Value::from(value.clone()), rest)
            }
            Clause::Fuzzy {
                field,
                value,
                options,
            } => {
                let mut rest = Map::new();
                options.write_into(&mut rest);
                field_object(kind, field, "value", Value::from(value.clone()), rest)
            }
            Clause::Exists { field } => object(kind, object("field", Value::from(field.clone()))),
            Clause::Ids { values, options } => {
                let mut map = Map::new();
                map.insert("values".to_string(), Value::from(values.clone()));
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::GeoBoundingBox {
                field,
                bounds,
                options,
            } => {
                let mut map = Map::new();
                map.insert(field.clone(), bounds.to_value());
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::GeoDistance {
                field,
                distance,
                location,
                options,
            } => {
                let mut map = Map::new();
                map.insert("distance".to_string(), Value::from(distance.clone()));
                map.insert(field.clone(), location.to_value());
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::GeoPolygon {
                field,
                points,
                options,
            } => {
                let points: Vec<Value> = points.iter().map(GeoPoint::to_value).collect();
                let mut map = Map::new();
                map.insert(field.clone(), object("points", Value::Array(points)));
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::GeoShape { field, shape } => {
                object(kind, object(field.clone(), shape.to_value()))
            }
            Clause::Nested(nested) => nested.to_value(),
            Clause::FunctionScore(function_score) => function_score.to_value(),
            Clause::QueryString { query, options }
            | Clause::SimpleQueryString { query, options } => {
                let mut map = Map::new();
                map.insert("query".to_string(), Value::from(query.clone()));
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::MatchAll { options } => {
                let mut map = Map::new();
                options.write_into(&mut map);
                object(kind, Value::Object(map))
            }
            Clause::CommonTerms {
                field,
                query,
                options,
            } => {
                let mut rest = Map::new();
                options.write_into(&mut rest);
                field_object(kind, field, "query", Value::from(query.clone()), rest)
            }
        }
    }
}
