//! Field sorts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::{Extra, merge_extra, object, put};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Extra parameters of a field sort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortOptions {
    /// Value picked from multi-valued fields (`min`, `max`, `sum`, `avg`, `median`).
    pub mode: Option<String>,
    /// Placement of documents missing the field (`_first`, `_last` or a value).
    pub missing: Option<Value>,
    /// Type assumed when the field is unmapped.
    pub unmapped_type: Option<String>,
    /// Engine-specific extras (e.g. `nested`).
    pub extra: Extra,
}

impl SortOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the multi-value mode.
    pub fn with_mode<S: Into<String>>(mut self, mode: S) -> Self {
        self.mode = Some(mode.into());
        self
    }

    /// Set the missing value placement.
    pub fn with_missing<V: Into<Value>>(mut self, missing: V) -> Self {
        self.missing = Some(missing.into());
        self
    }

    /// Set the unmapped type.
    pub fn with_unmapped_type<S: Into<String>>(mut self, unmapped_type: S) -> Self {
        self.unmapped_type = Some(unmapped_type.into());
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

/// A sort on a single field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSort {
    /// The field to sort on.
    pub field: String,
    /// Sort direction, the engine default when unset.
    pub order: Option<SortOrder>,
    /// Extra parameters.
    pub options: SortOptions,
}

impl FieldSort {
    /// Create a new field sort.
    pub fn new<S: Into<String>>(field: S, order: Option<SortOrder>, options: SortOptions) -> Self {
        FieldSort {
            field: field.into(),
            order,
            options,
        }
    }

    /// Serialize as `{field: {"order": .., ..}}`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        put(&mut map, "order", self.order.map(|o| o.as_str()));
        put(&mut map, "mode", self.options.mode.clone());
        put(&mut map, "missing", self.options.missing.clone());
        put(&mut map, "unmapped_type", self.options.unmapped_type.clone());
        merge_extra(&mut map, &self.options.extra);
        object(self.field.clone(), Value::Object(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_sort_serialization() {
        let sort = FieldSort::new(
            "price",
            Some(SortOrder::Desc),
            SortOptions::new().with_missing("_last"),
        );
        assert_eq!(
            sort.to_value(),
            json!({"price": {"order": "desc", "missing": "_last"}})
        );

        let bare = FieldSort::new("_score", None, SortOptions::new());
        assert_eq!(bare.to_value(), json!({"_score": {}}));
    }

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("DESC".parse::<SortOrder>().unwrap(), SortOrder::Desc);
        assert!("sideways".parse::<SortOrder>().is_err());
    }
}
