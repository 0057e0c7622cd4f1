//! Shared helpers used across the query and aggregation models.

use serde_json::{Map, Value};

/// Free-form engine options merged verbatim into a serialized clause.
pub type Extra = Map<String, Value>;

/// Anything that names one field or a list of fields.
///
/// Used by operations such as `exists` and `sort_by` that accept either a
/// single field name or several.
pub trait IntoFields {
    /// Convert into an ordered list of field names.
    fn into_fields(self) -> Vec<String>;
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoFields for &String {
    fn into_fields(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> IntoFields for Vec<S> {
    fn into_fields(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoFields for [S; N] {
    fn into_fields(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl IntoFields for &[&str] {
    fn into_fields(self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}

/// Insert `value` under `key` when it is present.
pub(crate) fn put<V: Into<Value>>(map: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        map.insert(key.to_string(), value.into());
    }
}

/// Merge the escape-hatch options into `map`; explicit keys already in `map` win.
pub(crate) fn merge_extra(map: &mut Map<String, Value>, extra: &Extra) {
    for (key, value) in extra {
        if !map.contains_key(key) {
            map.insert(key.clone(), value.clone());
        }
    }
}

/// Build a single-key JSON object.
pub(crate) fn object(key: impl Into<String>, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.into(), value);
    Value::Object(map)
}
