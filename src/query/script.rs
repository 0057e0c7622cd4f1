//! Inline scripts for aggregations and script-based score functions.

use serde_json::{Map, Value};

use crate::util::put;

/// An inline script.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Script source.
    pub source: String,
    /// Script language, the engine default (painless) when unset.
    pub lang: Option<String>,
    /// Named script parameters.
    pub params: Map<String, Value>,
}

impl Script {
    /// Create an inline script.
    pub fn new<S: Into<String>>(source: S) -> Self {
        Script {
            source: source.into(),
            lang: None,
            params: Map::new(),
        }
    }

    /// Set the script language.
    pub fn with_lang<S: Into<String>>(mut self, lang: S) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Add a script parameter.
    pub fn with_param<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Check whether the source is blank.
    pub fn is_blank(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Serialize the script.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("source".to_string(), Value::from(self.source.clone()));
        put(&mut map, "lang", self.lang.clone());
        if !self.params.is_empty() {
            map.insert("params".to_string(), Value::Object(self.params.clone()));
        }
        Value::Object(map)
    }
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Script::new(source)
    }
}

impl From<String> for Script {
    fn from(source: String) -> Self {
        Script::new(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_serialization() {
        let script = Script::new("doc['price'].value * params.rate")
            .with_lang("painless")
            .with_param("rate", 1.2);

        assert_eq!(
            script.to_value(),
            json!({
                "source": "doc['price'].value * params.rate",
                "lang": "painless",
                "params": {"rate": 1.2}
            })
        );
        assert!(!script.is_blank());
        assert!(Script::from("  ").is_blank());
    }
}
