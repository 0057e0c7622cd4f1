//! Highlight section of a search request.

use serde_json::{Map, Value};

use crate::util::{Extra, merge_extra, put};

/// Default opening tag.
pub const DEFAULT_PRE_TAG: &str = "<mark>";
/// Default closing tag.
pub const DEFAULT_POST_TAG: &str = "</mark>";
/// Field highlighted when none is given.
pub const DEFAULT_FIELD: &str = "*";

/// Highlighting options, used both per field and globally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightOptions {
    /// Highlighter implementation (`unified`, `plain`, `fvh`).
    pub highlighter_type: Option<String>,
    /// Length of each fragment in characters.
    pub fragment_size: Option<u32>,
    /// Maximum number of fragments to return.
    pub number_of_fragments: Option<u32>,
    /// Only highlight fields the query matched on.
    pub require_field_match: Option<bool>,
    /// Characters returned from the start of the field when nothing matches.
    pub no_match_size: Option<u32>,
    /// Engine-specific extras.
    pub extra: Extra,
}

impl HighlightOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the highlighter implementation.
    pub fn with_type<S: Into<String>>(mut self, highlighter_type: S) -> Self {
        self.highlighter_type = Some(highlighter_type.into());
        self
    }

    /// Set the fragment size.
    pub fn with_fragment_size(mut self, fragment_size: u32) -> Self {
        self.fragment_size = Some(fragment_size);
        self
    }

    /// Set the maximum number of fragments.
    pub fn with_number_of_fragments(mut self, number: u32) -> Self {
        self.number_of_fragments = Some(number);
        self
    }

    /// Only highlight fields the query matched on.
    pub fn with_require_field_match(mut self, require: bool) -> Self {
        self.require_field_match = Some(require);
        self
    }

    /// Add an engine-specific option.
    pub fn with_extra<V: Into<Value>>(mut self, key: &str, value: V) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    fn write_into(&self, map: &mut Map<String, Value>) {
        put(map, "type", self.highlighter_type.clone());
        put(map, "fragment_size", self.fragment_size);
        put(map, "number_of_fragments", self.number_of_fragments);
        put(map, "require_field_match", self.require_field_match);
        put(map, "no_match_size", self.no_match_size);
        merge_extra(map, &self.extra);
    }
}

/// Highlight settings with a single global tag pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    /// Opening tag.
    pub pre_tag: String,
    /// Closing tag.
    pub post_tag: String,
    /// Highlighted fields in insertion order.
    pub fields: Vec<(String, HighlightOptions)>,
    /// Global options.
    pub parameters: HighlightOptions,
}

impl Default for Highlight {
    fn default() -> Self {
        Highlight {
            pre_tag: DEFAULT_PRE_TAG.to_string(),
            post_tag: DEFAULT_POST_TAG.to_string(),
            fields: vec![(DEFAULT_FIELD.to_string(), HighlightOptions::default())],
            parameters: HighlightOptions::default(),
        }
    }
}

impl Highlight {
    /// Create a highlight over the given fields with the default tags.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, HighlightOptions)>,
        S: Into<String>,
    {
        let mut highlight = Highlight {
            fields: Vec::new(),
            ..Highlight::default()
        };
        for (field, options) in fields {
            highlight.add_field(field, options);
        }
        highlight
    }

    /// Replace the tag pair.
    pub fn with_tags<P: Into<String>, Q: Into<String>>(mut self, pre_tag: P, post_tag: Q) -> Self {
        self.pre_tag = pre_tag.into();
        self.post_tag = post_tag.into();
        self
    }

    /// Replace the global options.
    pub fn with_parameters(mut self, parameters: HighlightOptions) -> Self {
        self.parameters = parameters;
        self
    }

    /// Add a field; a field added twice keeps its position and takes the new options.
    pub fn add_field<S: Into<String>>(&mut self, field: S, options: HighlightOptions) {
        let field = field.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = options,
            None => self.fields.push((field, options)),
        }
    }

    /// Serialize the highlight section.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            "pre_tags".to_string(),
            Value::from(vec![self.pre_tag.clone()]),
        );
        map.insert(
            "post_tags".to_string(),
            Value::from(vec![self.post_tag.clone()]),
        );
        self.parameters.write_into(&mut map);

        let mut fields = Map::new();
        for (field, options) in &self.fields {
            let mut field_map = Map::new();
            options.write_into(&mut field_map);
            fields.insert(field.clone(), Value::Object(field_map));
        }
        map.insert("fields".to_string(), Value::Object(fields));

        Value::Object(map)
    }
}
