//! Loading schema nodes from JSON definitions.
//!
//! Endpoint schemas are often kept as data next to the handler configuration.
//! A definition uses camelCase keys and a `type` tag:
//!
//! ```json
//! {
//!   "type": "object",
//!   "required": true,
//!   "strict": true,
//!   "properties": {
//!     "email": { "type": "string", "required": true, "pattern": "@", "patternHelper": "an email address" },
//!     "tags": { "type": "array", "items": { "type": "string" }, "maxLength": 5, "uniqueEntries": true }
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::DefinitionError;

use super::{Children, NodeKind, Pattern, SchemaNode, SchemaOption, UniqueEntries};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeDefinition {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    required: bool,
    /// Older definitions spell `required` this way.
    #[serde(default)]
    mandatory: bool,
    #[serde(default)]
    strict: bool,
    pattern: Option<String>,
    pattern_helper: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    unique_entries: Option<UniqueDefinition>,
    #[serde(default)]
    options: Vec<SchemaOption>,
    options_helper: Option<String>,
    properties: Option<Value>,
    items: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UniqueDefinition {
    Flag(bool),
    Property(String),
}

impl NodeDefinition {
    fn into_node(self) -> Result<SchemaNode, DefinitionError> {
        let kind = NodeKind::from(self.kind.as_str());
        let children = match &kind {
            NodeKind::Object => object_children(self.properties)?,
            NodeKind::Array => match self.items.or(self.properties) {
                Some(element) => Children::Items(Box::new(SchemaNode::from_definition(&element)?)),
                None => Children::None,
            },
            _ => Children::None,
        };

        let pattern = match self.pattern.filter(|p| !p.is_empty()) {
            Some(source) => Some(
                Pattern::new(&source)
                    .map_err(|e| DefinitionError::InvalidPattern { pattern: source, source: e })?,
            ),
            None => None,
        };

        let unique_entries = match self.unique_entries {
            Some(UniqueDefinition::Flag(enabled)) => UniqueEntries::from(enabled),
            Some(UniqueDefinition::Property(name)) => UniqueEntries::from(name),
            None => UniqueEntries::None,
        };

        let mut node = SchemaNode::new(kind);
        node.required = self.required || self.mandatory;
        node.strict = self.strict;
        node.pattern = pattern;
        node.pattern_helper = self.pattern_helper;
        node.min = self.min;
        node.max = self.max;
        node.min_length = self.min_length;
        node.max_length = self.max_length;
        node.unique_entries = unique_entries;
        node.options = self.options;
        node.options_helper = self.options_helper;
        node.children = children;
        Ok(node)
    }
}

fn object_children(properties: Option<Value>) -> Result<Children, DefinitionError> {
    match properties {
        None => Ok(Children::None),
        Some(Value::Object(map)) => {
            let mut schemas = IndexMap::with_capacity(map.len());
            for (name, definition) in &map {
                schemas.insert(name.clone(), SchemaNode::from_definition(definition)?);
            }
            Ok(Children::Properties(schemas))
        }
        Some(_) => Err(DefinitionError::InvalidProperties {
            kind: "object".to_string(),
            expected: "a map of property definitions",
        }),
    }
}

impl SchemaNode {
    /// Builds a node graph from a JSON definition.
    ///
    /// Unknown `type` tags are kept as [`NodeKind::Unknown`]; they are reported
    /// when the schema is used, not here.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bodyguard::{FieldPath, SchemaNode};
    /// use serde_json::json;
    ///
    /// let schema = SchemaNode::from_definition(&json!({
    ///     "type": "object",
    ///     "properties": { "n": { "type": "number", "min": 2, "max": 9 } }
    /// })).unwrap();
    ///
    /// let errors = schema.validate(Some(&json!({"n": 1})), &FieldPath::root()).unwrap();
    /// assert_eq!(errors.get("n"), Some("must be between 2 and 9"));
    /// ```
    pub fn from_definition(definition: &Value) -> Result<Self, DefinitionError> {
        NodeDefinition::deserialize(definition)?.into_node()
    }

    /// Parses `text` as JSON and builds a node graph from it.
    pub fn from_json_str(text: &str) -> Result<Self, DefinitionError> {
        let definition: Value = serde_json::from_str(text)?;
        Self::from_definition(&definition)
    }
}
