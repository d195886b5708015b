//! Schema nodes describing the expected shape of a request body.
//!
//! A [`SchemaNode`] is a plain, immutable description of one position in the
//! input tree. Nodes are normally built once at startup with the [`Schema`]
//! factory (or loaded from a JSON definition) and shared read-only across
//! requests.
//!
//! # Example
//!
//! ```rust
//! use bodyguard::{FieldPath, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .required()
//!     .strict()
//!     .property("name", Schema::string().required())
//!     .property("age", Schema::number().min(0));
//!
//! let errors = schema
//!     .validate(Some(&json!({"name": "Ada", "age": 36})), &FieldPath::root())
//!     .unwrap();
//! assert!(errors.is_empty());
//! ```

mod definition;
mod options;

use std::fmt::{self, Display};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ErrorMap, SchemaConfigError};
use crate::path::FieldPath;

pub use options::{CustomCheck, KeyExtractor, Pattern, SchemaOption, UniqueEntries};

/// The kind tag of a schema node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    /// Accepts any value without checks.
    Ignore,
    /// A tag this validator does not implement. Validating such a node is a
    /// configuration error.
    Unknown(String),
}

impl NodeKind {
    /// Returns the tag as written in schema definitions.
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::String => "string",
            NodeKind::Number => "number",
            NodeKind::Boolean => "boolean",
            NodeKind::Ignore => "ignore",
            NodeKind::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "object" => NodeKind::Object,
            "array" => NodeKind::Array,
            "string" => NodeKind::String,
            "number" => NodeKind::Number,
            "boolean" => NodeKind::Boolean,
            "ignore" => NodeKind::Ignore,
            other => NodeKind::Unknown(other.to_string()),
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Child schemas of an object or array node.
#[derive(Debug, Clone, Default)]
pub enum Children {
    #[default]
    None,
    /// Declared properties of an object, by name.
    Properties(IndexMap<String, SchemaNode>),
    /// The schema every array element must satisfy.
    Items(Box<SchemaNode>),
}

/// A declarative validation rule for one position in the input tree.
///
/// Every attribute is optional and only meaningful for some kinds; attributes
/// that do not apply to the node's kind are ignored.
///
/// | attribute | kinds |
/// |-----------|-------|
/// | `required` | all |
/// | `strict` | object |
/// | `custom_check` | object, array, string, number |
/// | `pattern`, `pattern_helper` | string, number |
/// | `min`, `max` | number |
/// | `min_length`, `max_length`, `unique_entries` | array |
/// | `options` | string, number |
/// | `options_helper` | string |
/// | `children` | object (properties), array (items) |
#[derive(Clone)]
pub struct SchemaNode {
    pub kind: NodeKind,
    pub required: bool,
    pub strict: bool,
    pub custom_check: Option<CustomCheck>,
    pub pattern: Option<Pattern>,
    pub pattern_helper: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub unique_entries: UniqueEntries,
    pub options: Vec<SchemaOption>,
    pub options_helper: Option<String>,
    pub children: Children,
}

impl SchemaNode {
    /// Creates a node of the given kind with no constraints.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            required: false,
            strict: false,
            custom_check: None,
            pattern: None,
            pattern_helper: None,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            unique_entries: UniqueEntries::None,
            options: Vec::new(),
            options_helper: None,
            children: Children::None,
        }
    }

    /// Marks the value as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Rejects object keys that are not declared as properties.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Declares an object property.
    ///
    /// Properties are validated in declaration order.
    pub fn property(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        match &mut self.children {
            Children::Properties(properties) => {
                properties.insert(name.into(), schema);
            }
            children => {
                let mut properties = IndexMap::new();
                properties.insert(name.into(), schema);
                *children = Children::Properties(properties);
            }
        }
        self
    }

    /// Sets the schema every array element must satisfy.
    pub fn items(mut self, schema: SchemaNode) -> Self {
        self.children = Children::Items(Box::new(schema));
        self
    }

    /// Adds a regular-expression constraint.
    ///
    /// Returns an error if the expression does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(Pattern::new(pattern)?);
        Ok(self)
    }

    /// Sets the hint appended to the pattern-mismatch message.
    pub fn pattern_helper(mut self, helper: impl Into<String>) -> Self {
        self.pattern_helper = Some(helper.into());
        self
    }

    /// Sets the inclusive lower bound of a number.
    pub fn min(mut self, min: impl Into<f64>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Sets the inclusive upper bound of a number.
    pub fn max(mut self, max: impl Into<f64>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Sets the minimum number of array elements.
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Sets the maximum number of array elements.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Configures duplicate detection for array elements.
    ///
    /// Accepts `true`/`false`, a property name, or a [`UniqueEntries`] value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bodyguard::{FieldPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::array()
    ///     .items(Schema::object().property("id", Schema::number()))
    ///     .unique_entries("id");
    ///
    /// let errors = schema
    ///     .validate(Some(&json!([{"id": 1}, {"id": 1}])), &FieldPath::root())
    ///     .unwrap();
    /// assert_eq!(errors.get("index-1.id"), Some("is a duplicate (1)"));
    /// ```
    pub fn unique_entries(mut self, unique: impl Into<UniqueEntries>) -> Self {
        self.unique_entries = unique.into();
        self
    }

    /// Detects duplicate array elements by the key returned from `key_fn`.
    ///
    /// A `null` key means the element takes no part in duplicate detection.
    pub fn unique_by<F>(mut self, key_fn: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.unique_entries = UniqueEntries::Extractor(Arc::new(key_fn));
        self
    }

    /// Adds an allowed value.
    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(SchemaOption::new(label, value));
        self
    }

    /// Replaces the allowed values.
    pub fn options(mut self, options: impl IntoIterator<Item = SchemaOption>) -> Self {
        self.options = options.into_iter().collect();
        self
    }

    /// Sets the hint appended to the invalid-option message of a string.
    /// Number nodes report invalid options without a hint.
    pub fn options_helper(mut self, helper: impl Into<String>) -> Self {
        self.options_helper = Some(helper.into());
        self
    }

    /// Attaches a custom check.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bodyguard::{ErrorMap, FieldPath, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::object()
    ///     .property("from", Schema::number())
    ///     .property("to", Schema::number())
    ///     .custom_check(|path, _node, value| {
    ///         let mut errors = ErrorMap::new();
    ///         if value["from"].as_f64() > value["to"].as_f64() {
    ///             errors.insert(path, "from must not be after to");
    ///         }
    ///         errors
    ///     });
    ///
    /// let errors = schema
    ///     .validate(Some(&json!({"from": 5, "to": 1})), &FieldPath::root())
    ///     .unwrap();
    /// assert_eq!(errors.get("body"), Some("from must not be after to"));
    /// ```
    pub fn custom_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str, &SchemaNode, &Value) -> ErrorMap + Send + Sync + 'static,
    {
        self.custom_check = Some(Arc::new(check));
        self
    }

    /// Returns the declared object properties, if any.
    pub fn property_schemas(&self) -> Option<&IndexMap<String, SchemaNode>> {
        match &self.children {
            Children::Properties(properties) => Some(properties),
            _ => None,
        }
    }

    /// Returns the array element schema, if any.
    pub fn element_schema(&self) -> Option<&SchemaNode> {
        match &self.children {
            Children::Items(items) => Some(items),
            _ => None,
        }
    }

    /// Validates `value` against this node. `None` means the value is absent.
    ///
    /// Returns the error map for this subtree, or a [`SchemaConfigError`] if
    /// the schema contains a node of unknown kind.
    pub fn validate(
        &self,
        value: Option<&Value>,
        path: &FieldPath,
    ) -> Result<ErrorMap, SchemaConfigError> {
        crate::validate::validate_node(self, value, path)
    }
}

impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaNode")
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("strict", &self.strict)
            .field("custom_check", &self.custom_check.is_some())
            .field("pattern", &self.pattern)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("unique_entries", &self.unique_entries)
            .field("options", &self.options)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

// Schemas are shared across concurrent requests.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaNode>();
    assert_sync::<SchemaNode>();
};

/// Entry point for creating schema nodes.
///
/// # Example
///
/// ```rust
/// use bodyguard::Schema;
///
/// let tags = Schema::array()
///     .required()
///     .items(Schema::string().required().pattern("^[a-z-]+$").unwrap())
///     .min_length(1)
///     .max_length(10)
///     .unique_entries(true);
/// ```
pub struct Schema;

impl Schema {
    /// Creates an object node.
    pub fn object() -> SchemaNode {
        SchemaNode::new(NodeKind::Object)
    }

    /// Creates an array node. Set the element schema with [`SchemaNode::items`].
    pub fn array() -> SchemaNode {
        SchemaNode::new(NodeKind::Array)
    }

    /// Creates a string node.
    pub fn string() -> SchemaNode {
        SchemaNode::new(NodeKind::String)
    }

    /// Creates a number node.
    pub fn number() -> SchemaNode {
        SchemaNode::new(NodeKind::Number)
    }

    /// Creates a boolean node.
    pub fn boolean() -> SchemaNode {
        SchemaNode::new(NodeKind::Boolean)
    }

    /// Creates a node that accepts anything.
    pub fn ignore() -> SchemaNode {
        SchemaNode::new(NodeKind::Ignore)
    }

    /// Creates a node from a kind tag, e.g. `"string"`.
    ///
    /// Unrecognized tags produce a node of [`NodeKind::Unknown`].
    pub fn of_kind(tag: &str) -> SchemaNode {
        SchemaNode::new(NodeKind::from(tag))
    }
}
