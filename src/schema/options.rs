//! Constraint values carried by a [`SchemaNode`](super::SchemaNode).

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ErrorMap;

use super::SchemaNode;

/// A caller-supplied check run after the built-in checks of a node pass.
///
/// Called with the rendered field path, the node it is attached to, and the
/// value being validated. It must be pure and report problems only through the
/// returned map.
pub type CustomCheck = Arc<dyn Fn(&str, &SchemaNode, &Value) -> ErrorMap + Send + Sync>;

/// Derives the comparison key used for duplicate detection in an array.
pub type KeyExtractor = Arc<dyn Fn(&Value) -> Value + Send + Sync>;

/// A compiled regular expression together with its source text.
///
/// Matching is unanchored: the value passes if the expression matches
/// anywhere in it. Use `^` and `$` to match the whole value.
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Example
    ///
    /// ```rust
    /// use bodyguard::Pattern;
    ///
    /// let pattern = Pattern::new("^[a-z]+$").unwrap();
    /// assert!(pattern.is_match("abc"));
    /// assert!(!pattern.is_match("ABC"));
    ///
    /// assert!(Pattern::new("[unclosed").is_err());
    /// ```
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: source.to_string(),
            regex: Regex::new(source)?,
        })
    }

    /// Returns the pattern source text.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests `text` against the pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

/// One allowed value of an enumerated string or number field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaOption {
    /// Display label, not used for matching.
    pub label: String,
    /// The accepted value in string form.
    pub value: String,
}

impl SchemaOption {
    /// Creates an option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// How an array decides that two elements are duplicates.
#[derive(Clone, Default)]
pub enum UniqueEntries {
    /// Duplicates are allowed.
    #[default]
    None,
    /// Elements are compared by their own value.
    Value,
    /// Elements are compared by the named property.
    Property(String),
    /// Elements are compared by the key returned from the extractor.
    Extractor(KeyExtractor),
}

impl UniqueEntries {
    /// Returns true unless duplicates are allowed.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, UniqueEntries::None)
    }
}

impl fmt::Debug for UniqueEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueEntries::None => write!(f, "None"),
            UniqueEntries::Value => write!(f, "Value"),
            UniqueEntries::Property(name) => f.debug_tuple("Property").field(name).finish(),
            UniqueEntries::Extractor(_) => write!(f, "Extractor(..)"),
        }
    }
}

impl From<bool> for UniqueEntries {
    fn from(enabled: bool) -> Self {
        if enabled {
            UniqueEntries::Value
        } else {
            UniqueEntries::None
        }
    }
}

/// An empty property name disables duplicate detection.
impl From<&str> for UniqueEntries {
    fn from(property: &str) -> Self {
        UniqueEntries::from(property.to_string())
    }
}

impl From<String> for UniqueEntries {
    fn from(property: String) -> Self {
        if property.is_empty() {
            UniqueEntries::None
        } else {
            UniqueEntries::Property(property)
        }
    }
}
