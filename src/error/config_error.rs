//! Schema-authoring errors.
//!
//! These are never produced by bad input. They mean the schema itself is
//! malformed and are propagated to the caller instead of being folded into an
//! [`ErrorMap`](super::ErrorMap).

use thiserror::Error;

/// A schema node could not be validated because the schema is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaConfigError {
    /// The node declares a kind the dispatcher does not implement.
    #[error("unknown schema type '{kind}' at '{path}'")]
    UnknownKind {
        /// The unrecognized kind tag.
        kind: String,
        /// Rendered path of the node that carries the tag.
        path: String,
    },
}

/// A JSON schema definition could not be turned into a node graph.
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The definition is not valid JSON or does not have the expected shape.
    #[error("malformed schema definition: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A `pattern` keyword is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The pattern source text.
        pattern: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// `properties` has the wrong shape for the node's kind.
    #[error("'properties' of a {kind} node must be {expected}")]
    InvalidProperties {
        /// The node kind.
        kind: String,
        /// The shape that was expected.
        expected: &'static str,
    },
}
