//! # Bodyguard
//!
//! Declarative validation of HTTP request bodies for serverless handlers.
//!
//! ## Overview
//!
//! A request schema is a tree of [`SchemaNode`]s describing objects, arrays,
//! strings, numbers and booleans. Validating a parsed body walks that tree
//! depth-first and collects every problem into an [`ErrorMap`] keyed by field
//! path (`"body"`, `"user.email"`, `"items.index-2.sku"`). A body is valid iff
//! the map is empty.
//!
//! Sibling properties and array elements are all reported; within a single
//! node the first failing check wins (a missing value is not also reported
//! as mistyped).
//!
//! ## Core Types
//!
//! - [`Schema`]: factory for schema nodes
//! - [`SchemaNode`]: one validation rule, shared read-only across requests
//! - [`FieldPath`]: location of a value inside the body
//! - [`ErrorMap`]: field path to message, merged last-writer-wins
//! - [`validate_request`] / [`RequestValidator`]: the entry point
//! - [`Controller`]: wraps a handler with parsing, validation and error mapping
//!
//! ## Example
//!
//! ```rust
//! use bodyguard::{validate_request, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::object()
//!     .required()
//!     .strict()
//!     .property("email", Schema::string().required().pattern("@").unwrap())
//!     .property("quantity", Schema::number().required().min(1).max(10))
//!     .property("tags", Schema::array().items(Schema::string()).unique_entries(true));
//!
//! let outcome = validate_request(&schema, Some(&json!({
//!     "email": "ada@example.com",
//!     "quantity": 20,
//!     "tags": ["a", "a"],
//!     "coupon": "FREE"
//! }))).unwrap();
//!
//! let errors = outcome.errors.unwrap();
//! assert_eq!(errors.get("quantity"), Some("must be between 1 and 10"));
//! assert_eq!(errors.get("tags.index-1"), Some("is a duplicate (a)"));
//! assert_eq!(errors.get("coupon"), Some("is not allowed on this object"));
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod path;
pub mod registry;
pub mod request;
pub mod response;
pub mod schema;
pub mod validate;

pub use config::ControllerConfig;
pub use controller::{Controller, Event, HandlerRequest};
pub use error::{DefinitionError, ErrorMap, SchemaConfigError};
pub use path::{FieldPath, PathSegment};
pub use registry::{RegistryError, SchemaRegistry};
pub use request::{validate_request, LogObserver, Outcome, RequestValidator, ValidationObserver};
pub use response::{failure_response, message_response, response, Response, StatusCode};
pub use schema::{
    Children, CustomCheck, KeyExtractor, NodeKind, Pattern, Schema, SchemaNode, SchemaOption,
    UniqueEntries,
};
pub use validate::validate_node;

/// Type alias for validation results carrying an error map.
pub type ValidationResult<T> = stillwater::Validation<T, ErrorMap>;
