//! Error types for validation.
//!
//! Validation failures are data: they are collected into an [`ErrorMap`] keyed by
//! field path. Schema-authoring mistakes are a separate category and surface as
//! [`SchemaConfigError`] or [`DefinitionError`].

mod config_error;
mod error_map;

pub use config_error::{DefinitionError, SchemaConfigError};
pub use error_map::ErrorMap;
