//! Named request schemas.
//!
//! This module provides the [`SchemaRegistry`] type that stores one schema per
//! endpoint so handlers can look theirs up by name.

use parking_lot::RwLock;
use rayon::prelude::*;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{DefinitionError, SchemaConfigError};
use crate::request::{Outcome, RequestValidator};
use crate::schema::SchemaNode;

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, Arc<SchemaNode>>>>;

/// A thread-safe registry of named request schemas.
///
/// Registration takes a write lock; lookups and validation only read, so any
/// number of requests can validate concurrently against the same schemas.
///
/// # Example
///
/// ```rust
/// use bodyguard::{Schema, SchemaRegistry};
/// use serde_json::json;
///
/// let registry = SchemaRegistry::new();
/// registry
///     .register("createUser", Schema::object()
///         .required()
///         .property("email", Schema::string().required()))
///     .unwrap();
///
/// let outcome = registry.validate("createUser", Some(&json!({}))).unwrap();
/// assert_eq!(outcome.errors.unwrap().get("email"), Some("is required"));
/// ```
pub struct SchemaRegistry {
    schemas: SchemaMap,
    validator: RequestValidator,
}

impl SchemaRegistry {
    /// Creates an empty registry that logs validation failures.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
            validator: RequestValidator::new(),
        }
    }

    /// Replaces the validator used by [`validate`](Self::validate).
    pub fn with_validator(mut self, validator: RequestValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Registers a schema with the given name.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::DuplicateName` if the name is already registered.
    pub fn register(&self, name: impl Into<String>, schema: SchemaNode) -> Result<(), RegistryError> {
        let name = name.into();
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }

        schemas.insert(name, Arc::new(schema));
        Ok(())
    }

    /// Loads a schema from a JSON definition and registers it.
    pub fn register_definition(
        &self,
        name: impl Into<String>,
        definition: &Value,
    ) -> Result<(), RegistryError> {
        let schema = SchemaNode::from_definition(definition)?;
        self.register(name, schema)
    }

    /// Retrieves a schema by name.
    pub fn get(&self, name: &str) -> Option<Arc<SchemaNode>> {
        self.schemas.read().get(name).cloned()
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Validates a body against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::SchemaNotFound` if the name is not registered,
    /// or `RegistryError::Config` if the schema is malformed.
    pub fn validate(&self, schema_name: &str, body: Option<&Value>) -> Result<Outcome, RegistryError> {
        let schema = self.lookup(schema_name)?;
        Ok(self.validator.validate(&schema, body)?)
    }

    /// Validates many bodies against a named schema in parallel.
    ///
    /// Outcomes are returned in input order.
    pub fn validate_batch(
        &self,
        schema_name: &str,
        bodies: &[Value],
    ) -> Result<Vec<Outcome>, RegistryError> {
        let schema = self.lookup(schema_name)?;
        let outcomes = bodies
            .par_iter()
            .map(|body| self.validator.validate(&schema, Some(body)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(outcomes)
    }

    fn lookup(&self, schema_name: &str) -> Result<Arc<SchemaNode>, RegistryError> {
        self.get(schema_name)
            .ok_or_else(|| RegistryError::SchemaNotFound(schema_name.to_string()))
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for SchemaRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
            validator: self.validator.clone(),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a schema with a name that already exists.
    #[error("schema '{0}' already registered")]
    DuplicateName(String),

    /// Attempted to validate with a schema name that doesn't exist.
    #[error("schema '{0}' not found")]
    SchemaNotFound(String),

    /// A JSON definition could not be loaded.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// The registered schema is malformed.
    #[error(transparent)]
    Config(#[from] SchemaConfigError),
}
