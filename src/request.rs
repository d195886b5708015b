//! Top-level request validation.
//!
//! [`validate_request`] runs a schema against a parsed body and reports whether
//! it is valid. Failures are handed to a [`ValidationObserver`] so callers can
//! route diagnostics wherever they like; the default observer writes through
//! the `log` facade.

use std::sync::Arc;

use serde_json::Value;
use stillwater::Validation;

use crate::error::{ErrorMap, SchemaConfigError};
use crate::path::FieldPath;
use crate::response::{failure_response, Response};
use crate::schema::SchemaNode;
use crate::ValidationResult;

/// Receives the error map of every failed validation.
pub trait ValidationObserver: Send + Sync {
    /// Called once per failed validation with the complete error map.
    fn on_failure(&self, errors: &ErrorMap);
}

/// Logs failed validations at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl ValidationObserver for LogObserver {
    fn on_failure(&self, errors: &ErrorMap) {
        log::info!("[400] Validation Errors - {}", errors);
    }
}

/// The result of validating one request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// True iff no errors were found.
    pub valid: bool,
    /// The errors, present only when `valid` is false.
    pub errors: Option<ErrorMap>,
}

impl Outcome {
    fn from_errors(errors: ErrorMap) -> Self {
        if errors.is_empty() {
            Self {
                valid: true,
                errors: None,
            }
        } else {
            Self {
                valid: false,
                errors: Some(errors),
            }
        }
    }

    /// Returns true if the body satisfied the schema.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Returns the error map of an invalid body.
    pub fn errors(&self) -> Option<&ErrorMap> {
        self.errors.as_ref()
    }

    /// Builds the 400 response for an invalid body.
    pub fn failure_response(&self) -> Option<Response> {
        self.errors.as_ref().map(failure_response)
    }

    /// Converts the outcome into a stillwater `Validation`.
    pub fn into_validation(self) -> ValidationResult<()> {
        match self.errors {
            Some(errors) => Validation::Failure(errors),
            None => Validation::Success(()),
        }
    }
}

/// Validates request bodies and reports failures to an observer.
///
/// # Example
///
/// ```rust
/// use bodyguard::{RequestValidator, Schema};
/// use serde_json::json;
///
/// let schema = Schema::object().required().property("id", Schema::number().required());
/// let validator = RequestValidator::new();
///
/// let outcome = validator.validate(&schema, Some(&json!({"id": 7}))).unwrap();
/// assert!(outcome.valid);
///
/// let outcome = validator.validate(&schema, None).unwrap();
/// assert_eq!(outcome.errors.unwrap().get("body"), Some("is required"));
/// ```
#[derive(Clone)]
pub struct RequestValidator {
    observer: Arc<dyn ValidationObserver>,
}

impl RequestValidator {
    /// Creates a validator that logs failures through [`LogObserver`].
    pub fn new() -> Self {
        Self {
            observer: Arc::new(LogObserver),
        }
    }

    /// Replaces the failure observer.
    pub fn with_observer(mut self, observer: Arc<dyn ValidationObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Validates `body` against `schema`. `None` means no body was sent.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaConfigError`] if the schema contains a node of unknown
    /// kind. Invalid input is never an error; it is reported in the outcome.
    pub fn validate(
        &self,
        schema: &SchemaNode,
        body: Option<&Value>,
    ) -> Result<Outcome, SchemaConfigError> {
        let outcome = Outcome::from_errors(schema.validate(body, &FieldPath::root())?);
        if let Some(errors) = &outcome.errors {
            self.observer.on_failure(errors);
        }
        Ok(outcome)
    }
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validates `body` against `schema` with the default observer.
///
/// # Example
///
/// ```rust
/// use bodyguard::{validate_request, Schema};
/// use serde_json::json;
///
/// let schema = Schema::number().min(2).max(9);
/// let outcome = validate_request(&schema, Some(&json!(1))).unwrap();
///
/// assert!(!outcome.valid);
/// assert_eq!(outcome.errors.unwrap().get("body"), Some("must be between 2 and 9"));
/// ```
pub fn validate_request(
    schema: &SchemaNode,
    body: Option<&Value>,
) -> Result<Outcome, SchemaConfigError> {
    RequestValidator::new().validate(schema, body)
}
