//! Tests for the top-level request validation driver.

use std::sync::Arc;

use bodyguard::{
    validate_request, ErrorMap, RequestValidator, Schema, SchemaConfigError, SchemaNode,
    ValidationObserver,
};
use parking_lot::Mutex;
use serde_json::json;

#[derive(Default)]
struct RecordingObserver {
    failures: Mutex<Vec<ErrorMap>>,
}

impl ValidationObserver for RecordingObserver {
    fn on_failure(&self, errors: &ErrorMap) {
        self.failures.lock().push(errors.clone());
    }
}

fn user_schema() -> SchemaNode {
    Schema::object()
        .required()
        .strict()
        .property("email", Schema::string().required().pattern("@").unwrap())
        .property(
            "roles",
            Schema::array()
                .min_length(1)
                .unique_entries(true)
                .items(Schema::string().option("admin", "admin").option("user", "user")),
        )
        .property("age", Schema::number().min(0))
        .property("active", Schema::boolean())
}

#[test]
fn test_valid_iff_no_errors() {
    let bodies = [
        json!({"email": "a@b.c"}),
        json!({"email": "a@b.c", "roles": ["admin", "user"], "age": 3, "active": true}),
        json!({"email": "nope"}),
        json!({"email": "a@b.c", "roles": []}),
        json!({"email": "a@b.c", "extra": 1}),
        json!(null),
    ];

    for body in &bodies {
        let outcome = validate_request(&user_schema(), Some(body)).unwrap();
        assert_eq!(outcome.valid, outcome.errors.is_none());
        if let Some(errors) = &outcome.errors {
            assert!(!errors.is_empty());
        }
    }
}

#[test]
fn test_validation_is_repeatable() {
    let schema = user_schema();
    let body = json!({"email": "nope", "roles": ["admin", "admin", "root"], "age": -1});

    let first = validate_request(&schema, Some(&body)).unwrap();
    let second = validate_request(&schema, Some(&body)).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.errors.unwrap(),
        ErrorMap::from([
            ("email", "does not match pattern"),
            ("roles.index-1", "is a duplicate (admin)"),
            ("age", "must be greater than 0"),
        ])
    );
}

#[test]
fn test_observer_sees_failures_only() {
    let observer = Arc::new(RecordingObserver::default());
    let validator = RequestValidator::new().with_observer(observer.clone());

    let outcome = validator
        .validate(&user_schema(), Some(&json!({"email": "a@b.c"})))
        .unwrap();
    assert!(outcome.valid);
    assert!(observer.failures.lock().is_empty());

    let outcome = validator.validate(&user_schema(), None).unwrap();
    assert!(!outcome.valid);

    let failures = observer.failures.lock();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0], ErrorMap::from([("body", "is required")]));
}

#[test]
fn test_unknown_kind_aborts_validation() {
    let observer = Arc::new(RecordingObserver::default());
    let validator = RequestValidator::new().with_observer(observer.clone());
    let schema = Schema::object()
        .property("ok", Schema::string().required())
        .property("when", Schema::of_kind("date"));

    let result = validator.validate(&schema, Some(&json!({"when": "today"})));
    assert_eq!(
        result,
        Err(SchemaConfigError::UnknownKind {
            kind: "date".to_string(),
            path: "when".to_string(),
        })
    );
    assert!(observer.failures.lock().is_empty());
}

#[test]
fn test_unknown_kind_reached_through_array() {
    let schema = Schema::array().items(Schema::of_kind("uuid"));

    let err = validate_request(&schema, Some(&json!(["x"]))).unwrap_err();
    assert_eq!(err.to_string(), "unknown schema type 'uuid' at 'index-0'");

    // Never reached: the array is empty.
    assert!(validate_request(&schema, Some(&json!([]))).unwrap().valid);
}

#[test]
fn test_failure_response_body() {
    let outcome = validate_request(&user_schema(), Some(&json!({}))).unwrap();
    let response = outcome.failure_response().unwrap();

    assert_eq!(response.status_code, 400);
    assert_eq!(
        response.body_json().unwrap(),
        json!({
            "message": "Validation Errors",
            "validationErrors": { "email": "is required" }
        })
    );
}

#[test]
fn test_outcome_as_validation() {
    let valid = validate_request(&user_schema(), Some(&json!({"email": "a@b.c"}))).unwrap();
    assert!(valid.into_validation().is_success());

    let invalid = validate_request(&user_schema(), Some(&json!({"email": 1}))).unwrap();
    let errors = invalid.into_validation().into_result().unwrap_err();
    assert_eq!(errors.get("email"), Some("must be of type string"));
}
