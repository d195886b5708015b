//! Integration tests for array schema validation.

use bodyguard::{validate_request, ErrorMap, Schema, SchemaNode};
use serde_json::{json, Value};

fn errors_of(schema: &SchemaNode, body: Option<&Value>) -> ErrorMap {
    validate_request(schema, body)
        .unwrap()
        .errors
        .unwrap_or_default()
}

fn nested_schema() -> SchemaNode {
    Schema::array()
        .required()
        .custom_check(|_, _, _| ErrorMap::from([("body", "function has errors")]))
        .items(
            Schema::array()
                .required()
                .items(Schema::array().required()),
        )
}

fn numbers() -> SchemaNode {
    Schema::array().required().items(Schema::number().required())
}

fn prop_objects() -> SchemaNode {
    Schema::object()
        .required()
        .property("prop", Schema::number().required())
}

#[test]
fn test_missing_array_is_required() {
    assert_eq!(
        errors_of(&nested_schema(), None),
        ErrorMap::from([("body", "is required")])
    );
}

#[test]
fn test_non_array_body() {
    assert_eq!(
        errors_of(&nested_schema(), Some(&json!("a non array body"))),
        ErrorMap::from([("body", "must be of type array")])
    );
}

#[test]
fn test_nested_element_type() {
    let errors = errors_of(&nested_schema(), Some(&json!([[""]])));
    assert_eq!(errors.get("index-0.index-0"), Some("must be of type array"));
}

#[test]
fn test_custom_check_runs_on_empty_array() {
    let errors = errors_of(&nested_schema(), Some(&json!([])));
    assert_eq!(errors, ErrorMap::from([("body", "function has errors")]));
}

#[test]
fn test_custom_check_needs_element_schema() {
    let schema = Schema::array().custom_check(|_, _, _| ErrorMap::from([("body", "never")]));
    assert!(errors_of(&schema, Some(&json!([1, 2]))).is_empty());
}

#[test]
fn test_min_length() {
    let schema = numbers().min_length(2);
    assert_eq!(
        errors_of(&schema, Some(&json!([1]))),
        ErrorMap::from([("body", "length must be at least 2")])
    );
    assert!(errors_of(&schema, Some(&json!([1, 2]))).is_empty());
}

#[test]
fn test_max_length() {
    let schema = numbers().max_length(4);
    assert_eq!(
        errors_of(&schema, Some(&json!([1, 2, 3, 4, 5]))),
        ErrorMap::from([("body", "length must not exceed 4")])
    );
    assert!(errors_of(&schema, Some(&json!([1, 2, 3, 4]))).is_empty());
}

#[test]
fn test_length_between() {
    let schema = numbers().min_length(2).max_length(4);
    for body in [json!([1]), json!([1, 2, 3, 4, 5])] {
        assert_eq!(
            errors_of(&schema, Some(&body)),
            ErrorMap::from([("body", "length must be between 2 and 4")])
        );
    }
}

#[test]
fn test_length_failure_skips_element_checks() {
    let schema = numbers().min_length(3);
    let errors = errors_of(&schema, Some(&json!(["a"])));
    assert_eq!(errors, ErrorMap::from([("body", "length must be at least 3")]));
}

#[test]
fn test_duplicate_primitives() {
    let schema = numbers().min_length(2).unique_entries(true);
    let errors = errors_of(&schema, Some(&json!([1, 1, 2, 1, 3])));
    assert_eq!(
        errors,
        ErrorMap::from([
            ("index-1", "is a duplicate (1)"),
            ("index-3", "is a duplicate (1)"),
        ])
    );
    assert!(errors_of(&schema, Some(&json!([1, 2, 3]))).is_empty());
}

#[test]
fn test_uniqueness_disabled() {
    let schema = numbers().unique_entries(false);
    assert!(errors_of(&schema, Some(&json!([1, 1, 1]))).is_empty());
}

#[test]
fn test_duplicate_by_property() {
    let schema = Schema::array()
        .required()
        .min_length(2)
        .unique_entries("prop")
        .items(prop_objects());

    let body = json!([{"prop": 1}, {"prop": 1}, {"prop": 2}, {"prop": 1}]);
    assert_eq!(
        errors_of(&schema, Some(&body)),
        ErrorMap::from([
            ("index-1.prop", "is a duplicate (1)"),
            ("index-3.prop", "is a duplicate (1)"),
        ])
    );
}

#[test]
fn test_duplicate_by_extractor_in_nested_array() {
    let schema = Schema::array().required().items(
        Schema::array()
            .required()
            .min_length(2)
            .unique_by(|element| element["prop"].clone())
            .items(prop_objects()),
    );

    let body = json!([[{"prop": 1}, {"prop": 1}, {"prop": 2}, {"prop": 1}]]);
    assert_eq!(
        errors_of(&schema, Some(&body)),
        ErrorMap::from([
            ("index-0.index-1", "is a duplicate (1)"),
            ("index-0.index-3", "is a duplicate (1)"),
        ])
    );
}

#[test]
fn test_duplicate_by_property_in_nested_array() {
    let schema = Schema::array().required().items(
        Schema::array()
            .required()
            .unique_entries("prop")
            .items(prop_objects()),
    );

    let body = json!([[{"prop": 5}, {"prop": 5}]]);
    assert_eq!(
        errors_of(&schema, Some(&body)),
        ErrorMap::from([("index-0.index-1.prop", "is a duplicate (5)")])
    );
}

#[test]
fn test_duplicate_primitives_in_nested_array() {
    let schema = Schema::array()
        .required()
        .items(numbers().unique_entries(true));

    let body = json!([[1, 1, 2, 1], [3, 4]]);
    assert_eq!(
        errors_of(&schema, Some(&body)),
        ErrorMap::from([
            ("index-0.index-1", "is a duplicate (1)"),
            ("index-0.index-3", "is a duplicate (1)"),
        ])
    );
}

#[test]
fn test_duplicates_replace_element_errors() {
    let schema = numbers().unique_entries(true);
    let errors = errors_of(&schema, Some(&json!([1, 1, "x"])));
    assert_eq!(errors, ErrorMap::from([("index-1", "is a duplicate (1)")]));
}

#[test]
fn test_empty_keys_are_never_duplicates() {
    let schema = Schema::array().unique_entries(true);
    let body = json!([null, null, false, false, 0, 0, "", ""]);
    assert!(errors_of(&schema, Some(&body)).is_empty());
}

#[test]
fn test_string_and_number_keys_collide() {
    let schema = Schema::array().unique_entries(true);
    let errors = errors_of(&schema, Some(&json!([1, "1"])));
    assert_eq!(errors, ErrorMap::from([("index-1", "is a duplicate (1)")]));
}

#[test]
fn test_element_option_errors() {
    let schema = Schema::array()
        .required()
        .min_length(2)
        .unique_entries(true)
        .items(
            Schema::string()
                .required()
                .pattern("^[a-z]+$")
                .unwrap()
                .pattern_helper("")
                .option("x", "x"),
        );

    let errors = errors_of(&schema, Some(&json!(["x", "y"])));
    assert_eq!(errors, ErrorMap::from([("index-1", "not a valid option")]));
}

#[test]
fn test_valid_nested_array() {
    let schema = Schema::array()
        .required()
        .custom_check(|_, _, _| ErrorMap::new())
        .min_length(2)
        .max_length(4)
        .items(Schema::array().required());

    assert!(validate_request(&schema, Some(&json!([[], [], []])))
        .unwrap()
        .valid);
}

#[test]
fn test_optional_array_may_be_absent() {
    let schema = Schema::array()
        .custom_check(|_, _, _| ErrorMap::from([("body", "never")]))
        .items(Schema::number());

    assert!(errors_of(&schema, None).is_empty());
    assert!(errors_of(&schema, Some(&json!(null))).is_empty());
}

#[test]
fn test_empty_property_name_disables_uniqueness() {
    let schema = Schema::array().unique_entries("").items(Schema::object());
    assert!(errors_of(&schema, Some(&json!([{"": 1}, {"": 1}]))).is_empty());
}
