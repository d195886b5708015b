//! Tests for field paths and how they key the error map.

use bodyguard::{validate_request, FieldPath, PathSegment, Schema};
use serde_json::json;

#[test]
fn test_root_renders_as_body() {
    let root = FieldPath::root();
    assert!(root.is_root());
    assert!(root.is_empty());
    assert_eq!(root.to_string(), "body");
}

#[test]
fn test_mixed_segments() {
    let path = FieldPath::from_field("orders")
        .push_index(2)
        .push_field("lines")
        .push_index(0)
        .push_field("sku");

    assert_eq!(path.to_string(), "orders.index-2.lines.index-0.sku");
    assert_eq!(path.len(), 5);
    assert_eq!(path.last(), Some(&PathSegment::field("sku")));
}

#[test]
fn test_push_does_not_mutate_parent() {
    let parent = FieldPath::from_field("a");
    let child = parent.push_index(1);

    assert_eq!(parent.to_string(), "a");
    assert_eq!(child.to_string(), "a.index-1");
    assert_eq!(
        child.segments().cloned().collect::<Vec<_>>(),
        vec![PathSegment::field("a"), PathSegment::index(1)]
    );
}

#[test]
fn test_top_level_array_elements_have_no_body_prefix() {
    let schema = Schema::array().items(Schema::object().property("id", Schema::number().required()));
    let errors = validate_request(&schema, Some(&json!([{"id": 1}, {}])))
        .unwrap()
        .errors
        .unwrap();

    assert_eq!(errors.paths().collect::<Vec<_>>(), vec!["index-1.id"]);
}
