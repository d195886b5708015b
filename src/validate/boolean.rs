//! Boolean validation.

use serde_json::Value;

use crate::error::ErrorMap;
use crate::path::FieldPath;
use crate::schema::SchemaNode;

use super::missing;

pub(super) fn validate(node: &SchemaNode, value: Option<&Value>, path: &FieldPath) -> ErrorMap {
    match value {
        None => missing(node, path),
        Some(Value::Bool(_)) => ErrorMap::new(),
        Some(_) => ErrorMap::single(path, "must be of type boolean"),
    }
}
