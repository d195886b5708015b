//! String validation.

use serde_json::Value;

use crate::error::ErrorMap;
use crate::path::FieldPath;
use crate::schema::SchemaNode;

use super::{missing, option_violation, pattern_violation, run_custom_check};

/// Empty values (absent, `null`, `""`, `false` and `0`) count as missing, so an
/// optional string may always be sent empty regardless of its pattern.
pub(super) fn validate(node: &SchemaNode, value: Option<&Value>, path: &FieldPath) -> ErrorMap {
    let value = match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => return missing(node, path),
        Some(Value::String(s)) if s.is_empty() => return missing(node, path),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => return missing(node, path),
        Some(value) => value,
    };
    let Some(text) = value.as_str() else {
        return ErrorMap::single(path, "must be of type string");
    };

    if let Some(message) = pattern_violation(node, text) {
        return ErrorMap::single(path, message);
    }
    if let Some(message) = option_violation(node, text, node.options_helper.as_deref()) {
        return ErrorMap::single(path, message);
    }

    run_custom_check(node, path, value)
}
