//! Number validation.
//!
//! Zero is a present value; only an absent value counts as missing. A JSON
//! `null` is present and fails the type check.

use serde_json::Value;

use crate::error::ErrorMap;
use crate::path::FieldPath;
use crate::schema::SchemaNode;

use super::{missing, number_text, option_violation, pattern_violation, run_custom_check};

pub(super) fn validate(node: &SchemaNode, value: Option<&Value>, path: &FieldPath) -> ErrorMap {
    let Some(value) = value else {
        return missing(node, path);
    };
    let Value::Number(number) = value else {
        return ErrorMap::single(path, "must be of type number");
    };

    // Patterns and options match against the number as written.
    let text = number_text(number);

    if let Some(message) = pattern_violation(node, &text) {
        return ErrorMap::single(path, message);
    }
    if let Some(message) = number.as_f64().and_then(|n| range_violation(node, n)) {
        return ErrorMap::single(path, message);
    }
    if let Some(message) = option_violation(node, &text, None) {
        return ErrorMap::single(path, message);
    }

    run_custom_check(node, path, value)
}

/// Both bounds set: one combined message. Otherwise each bound on its own.
fn range_violation(node: &SchemaNode, n: f64) -> Option<String> {
    match (node.min, node.max) {
        (Some(min), Some(max)) => {
            (n < min || n > max).then(|| format!("must be between {} and {}", min, max))
        }
        (Some(min), None) if n < min => Some(format!("must be greater than {}", min)),
        (None, Some(max)) if n > max => Some(format!("must be less than {}", max)),
        _ => None,
    }
}
