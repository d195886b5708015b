//! Recursive validation of a value against a schema node.
//!
//! [`validate_node`] dispatches on the node's kind to one validator per kind.
//! Object and array validators recurse back through the dispatcher, merging the
//! error maps of their children bottom-up.
//!
//! Within one node the first failing blocking check wins: a missing or
//! mistyped value suppresses all later checks on that node. Sibling properties
//! and elements are always all checked.

mod array;
mod boolean;
mod number;
mod object;
mod string;

use serde_json::{Number, Value};

use crate::error::{ErrorMap, SchemaConfigError};
use crate::path::FieldPath;
use crate::schema::{NodeKind, SchemaNode};

const IS_REQUIRED: &str = "is required";

/// Validates `value` against `node`. `None` means the value is absent.
///
/// An `ignore` node accepts anything. A node of unknown kind is a schema
/// authoring mistake and fails the whole call with [`SchemaConfigError`].
pub fn validate_node(
    node: &SchemaNode,
    value: Option<&Value>,
    path: &FieldPath,
) -> Result<ErrorMap, SchemaConfigError> {
    match &node.kind {
        NodeKind::Object => object::validate(node, value, path),
        NodeKind::Array => array::validate(node, value, path),
        NodeKind::String => Ok(string::validate(node, value, path)),
        NodeKind::Number => Ok(number::validate(node, value, path)),
        NodeKind::Boolean => Ok(boolean::validate(node, value, path)),
        NodeKind::Ignore => Ok(ErrorMap::new()),
        NodeKind::Unknown(kind) => Err(SchemaConfigError::UnknownKind {
            kind: kind.clone(),
            path: path.to_string(),
        }),
    }
}

/// Result for a value that is missing: an error only if the node requires it.
fn missing(node: &SchemaNode, path: &FieldPath) -> ErrorMap {
    if node.required {
        ErrorMap::single(path, IS_REQUIRED)
    } else {
        ErrorMap::new()
    }
}

/// Appends ` (hint)` when a non-empty hint is configured.
fn with_hint(message: &str, hint: Option<&str>) -> String {
    match hint.filter(|h| !h.is_empty()) {
        Some(hint) => format!("{} ({})", message, hint),
        None => message.to_string(),
    }
}

fn pattern_violation(node: &SchemaNode, text: &str) -> Option<String> {
    let pattern = node.pattern.as_ref()?;
    if pattern.is_match(text) {
        None
    } else {
        Some(with_hint(
            "does not match pattern",
            node.pattern_helper.as_deref(),
        ))
    }
}

/// `hint` is appended to the message; numbers pass `None`.
fn option_violation(node: &SchemaNode, text: &str, hint: Option<&str>) -> Option<String> {
    if node.options.is_empty() || node.options.iter().any(|o| o.value == text) {
        None
    } else {
        Some(with_hint("not a valid option", hint))
    }
}

fn run_custom_check(node: &SchemaNode, path: &FieldPath, value: &Value) -> ErrorMap {
    match &node.custom_check {
        Some(check) => check(&path.to_string(), node, value),
        None => ErrorMap::new(),
    }
}

/// Renders a number the way a JavaScript client would print it: integers
/// without a fractional part, other values in shortest form, switching to
/// exponent notation (`1e+21`, `1e-7`) below 1e-6 and from 1e21 up.
pub(crate) fn number_text(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        match number.as_f64() {
            Some(f) => float_text(f),
            None => number.to_string(),
        }
    }
}

fn float_text(f: f64) -> String {
    let magnitude = f.abs();
    if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let exponent_form = format!("{:e}", f);
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => exponent_form,
    }
}
