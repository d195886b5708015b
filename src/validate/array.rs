//! Array validation.
//!
//! Checks run in a fixed order and each stage returns early on failure:
//! type, length, uniqueness, then element schemas and the custom check.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::{ErrorMap, SchemaConfigError};
use crate::path::FieldPath;
use crate::schema::{SchemaNode, UniqueEntries};

use super::{missing, number_text, run_custom_check};

pub(super) fn validate(
    node: &SchemaNode,
    value: Option<&Value>,
    path: &FieldPath,
) -> Result<ErrorMap, SchemaConfigError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(missing(node, path)),
        Some(value) => value,
    };
    let Some(elements) = value.as_array() else {
        return Ok(ErrorMap::single(path, "must be of type array"));
    };

    if let Some(message) = length_violation(node, elements.len()) {
        return Ok(ErrorMap::single(path, message));
    }

    let duplicates = duplicate_errors(&node.unique_entries, elements, path);
    if !duplicates.is_empty() {
        return Ok(duplicates);
    }

    let Some(element_schema) = node.element_schema() else {
        return Ok(ErrorMap::new());
    };

    let mut errors = ErrorMap::new();
    for (index, element) in elements.iter().enumerate() {
        let element_errors = element_schema.validate(Some(element), &path.push_index(index))?;
        errors = errors.merge(element_errors);
    }

    Ok(errors.merge(run_custom_check(node, path, value)))
}

/// Both bounds set: one combined message. Otherwise each bound on its own.
fn length_violation(node: &SchemaNode, len: usize) -> Option<String> {
    match (node.min_length, node.max_length) {
        (Some(min), Some(max)) => (len < min || len > max)
            .then(|| format!("length must be between {} and {}", min, max)),
        (Some(min), None) if len < min => Some(format!("length must be at least {}", min)),
        (None, Some(max)) if len > max => Some(format!("length must not exceed {}", max)),
        _ => None,
    }
}

/// Reports every occurrence of a key after the first one.
fn duplicate_errors(unique: &UniqueEntries, elements: &[Value], path: &FieldPath) -> ErrorMap {
    let mut errors = ErrorMap::new();
    if !unique.is_enabled() {
        return errors;
    }

    let mut seen: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (index, element) in elements.iter().enumerate() {
        let key = match unique {
            UniqueEntries::None => None,
            UniqueEntries::Value => comparison_key(element),
            UniqueEntries::Property(name) => element.get(name).and_then(comparison_key),
            UniqueEntries::Extractor(key_fn) => comparison_key(&key_fn(element)),
        };
        if let Some(key) = key {
            seen.entry(key).or_default().push(index);
        }
    }

    for (key, indices) in seen.iter().filter(|(_, indices)| indices.len() > 1) {
        for &index in &indices[1..] {
            let mut duplicate_path = path.push_index(index);
            if let UniqueEntries::Property(name) = unique {
                duplicate_path = duplicate_path.push_field(name);
            }
            errors.insert(
                duplicate_path.to_string(),
                format!("is a duplicate ({})", key),
            );
        }
    }
    errors
}

/// Returns the text two elements are compared by.
///
/// Empty keys (`null`, `false`, `0`, `""`) take no part in duplicate
/// detection. Strings compare by their content, so `"1"` and `1` collide.
fn comparison_key(key: &Value) -> Option<String> {
    match key {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(number_text(n)),
        composite => Some(composite.to_string()),
    }
}
