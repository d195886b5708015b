//! Object validation.

use serde_json::Value;

use crate::error::{ErrorMap, SchemaConfigError};
use crate::path::FieldPath;
use crate::schema::SchemaNode;

use super::{missing, run_custom_check};

pub(super) fn validate(
    node: &SchemaNode,
    value: Option<&Value>,
    path: &FieldPath,
) -> Result<ErrorMap, SchemaConfigError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(missing(node, path)),
        Some(value) => value,
    };
    let Some(object) = value.as_object() else {
        return Ok(ErrorMap::single(path, "must be of type object"));
    };

    let mut errors = ErrorMap::new();

    if let Some(properties) = node.property_schemas() {
        for (name, schema) in properties {
            let field_errors = schema.validate(object.get(name), &path.push_field(name))?;
            errors = errors.merge(field_errors);
        }

        if node.strict {
            for key in object.keys().filter(|k| !properties.contains_key(*k)) {
                errors.insert(path.push_field(key).to_string(), "is not allowed on this object");
            }
        }
    }

    Ok(errors.merge(run_custom_check(node, path, value)))
}
