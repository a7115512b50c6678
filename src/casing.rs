//! Key-casing normalization for decoded settings data.

use heck::ToSnakeCase;
use serde_json::Value;

/// Rewrite every mapping key in the tree to lower snake_case.
///
/// Pure transform applied once over freshly decoded data. Only object keys
/// change; value types and array ordering are preserved.
pub fn normalize_keys(value: Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_snake_case(), normalize_keys(value)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_keys).collect()),
        other => other,
    }
}
