//! The assignment engine.
//!
//! Writes looked-up values onto receivers, enforcing the strictness policy
//! against the receiver type's settings table. Attribute mode writes one
//! value; object mode fans a mapping node out over its keys.

use std::any;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::SettingsError;
use crate::setting::registry::Settable;

/// True when the attribute was declared as a setting on the receiver's
/// type.
pub fn is_registered_setting<T: Settable>(_receiver: &T, attribute: &str) -> bool {
    T::setting_table()
        .lookup(attribute)
        .is_some_and(|entry| entry.registered)
}

/// True when the receiver's type has a writer for the attribute,
/// registered or not.
pub fn is_assignable<T: Settable>(_receiver: &T, attribute: &str) -> bool {
    T::setting_table().lookup(attribute).is_some()
}

/// Assign a single value to an attribute of the receiver.
///
/// `value` is the result of looking the attribute up under `namespace`;
/// `None` means the path was absent and fails with
/// [`SettingsError::NotFound`]. A present null is passed through to the
/// writer. Returns the assigned value.
pub fn assign_attribute<T: Settable>(
    receiver: &mut T,
    attribute: &str,
    namespace: &[&str],
    value: Option<&Value>,
    strict: bool,
) -> Result<Value, SettingsError> {
    let Some(value) = value else {
        let path = qualified(namespace, Some(attribute));
        error!(path = %path, "attribute not found in the settings data");
        return Err(SettingsError::NotFound { path });
    };

    write_value(receiver, attribute, value, strict)
}

/// Assign every attribute of a mapping node to the receiver.
///
/// `node` is the result of looking `namespace` up; `None` fails with
/// [`SettingsError::NotFound`] and a non-mapping node with
/// [`SettingsError::ExpectedObject`]. Pairs are assigned in the mapping's
/// source order under the same strictness. Not atomic: the first failure
/// aborts the call, attributes already written stay written, and no
/// compensation is attempted.
pub fn assign_object<T: Settable>(
    receiver: &mut T,
    namespace: &[&str],
    node: Option<&Value>,
    strict: bool,
) -> Result<(), SettingsError> {
    let Some(node) = node else {
        let path = qualified(namespace, None);
        error!(path = %path, "namespace not found in the settings data");
        return Err(SettingsError::NotFound { path });
    };

    let Some(entries) = node.as_object() else {
        return Err(SettingsError::ExpectedObject {
            path: qualified(namespace, None),
        });
    };

    for (attribute, value) in entries {
        write_value(receiver, attribute, value, strict)?;
    }

    debug!(receiver = any::type_name::<T>(), namespace = ?namespace, strict, "set object");

    Ok(())
}

fn write_value<T: Settable>(
    receiver: &mut T,
    attribute: &str,
    value: &Value,
    strict: bool,
) -> Result<Value, SettingsError> {
    let target = any::type_name::<T>();

    let Some(entry) = T::setting_table().lookup(attribute) else {
        return Err(SettingsError::UnknownAttribute {
            target,
            attribute: attribute.to_string(),
        });
    };

    if strict && !entry.registered {
        return Err(SettingsError::UnregisteredAttribute {
            target,
            attribute: attribute.to_string(),
        });
    }

    (entry.write)(receiver, value)?;

    debug!(receiver = target, attribute, value = %value, "assigned attribute");

    Ok(value.clone())
}

fn qualified(namespace: &[&str], attribute: Option<&str>) -> String {
    let mut segments: Vec<&str> = namespace.to_vec();
    if let Some(attribute) = attribute {
        segments.push(attribute);
    }

    if segments.is_empty() {
        return String::from("(root)");
    }

    segments.join(".")
}
