//! The settings store: namespace-addressed lookup and receiver projection.

use std::any;

use serde_json::Value;
use tracing::trace;

use crate::casing;
use crate::error::SettingsError;
use crate::setting::{assignment, Settable};
use crate::source::{self, SourceDescriptor, SourceProvider};

/// An immutable tree of settings data, addressed by namespace.
///
/// Built once from a resolved and key-normalized source, read-only
/// thereafter. Concurrent readers may share a store freely; receiver
/// mutation happens through the caller's `&mut`, so exclusive access to
/// receivers is the caller's, enforced by the borrow checker.
#[derive(Debug, Clone)]
pub struct Settings {
    data: Value,
}

impl Settings {
    /// Wrap already-normalized settings data.
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Build from the default source: the working directory plus
    /// [`DEFAULT_FILENAME`](crate::source::DEFAULT_FILENAME).
    pub fn build() -> Result<Self, SettingsError> {
        Self::build_from(SourceDescriptor::Default)
    }

    /// Build from an explicit source descriptor.
    ///
    /// The descriptor is resolved to raw data, every mapping key is
    /// rewritten to snake_case, and the result is wrapped. Resolution and
    /// decode failures propagate unchanged.
    pub fn build_from(source: impl Into<SourceDescriptor>) -> Result<Self, SettingsError> {
        let descriptor = source.into();
        trace!(source = ?descriptor, "building settings");

        let data = source::resolve(descriptor)?;
        let data = casing::normalize_keys(data);

        Ok(Self::new(data))
    }

    /// Build using a provider's descriptor, falling back to the default
    /// source when the provider declines to supply one.
    pub fn build_with(provider: &dyn SourceProvider) -> Result<Self, SettingsError> {
        trace!("getting data source from the provider");

        let descriptor = match provider.data_source() {
            Some(descriptor) => {
                trace!(source = ?descriptor, "got data source from the provider");
                descriptor
            }
            None => {
                trace!("provider does not supply a data source");
                SourceDescriptor::Default
            }
        };

        Self::build_from(descriptor)
    }

    /// The normalized settings data.
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Look up the value at a namespace.
    ///
    /// The empty namespace addresses the whole tree. Returns `None` when
    /// any segment is absent at any depth; absence is never an error here.
    /// A present key holding JSON null yields `Some(&Value::Null)`.
    pub fn get(&self, namespace: &[&str]) -> Option<&Value> {
        trace!(namespace = ?namespace, "getting");

        let mut value = &self.data;
        for segment in namespace {
            value = value.get(*segment)?;
        }

        Some(value)
    }

    /// Assign every attribute of the object node at `namespace` onto the
    /// receiver.
    ///
    /// Strict assignment is the usual policy here: every key of the node
    /// must be a registered setting of the receiver. Not atomic: the first
    /// failing pair aborts the call and earlier writes stay.
    pub fn set<T: Settable>(
        &self,
        receiver: &mut T,
        namespace: &[&str],
        strict: bool,
    ) -> Result<(), SettingsError> {
        trace!(
            receiver = any::type_name::<T>(),
            namespace = ?namespace,
            strict,
            "setting object"
        );

        assignment::assign_object(receiver, namespace, self.get(namespace), strict)
    }

    /// Assign the value at `namespace` + `attribute` to that attribute of
    /// the receiver, returning the assigned value.
    ///
    /// Fails with [`SettingsError::NotFound`] when the path is absent,
    /// under either strictness.
    pub fn set_attribute<T: Settable>(
        &self,
        receiver: &mut T,
        namespace: &[&str],
        attribute: &str,
        strict: bool,
    ) -> Result<Value, SettingsError> {
        trace!(
            receiver = any::type_name::<T>(),
            namespace = ?namespace,
            attribute,
            strict,
            "setting attribute"
        );

        let mut attribute_namespace = namespace.to_vec();
        attribute_namespace.push(attribute);

        let value = self.get(&attribute_namespace);

        assignment::assign_attribute(receiver, attribute, namespace, value, strict)
    }

    /// Assign a caller-supplied value to an attribute, bypassing namespace
    /// lookup. Non-strict assignment is the usual policy here: any
    /// attribute with a writer accepts the value.
    pub fn assign_value<T: Settable>(
        &self,
        receiver: &mut T,
        attribute: &str,
        value: &Value,
        strict: bool,
    ) -> Result<Value, SettingsError> {
        assignment::assign_attribute(receiver, attribute, &[], Some(value), strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> Settings {
        Settings::new(json!({
            "some_setting": "some value",
            "some_group": {
                "some_setting": "grouped value",
                "some_other_setting": "other grouped value",
                "nested": {
                    "leaf": 42
                },
                "nullable": null
            }
        }))
    }

    #[derive(Default)]
    struct SomeObject {
        some_setting: String,
        some_other_setting: String,
        extra: String,
    }

    crate::settings! {
        SomeObject {
            some_setting: String,
            some_other_setting: String,
        }
        writable {
            extra: String,
        }
    }

    #[test]
    fn test_get_empty_namespace_returns_whole_tree() {
        let settings = store();

        assert_eq!(settings.get(&[]), Some(settings.data()));
    }

    #[test]
    fn test_get_returns_exact_leaf_value() {
        let settings = store();

        assert_eq!(
            settings.get(&["some_group", "nested", "leaf"]),
            Some(&json!(42))
        );
    }

    #[test]
    fn test_get_absent_namespace_is_none_not_error() {
        let settings = store();

        assert_eq!(settings.get(&["absent"]), None);
        assert_eq!(settings.get(&["some_group", "absent", "deeper"]), None);
        assert_eq!(settings.get(&["some_setting", "not_a_mapping"]), None);
    }

    #[test]
    fn test_get_passes_null_values_through() {
        let settings = store();

        assert_eq!(settings.get(&["some_group", "nullable"]), Some(&Value::Null));
    }

    #[test]
    fn test_set_attribute_writes_and_returns_value() {
        let settings = store();
        let mut receiver = SomeObject::default();

        let value = settings
            .set_attribute(&mut receiver, &["some_group"], "some_setting", true)
            .unwrap();

        assert_eq!(value, json!("grouped value"));
        assert_eq!(receiver.some_setting, "grouped value");
    }

    #[test]
    fn test_set_attribute_absent_path_not_found_under_both_strict_values() {
        let settings = store();
        let mut receiver = SomeObject::default();

        for strict in [true, false] {
            let result =
                settings.set_attribute(&mut receiver, &["some_group"], "absent", strict);

            assert!(matches!(result, Err(SettingsError::NotFound { .. })));
        }
    }

    #[test]
    fn test_set_attribute_strict_rejects_unregistered() {
        let settings = Settings::new(json!({"extra": "present"}));
        let mut receiver = SomeObject::default();

        let result = settings.set_attribute(&mut receiver, &[], "extra", true);

        assert!(matches!(
            result,
            Err(SettingsError::UnregisteredAttribute { .. })
        ));
    }

    #[test]
    fn test_set_attribute_non_strict_accepts_unregistered() {
        let settings = Settings::new(json!({"extra": "present"}));
        let mut receiver = SomeObject::default();

        settings
            .set_attribute(&mut receiver, &[], "extra", false)
            .unwrap();

        assert_eq!(receiver.extra, "present");
    }

    #[test]
    fn test_set_object_assigns_every_key() {
        let settings = Settings::new(json!({
            "some_group": {
                "some_setting": "a",
                "some_other_setting": "b"
            }
        }));
        let mut receiver = SomeObject::default();

        settings.set(&mut receiver, &["some_group"], true).unwrap();

        assert_eq!(receiver.some_setting, "a");
        assert_eq!(receiver.some_other_setting, "b");
    }

    #[test]
    fn test_set_object_absent_namespace_not_found() {
        let settings = store();
        let mut receiver = SomeObject::default();

        let result = settings.set(&mut receiver, &["absent"], true);

        assert!(matches!(
            result,
            Err(SettingsError::NotFound { ref path }) if path == "absent"
        ));
    }

    #[test]
    fn test_assign_value_bypasses_lookup() {
        let settings = Settings::new(json!({}));
        let mut receiver = SomeObject::default();

        let assigned = settings
            .assign_value(&mut receiver, "some_setting", &json!("direct"), false)
            .unwrap();

        assert_eq!(assigned, json!("direct"));
        assert_eq!(receiver.some_setting, "direct");
    }

    #[test]
    fn test_build_from_data_normalizes_keys() {
        let settings =
            Settings::build_from(json!({"someGroup": {"someSetting": "x"}})).unwrap();

        assert_eq!(
            settings.get(&["some_group", "some_setting"]),
            Some(&json!("x"))
        );
    }

    #[test]
    fn test_build_with_provider_descriptor() {
        struct Provider;

        impl SourceProvider for Provider {
            fn data_source(&self) -> Option<SourceDescriptor> {
                Some(SourceDescriptor::Data(json!({"some_setting": "provided"})))
            }
        }

        let settings = Settings::build_with(&Provider).unwrap();

        assert_eq!(settings.get(&["some_setting"]), Some(&json!("provided")));
    }
}
