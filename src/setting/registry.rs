//! Static per-type registry of assignable settings.
//!
//! Receiver types declare their assignment targets once with the
//! [`settings!`](crate::settings) macro, which builds a static table of
//! attribute names and writer functions and wires it up through the
//! [`Settable`] trait. Queries and writes go through the table; there is no
//! per-call reflection.

use serde_json::Value;

use crate::error::SettingsError;

/// One assignable attribute on a receiver type.
pub struct SettingEntry<T: 'static> {
    /// Attribute name, matched against normalized data keys.
    pub name: &'static str,

    /// Whether the attribute was declared as a setting. Unregistered
    /// entries have writers but are rejected by strict assignment.
    pub registered: bool,

    /// Converts the value into the attribute's type and stores it.
    pub write: fn(&mut T, &Value) -> Result<(), SettingsError>,
}

/// The settings table of a receiver type.
pub struct SettingTable<T: 'static> {
    /// Declared entries, in declaration order.
    pub entries: &'static [SettingEntry<T>],
}

impl<T> SettingTable<T> {
    /// Find the entry for an attribute.
    ///
    /// Later declarations shadow earlier ones, so redeclaring an attribute
    /// is harmless.
    pub fn lookup(&self, attribute: &str) -> Option<&SettingEntry<T>> {
        self.entries.iter().rev().find(|entry| entry.name == attribute)
    }
}

/// Receiver types that expose a settings table.
///
/// Implemented by the [`settings!`](crate::settings) macro; implementing it
/// by hand is only needed for tables the macro grammar cannot express.
pub trait Settable: Sized + 'static {
    /// The type's settings table.
    fn setting_table() -> &'static SettingTable<Self>;
}

/// Declare the assignable settings of a receiver type.
///
/// The first block lists registered settings: legal targets for strict
/// assignment. The optional `writable` block lists attributes that have
/// writers without being registered settings, matching receivers that
/// expose ordinary writers outside the registry. Each entry's writer
/// deserializes the incoming value into the named field's type.
///
/// ```
/// use serde_json::json;
/// use settings_store::{settings, Settings};
///
/// #[derive(Default)]
/// struct Widget {
///     some_setting: String,
///     limit: u64,
/// }
///
/// settings! {
///     Widget {
///         some_setting: String,
///     }
///     writable {
///         limit: u64,
///     }
/// }
///
/// let store = Settings::new(json!({"some_setting": "some value"}));
/// let mut widget = Widget::default();
/// store.set_attribute(&mut widget, &[], "some_setting", true).unwrap();
/// assert_eq!(widget.some_setting, "some value");
/// ```
#[macro_export]
macro_rules! settings {
    ($target:ty { $($name:ident : $ty:ty),* $(,)? }) => {
        $crate::settings!($target { $($name: $ty),* } writable {});
    };

    ($target:ty { $($name:ident : $ty:ty),* $(,)? } writable { $($wname:ident : $wty:ty),* $(,)? }) => {
        impl $crate::setting::Settable for $target {
            fn setting_table() -> &'static $crate::setting::SettingTable<Self> {
                static TABLE: $crate::setting::SettingTable<$target> =
                    $crate::setting::SettingTable {
                        entries: &[
                            $(
                                $crate::setting::SettingEntry {
                                    name: stringify!($name),
                                    registered: true,
                                    write: |receiver: &mut $target, value| {
                                        receiver.$name =
                                            $crate::__serde_json::from_value::<$ty>(value.clone())
                                                .map_err(|source| {
                                                    $crate::SettingsError::Convert {
                                                        attribute: stringify!($name).to_string(),
                                                        source,
                                                    }
                                                })?;
                                        Ok(())
                                    },
                                },
                            )*
                            $(
                                $crate::setting::SettingEntry {
                                    name: stringify!($wname),
                                    registered: false,
                                    write: |receiver: &mut $target, value| {
                                        receiver.$wname =
                                            $crate::__serde_json::from_value::<$wty>(value.clone())
                                                .map_err(|source| {
                                                    $crate::SettingsError::Convert {
                                                        attribute: stringify!($wname).to_string(),
                                                        source,
                                                    }
                                                })?;
                                        Ok(())
                                    },
                                },
                            )*
                        ],
                    };
                &TABLE
            }
        }
    };
}
