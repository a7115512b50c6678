//! settings-store: file-backed settings resolution and projection
//!
//! Resolves hierarchical settings data from a file, directory, or
//! caller-supplied source into a normalized in-memory tree, then projects
//! values from that tree onto receiver types through an opt-in per-type
//! registry of assignable attributes.
//!
//! Receiver types declare their assignment targets with the [`settings!`]
//! macro; the [`Settings`] store addresses the tree by namespace and
//! performs strict or non-strict assignment against the declared registry.

pub mod casing;
pub mod error;
pub mod setting;
pub mod source;
pub mod store;

pub use error::SettingsError;
pub use setting::{is_assignable, is_registered_setting, Settable, SettingEntry, SettingTable};
pub use source::{
    FileSource, SettingsSource, SourceDescriptor, SourceProvider, DEFAULT_FILENAME,
};
pub use store::Settings;

// Used by the expansion of `settings!`.
#[doc(hidden)]
pub use serde_json as __serde_json;
