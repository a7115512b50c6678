//! Error types for settings resolution and assignment.

use std::io;
use std::path::PathBuf;

/// Errors raised while resolving settings data or assigning it to receivers.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The namespace (or namespace plus attribute) path is absent from the data.
    #[error("{path} not found in the settings data")]
    NotFound {
        /// Fully-qualified dotted path that failed to resolve.
        path: String,
    },

    /// The receiver type has no writer for the attribute.
    #[error("{target} has no writer for attribute {attribute}")]
    UnknownAttribute {
        /// Receiver type name.
        target: &'static str,
        /// Attribute that was requested.
        attribute: String,
    },

    /// Strict assignment requires the attribute to be a registered setting.
    #[error("{attribute} is not a registered setting of {target}")]
    UnregisteredAttribute {
        /// Receiver type name.
        target: &'static str,
        /// Attribute that was requested.
        attribute: String,
    },

    /// The value could not be converted into the attribute's type.
    #[error("cannot convert value for attribute {attribute}")]
    Convert {
        /// Attribute whose writer rejected the value.
        attribute: String,
        #[source]
        source: serde_json::Error,
    },

    /// Object assignment expects a mapping node at the namespace.
    #[error("{path} does not hold an object")]
    ExpectedObject {
        /// Dotted path of the non-mapping node.
        path: String,
    },

    /// The settings source could not be read.
    #[error("failed reading settings source {}", .path.display())]
    Io {
        /// Canonical path of the source.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings source could not be decoded.
    #[error("failed decoding settings source {}", .path.display())]
    Decode {
        /// Canonical path of the source.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
