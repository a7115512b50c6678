//! Settings data sources.
//!
//! Turns a source descriptor (nothing, a path, pre-built data, or a
//! caller-supplied source object) into decoded settings data.

mod file;

pub use file::{FileSource, DEFAULT_FILENAME};

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SettingsError;

/// Where settings data comes from.
pub enum SourceDescriptor {
    /// No descriptor: the working directory plus the default filename.
    Default,
    /// A settings file, or a directory holding one under the default name.
    Path(PathBuf),
    /// Data supplied directly, bypassing file access.
    Data(Value),
    /// A caller-supplied source implementation.
    Custom(Box<dyn SettingsSource>),
}

impl fmt::Debug for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceDescriptor::Default => write!(f, "Default"),
            SourceDescriptor::Path(path) => f.debug_tuple("Path").field(path).finish(),
            SourceDescriptor::Data(_) => write!(f, "Data(..)"),
            SourceDescriptor::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl From<&str> for SourceDescriptor {
    fn from(path: &str) -> Self {
        SourceDescriptor::Path(PathBuf::from(path))
    }
}

impl From<String> for SourceDescriptor {
    fn from(path: String) -> Self {
        SourceDescriptor::Path(PathBuf::from(path))
    }
}

impl From<&Path> for SourceDescriptor {
    fn from(path: &Path) -> Self {
        SourceDescriptor::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for SourceDescriptor {
    fn from(path: PathBuf) -> Self {
        SourceDescriptor::Path(path)
    }
}

impl From<Value> for SourceDescriptor {
    fn from(data: Value) -> Self {
        SourceDescriptor::Data(data)
    }
}

/// A source of decoded settings data.
pub trait SettingsSource {
    /// Produce the raw settings data.
    fn fetch(&self) -> Result<Value, SettingsError>;
}

/// Optional provider of a default source descriptor.
///
/// Consulted by [`Settings::build_with`](crate::store::Settings::build_with)
/// when no explicit descriptor is given. Returning `None` is not an error;
/// it means "no descriptor" and resolution falls through to the default.
pub trait SourceProvider {
    /// The descriptor to use, or `None` to fall back to the default.
    fn data_source(&self) -> Option<SourceDescriptor>;
}

/// Resolve a descriptor to raw settings data.
pub fn resolve(descriptor: SourceDescriptor) -> Result<Value, SettingsError> {
    match descriptor {
        SourceDescriptor::Default => FileSource::build(None)?.fetch(),
        SourceDescriptor::Path(path) => FileSource::build(Some(&path))?.fetch(),
        SourceDescriptor::Data(data) => Ok(data),
        SourceDescriptor::Custom(source) => source.fetch(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticSource;

    impl SettingsSource for StaticSource {
        fn fetch(&self) -> Result<Value, SettingsError> {
            Ok(json!({"from_custom_source": true}))
        }
    }

    #[test]
    fn test_resolve_data_descriptor_passes_through() {
        let data = json!({"some_setting": "some value"});
        let resolved = resolve(SourceDescriptor::Data(data.clone())).unwrap();

        assert_eq!(resolved, data);
    }

    #[test]
    fn test_resolve_custom_source() {
        let resolved = resolve(SourceDescriptor::Custom(Box::new(StaticSource))).unwrap();

        assert_eq!(resolved["from_custom_source"], true);
    }

    #[test]
    fn test_descriptor_from_str_is_path() {
        let descriptor = SourceDescriptor::from("some_file.json");

        assert!(matches!(descriptor, SourceDescriptor::Path(ref p) if p == Path::new("some_file.json")));
    }
}
