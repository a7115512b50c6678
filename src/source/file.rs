//! File-backed settings source with canonical path resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::SettingsError;

/// Filename appended to directory descriptors and used when no descriptor
/// is given.
pub const DEFAULT_FILENAME: &str = "settings.json";

/// A settings file resolved to its canonical location.
#[derive(Debug, Clone)]
pub struct FileSource {
    canonical: PathBuf,
}

impl FileSource {
    /// Resolve a path descriptor to a concrete settings file.
    ///
    /// An absent path resolves to the working directory plus the default
    /// filename; a directory gains the default filename; a relative file
    /// path resolves against the working directory. Absolute file paths are
    /// taken as-is.
    pub fn build(path: Option<&Path>) -> Result<Self, SettingsError> {
        let working_dir = env::current_dir().map_err(|source| SettingsError::Io {
            path: PathBuf::from("."),
            source,
        })?;

        let canonical = match path {
            None => working_dir.join(DEFAULT_FILENAME),
            Some(path) if path.is_dir() => working_dir.join(path).join(DEFAULT_FILENAME),
            Some(path) => working_dir.join(path),
        };

        trace!(canonical = %canonical.display(), "resolved settings source");

        Ok(Self { canonical })
    }

    /// The resolved location of the settings file.
    pub fn canonical(&self) -> &Path {
        &self.canonical
    }

    /// Read and decode the settings file.
    pub fn fetch(&self) -> Result<Value, SettingsError> {
        let contents = fs::read_to_string(&self.canonical).map_err(|source| SettingsError::Io {
            path: self.canonical.clone(),
            source,
        })?;

        let data = serde_json::from_str(&contents).map_err(|source| SettingsError::Decode {
            path: self.canonical.clone(),
            source,
        })?;

        debug!(path = %self.canonical.display(), "decoded settings source");

        Ok(data)
    }
}
