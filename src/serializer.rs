//! Serialization of payloads and parsed descriptors, and writing of generated documents.

use crate::error::{Error, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a value to JSON with two-space indentation.
///
/// Used for example request bodies and for `--format json` descriptor dumps.
pub fn serialize_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    debug!("Serializing to JSON");
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serializes a value to YAML.
pub fn serialize_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    debug!("Serializing to YAML");
    Ok(serde_yaml::to_string(value)?)
}

/// Writes string content to a file, creating missing parent directories.
///
/// Creates the file if it doesn't exist, or overwrites it if it does. An
/// already existing parent directory is not an error.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    fs::write(path, content).map_err(|e| Error::io(path, e))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
