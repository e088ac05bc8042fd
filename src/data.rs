//! Loading of the substitution data file.

use log::debug;
use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Reads and parses the data file at `path`.
///
/// Files ending in `.yml` or `.yaml` are parsed as YAML, anything else as JSON.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read
/// * `Error::DataParseError` if the content is malformed, carrying the parser message
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));

    debug!(
        "Loading {} data from {}",
        if is_yaml { "YAML" } else { "JSON" },
        path.display()
    );

    let parsed: std::result::Result<Value, String> = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| Error::DataParseError {
        path: path.to_path_buf(),
        message,
    })
}
