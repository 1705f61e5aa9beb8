//! Structured data files exposed to templates.

use std::path::Path;

use serde_json::Value;
use sitegen_core::error::CoreError;

/// Parse the text of a JSON data file.
pub fn parse_json(text: &str, path: &Path) -> Result<Value, CoreError> {
    serde_json::from_str(text).map_err(|e| CoreError::data(path, e.to_string()))
}
