//! Front matter splitting and parsing for content files.
//!
//! A content file may open with a TOML block fenced by `+++` lines:
//!
//! ```text
//! +++
//! template = "post"
//! publication_date = 2024-01-14
//! +++
//! # Hello
//! ```
//!
//! Only a line that is exactly `+++` counts as a fence.

use std::path::Path;

use serde_json::{Map, Number, Value};

use crate::error::{CoreError, Result};

/// Fence line opening and closing a front matter block.
pub const DELIMITER: &str = "+++";

/// Parsed front matter: string keys mapped to JSON-like values.
pub type Metadata = Map<String, Value>;

/// A content file split into its front matter block and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// Raw front matter text without fence lines, `None` when the file has no block.
    pub frontmatter: Option<String>,

    /// Markup body.
    pub body: String,
}

/// Split content into front matter and body.
///
/// The block is recognized only when the very first line is the delimiter.
/// Every later delimiter line is dropped: the first one closes the block and
/// any further ones are removed from the body. A block that is never closed
/// swallows the rest of the file.
pub fn split_frontmatter(content: &str) -> Split {
    let mut lines = content.split('\n');

    if lines.next() != Some(DELIMITER) {
        return Split {
            frontmatter: None,
            body: content.to_string(),
        };
    }

    let mut frontmatter = Vec::new();
    let mut body = Vec::new();
    let mut in_frontmatter = true;

    for line in lines {
        if line == DELIMITER {
            in_frontmatter = false;
            continue;
        }
        if in_frontmatter {
            frontmatter.push(line);
        } else {
            body.push(line);
        }
    }

    Split {
        frontmatter: Some(frontmatter.join("\n")),
        body: body.join("\n"),
    }
}

/// Parse a TOML front matter block into metadata.
///
/// Date and time values become their TOML text form, so templates see
/// `2024-01-14` rather than a structured datetime.
pub fn parse_metadata(block: &str, path: &Path) -> Result<Metadata> {
    let table: toml::Table =
        toml::from_str(block).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;

    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

/// Split and parse a content file.
///
/// Returns the metadata (empty when there is no block) and the markup body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Metadata, String)> {
    let Split { frontmatter, body } = split_frontmatter(content);

    let metadata = match frontmatter {
        Some(block) => parse_metadata(&block, path)?,
        None => Metadata::new(),
    };

    Ok((metadata, body))
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        // Non-finite floats have no JSON form.
        toml::Value::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}
