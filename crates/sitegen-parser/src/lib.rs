//! sitegen Parser Library
//!
//! Parsers for the two formats the generator understands: Markdown pages
//! with TOML front matter, and JSON data files.

pub mod data;
pub mod markdown;

use std::path::{Path, PathBuf};

pub use markdown::MarkdownParser;
use serde_json::Value;
use sitegen_core::{FileKind, PageContent, error::CoreError};
use thiserror::Error;
use tracing::trace;

/// Parser errors.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Markdown or front matter parsing error.
    #[error("markdown error: {0}")]
    Markdown(#[from] markdown::MarkdownError),

    /// Data file parsing error.
    #[error("data error: {0}")]
    Data(#[from] CoreError),

    /// The file is not of the kind the parser was asked for.
    #[error("cannot parse {path} as {expected:?}, it is {actual:?}")]
    WrongKind {
        path: PathBuf,
        expected: FileKind,
        actual: FileKind,
    },
}

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Registry of the content parsers, dispatching on file kind.
#[derive(Debug, Default)]
pub struct ParserRegistry {
    markdown: MarkdownParser,
}

impl ParserRegistry {
    /// Create a new parser registry with default parsers.
    pub fn new() -> Self {
        Self {
            markdown: MarkdownParser::new(),
        }
    }

    /// Parse a markdown file into a page served at `url`.
    ///
    /// The page's `content`, `url` and `canonical` keys always come from the
    /// parse, even when the front matter defines keys of the same name.
    pub fn parse_page(&self, content: &str, path: &Path, url: &str) -> Result<PageContent> {
        expect_kind(path, FileKind::Markup)?;
        trace!(path = %path.display(), url, "parsing page");

        let (metadata, html) = self.markdown.parse(content, path)?;
        Ok(PageContent::new(metadata, html, url))
    }

    /// Parse a data file into a structured value.
    pub fn parse_data(&self, content: &str, path: &Path) -> Result<Value> {
        expect_kind(path, FileKind::Data)?;
        trace!(path = %path.display(), "parsing data file");

        Ok(data::parse_json(content, path)?)
    }

    /// Get the markdown parser.
    pub fn markdown(&self) -> &MarkdownParser {
        &self.markdown
    }
}

fn expect_kind(path: &Path, expected: FileKind) -> Result<()> {
    let actual = FileKind::from_path(path);
    if actual == expected {
        Ok(())
    } else {
        Err(ParserError::WrongKind {
            path: path.to_path_buf(),
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_page() {
        let registry = ParserRegistry::new();
        let content = "+++\ntemplate = \"post\"\npublication_date = 2024-01-14\n+++\n# Hi\n";

        let page = registry
            .parse_page(content, Path::new("content/posts/hello.md"), "/posts/hello.html")
            .unwrap();

        assert_eq!(page.template(), Some("post"));
        assert_eq!(page.url(), "/posts/hello.html");
        assert_eq!(page.canonical(), "/posts/hello");
        assert_eq!(page.publication_date().as_deref(), Some("2024-01-14"));
        assert!(page.content().contains(">Hi</h1>"));
    }

    #[test]
    fn test_parse_page_index_canonical() {
        let registry = ParserRegistry::new();
        let page = registry
            .parse_page("Home", Path::new("content/index.md"), "/index.html")
            .unwrap();

        assert_eq!(page.canonical(), "/");
        assert!(page.metadata().is_empty());
    }

    #[test]
    fn test_parse_page_reserved_keys() {
        let registry = ParserRegistry::new();
        let content = "+++\nurl = \"/spoofed\"\ncontent = \"spoofed\"\n+++\nReal body";

        let page = registry
            .parse_page(content, Path::new("a.md"), "/a.html")
            .unwrap();

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["url"], json!("/a.html"));
        assert!(value["content"].as_str().unwrap().contains("Real body"));
    }

    #[test]
    fn test_parse_page_wrong_kind() {
        let registry = ParserRegistry::new();
        let result = registry.parse_page("{}", Path::new("data.json"), "/data.json");

        assert!(matches!(result, Err(ParserError::WrongKind { .. })));
    }

    #[test]
    fn test_parse_data() {
        let registry = ParserRegistry::new();
        let value = registry
            .parse_data(r#"{"title": "Menu"}"#, Path::new("menu.json"))
            .unwrap();

        assert_eq!(value["title"], json!("Menu"));
    }

    #[test]
    fn test_parse_data_error() {
        let registry = ParserRegistry::new();
        let result = registry.parse_data("nope", Path::new("menu.json"));

        assert!(matches!(result, Err(ParserError::Data(_))));
    }
}
