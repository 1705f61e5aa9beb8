//! Markdown parser using pulldown-cmark.

use std::{collections::HashMap, path::Path};

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};
use sitegen_core::{
    error::CoreError,
    frontmatter::{Metadata, parse_frontmatter},
};
use thiserror::Error;

/// Markdown parsing errors.
#[derive(Debug, Error)]
pub enum MarkdownError {
    /// Failed to parse front matter.
    #[error("front matter error: {0}")]
    Frontmatter(#[from] CoreError),
}

/// Result type for markdown operations.
pub type Result<T> = std::result::Result<T, MarkdownError>;

/// Markdown parser producing HTML with heading anchors.
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    options: Options,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    /// Create a new markdown parser with default options.
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_HEADING_ATTRIBUTES);

        Self { options }
    }

    /// Parse markdown content with front matter.
    ///
    /// Returns the front matter metadata and the rendered HTML body.
    pub fn parse(&self, content: &str, path: &Path) -> Result<(Metadata, String)> {
        let (metadata, body) = parse_frontmatter(content, path)?;
        Ok((metadata, self.render(&body)))
    }

    /// Render a markdown body (no front matter) to HTML.
    pub fn render(&self, body: &str) -> String {
        let mut events: Vec<Event<'_>> = Parser::new_ext(body, self.options).collect();
        assign_heading_ids(&mut events);

        let mut out = String::with_capacity(body.len() + body.len() / 2);
        html::push_html(&mut out, events.into_iter());
        out
    }
}

/// Give every heading without an explicit `{#id}` a slug id derived from its
/// text. Repeated slugs get a numeric suffix.
fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut heading_start: Option<usize> = None;
    let mut heading_text = String::new();

    for i in 0..events.len() {
        match &events[i] {
            Event::Start(Tag::Heading { .. }) => {
                heading_start = Some(i);
                heading_text.clear();
            }
            Event::Text(text) | Event::Code(text) if heading_start.is_some() => {
                heading_text.push_str(text);
            }
            _ => {}
        }

        if !matches!(events[i], Event::End(TagEnd::Heading(_))) {
            continue;
        }
        let Some(start) = heading_start.take() else {
            continue;
        };

        let slug = slugify(&heading_text);
        if slug.is_empty() {
            continue;
        }
        let count = seen.entry(slug.clone()).or_insert(0);
        let unique = if *count == 0 {
            slug
        } else {
            format!("{slug}-{count}")
        };
        *count += 1;

        if let Event::Start(Tag::Heading { id, .. }) = &mut events[start]
            && id.is_none()
        {
            *id = Some(unique.into());
        }
    }
}

/// Convert text to a URL-safe slug.
fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_simple_markdown() {
        let parser = MarkdownParser::new();
        let content = "+++\ntemplate = \"post\"\n+++\n# Hi\n\nThis is a test.\n";

        let (metadata, html) = parser.parse(content, Path::new("hello.md")).unwrap();

        assert_eq!(metadata["template"], json!("post"));
        assert!(html.contains("<h1 id=\"hi\">Hi</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_no_frontmatter() {
        let parser = MarkdownParser::new();
        let content = "# Just Content\n\nNo front matter here.";
        let (metadata, html) = parser.parse(content, Path::new("test.md")).unwrap();

        assert!(metadata.is_empty());
        assert!(html.contains("Just Content</h1>"));
    }

    #[test]
    fn test_malformed_frontmatter() {
        let parser = MarkdownParser::new();
        let result = parser.parse("+++\n= broken\n+++\nBody", Path::new("bad.md"));
        assert!(matches!(result, Err(MarkdownError::Frontmatter(_))));
    }

    #[test]
    fn test_inline_markup() {
        let parser = MarkdownParser::new();
        let html = parser.render("Some *em*, **strong**, `code` and [a link](/x).");

        assert!(html.contains("<em>em</em>"));
        assert!(html.contains("<strong>strong</strong>"));
        assert!(html.contains("<code>code</code>"));
        assert!(html.contains("<a href=\"/x\">a link</a>"));
    }

    #[test]
    fn test_lists() {
        let parser = MarkdownParser::new();
        let html = parser.render("- one\n- two\n\n1. first\n2. second\n");

        assert!(html.contains("<ul>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<ol>"));
        assert!(html.contains("<li>second</li>"));
    }

    #[test]
    fn test_code_block() {
        let parser = MarkdownParser::new();
        let html = parser.render("```rust\nfn main() {}\n```\n");

        assert!(html.contains("<pre><code class=\"language-rust\">"));
        assert!(html.contains("fn main() {}"));
    }

    #[test]
    fn test_table_rendering() {
        let parser = MarkdownParser::new();
        let html = parser.render(
            r#"| Header 1 | Header 2 |
|----------|----------|
| Cell 1   | Cell 2   |"#,
        );

        assert!(html.contains("<table>"));
        assert!(html.contains("<thead>"));
        assert!(html.contains("<td>Cell 1</td>"));
    }

    #[test]
    fn test_task_list() {
        let parser = MarkdownParser::new();
        let html = parser.render("- [x] Done\n- [ ] Not done\n");

        assert!(html.contains("checkbox"));
        assert!(html.contains("checked"));
    }

    #[test]
    fn test_heading_ids_are_unique() {
        let parser = MarkdownParser::new();
        let html = parser.render("## Setup\n\n## Setup\n\n## Setup\n");

        assert!(html.contains("<h2 id=\"setup\">"));
        assert!(html.contains("<h2 id=\"setup-1\">"));
        assert!(html.contains("<h2 id=\"setup-2\">"));
    }

    #[test]
    fn test_explicit_heading_id_kept() {
        let parser = MarkdownParser::new();
        let html = parser.render("# Title {#custom}\n");

        assert!(html.contains("<h1 id=\"custom\">Title</h1>"));
    }

    #[test]
    fn test_heading_id_includes_inline_code() {
        let parser = MarkdownParser::new();
        let html = parser.render("## Using `serde` today\n");

        assert!(html.contains("id=\"using-serde-today\""));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Test 123 Post"), "test-123-post");
        assert_eq!(slugify("Multiple   Spaces"), "multiple-spaces");
        assert_eq!(slugify("Special!@#Chars"), "specialchars");
        assert_eq!(slugify("Привет мир"), "привет-мир");
    }
}
