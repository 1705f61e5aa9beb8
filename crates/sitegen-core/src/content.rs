//! Content types and structures.

use std::path::{Component, Path};

use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};
use serde_json::Value;

use crate::frontmatter::Metadata;

/// Front matter key naming the template a page is rendered with.
pub const TEMPLATE_KEY: &str = "template";

/// Front matter key holding the page's publication date.
pub const PUBLICATION_DATE_KEY: &str = "publication_date";

/// Keys synthesized by the parser. They always win over front matter keys
/// of the same name.
pub const RESERVED_KEYS: [&str; 3] = ["content", "url", "canonical"];

/// How a file found in the content tree is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Markdown with optional front matter (.md files), rendered through a template.
    Markup,
    /// JSON data (.json files), copied and exposed to templates.
    Data,
    /// Anything else, copied verbatim.
    Static,
}

impl FileKind {
    /// Determine the kind from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "md" => Self::Markup,
            "json" => Self::Data,
            _ => Self::Static,
        }
    }

    /// Determine the kind from a file path.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Static, Self::from_extension)
    }

    /// Whether files of this kind are copied to the output unchanged.
    pub fn is_copied(&self) -> bool {
        !matches!(self, Self::Markup)
    }
}

/// Build a site-relative URL (`/posts/hello.html`) from a path relative to
/// the output or content root.
pub fn site_url(relative: &Path) -> String {
    let mut url = String::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            url.push('/');
            url.push_str(&part.to_string_lossy());
        }
    }
    if url.is_empty() {
        url.push('/');
    }
    url
}

/// Derive the canonical URL for an output URL.
///
/// - `/posts/index.html` becomes `/posts/`
/// - `/posts/hello.html` becomes `/posts/hello`
/// - anything else is returned unchanged
pub fn canonical_url(url: &str) -> String {
    if url.ends_with("/index.html") {
        url[..url.len() - "index.html".len()].to_string()
    } else if let Some(stem) = url.strip_suffix(".html") {
        stem.to_string()
    } else {
        url.to_string()
    }
}

/// A parsed content page.
///
/// Serializes as one flat mapping: the front matter keys followed by
/// `content`, `url` and `canonical`. Front matter keys with those names are
/// dropped in favor of the synthesized values.
#[derive(Debug, Clone, PartialEq)]
pub struct PageContent {
    metadata: Metadata,
    content: String,
    url: String,
    canonical: String,
}

impl PageContent {
    /// Create a page from its metadata, rendered HTML body and output URL.
    pub fn new(metadata: Metadata, content: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let canonical = canonical_url(&url);
        Self {
            metadata,
            content: content.into(),
            url,
            canonical,
        }
    }

    /// Front matter as parsed, including any shadowed reserved keys.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Rendered HTML body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Site-relative output URL, e.g. `/posts/hello.html`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Canonical URL, e.g. `/posts/hello`.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Look up a key the way templates see it.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            "content" => Some(Value::String(self.content.clone())),
            "url" => Some(Value::String(self.url.clone())),
            "canonical" => Some(Value::String(self.canonical.clone())),
            _ => self.metadata.get(key).cloned(),
        }
    }

    /// Template identifier from the front matter, when it is a string.
    pub fn template(&self) -> Option<&str> {
        self.metadata.get(TEMPLATE_KEY).and_then(Value::as_str)
    }

    /// Publication date as sitemap text.
    ///
    /// Empty strings, booleans, null and compound values count as absent.
    pub fn publication_date(&self) -> Option<String> {
        match self.metadata.get(PUBLICATION_DATE_KEY)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The merged mapping templates receive.
    pub fn to_map(&self) -> Metadata {
        let mut map = self.metadata.clone();
        map.insert("content".to_string(), Value::String(self.content.clone()));
        map.insert("url".to_string(), Value::String(self.url.clone()));
        map.insert(
            "canonical".to_string(),
            Value::String(self.canonical.clone()),
        );
        map
    }
}

impl Serialize for PageContent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let shadowed = RESERVED_KEYS
            .iter()
            .filter(|key| self.metadata.contains_key(**key))
            .count();
        let mut map = serializer.serialize_map(Some(self.metadata.len() - shadowed + 3))?;
        for (key, value) in &self.metadata {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("content", &self.content)?;
        map.serialize_entry("url", &self.url)?;
        map.serialize_entry("canonical", &self.canonical)?;
        map.end()
    }
}

/// A non-markup file copied to the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaticAsset {
    /// Site-relative URL, e.g. `/data.json`.
    pub url: String,

    /// Parsed content for data files, `None` for everything else.
    pub content: Option<Value>,
}

impl StaticAsset {
    /// Asset without parsed content.
    pub fn file(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: None,
        }
    }

    /// Asset carrying parsed data.
    pub fn data(url: impl Into<String>, content: Value) -> Self {
        Self {
            url: url.into(),
            content: Some(content),
        }
    }
}

/// One `<url>` of the sitemap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    /// Canonical site-relative URL.
    pub url: String,

    /// Publication date as written in the front matter.
    pub date: Option<String>,
}

impl SitemapEntry {
    /// Derive the entry for a rendered page.
    pub fn from_page(page: &PageContent) -> Self {
        Self {
            url: page.canonical().to_string(),
            date: page.publication_date(),
        }
    }
}
