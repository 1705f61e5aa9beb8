//! Sitemap generation.
//!
//! Writes `sitemap.xml` listing every rendered page by canonical URL, with
//! the page's publication date as `<lastmod>` when it has one.

use std::{fs, path::Path};

use sitegen_core::{Config, SitemapEntry};
use thiserror::Error;
use tracing::{debug, info};

/// File name of the generated sitemap.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    base_url: String,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.base_url(),
        }
    }

    /// Generate sitemap XML, one `<url>` per entry in the given order.
    #[must_use]
    pub fn generate(&self, entries: &[SitemapEntry]) -> String {
        debug!(count = entries.len(), "generating sitemap");

        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for entry in entries {
            xml.push_str(&self.url_to_xml(entry));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write `sitemap.xml` into `output_dir`.
    pub fn write(&self, entries: &[SitemapEntry], output_dir: &Path) -> Result<()> {
        info!(urls = entries.len(), "generating sitemap.xml");
        fs::write(output_dir.join(SITEMAP_FILE), self.generate(entries))?;
        Ok(())
    }

    fn url_to_xml(&self, entry: &SitemapEntry) -> String {
        let mut xml = String::from("  <url>\n");

        let loc = format!("{}{}", self.base_url, entry.url);
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));

        if let Some(date) = &entry.date {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", escape_xml(date)));
        }

        xml.push_str("  </url>\n");
        xml
    }
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
