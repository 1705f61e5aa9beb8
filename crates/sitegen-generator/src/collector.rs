//! Content collection and organization.
//!
//! Walks the content directory once. Markdown files are parsed into pages
//! awaiting render; every other file is copied to the output tree right away
//! and recorded as a static asset, with JSON files also parsed.

use std::{
    fs,
    path::{Path, PathBuf},
};

use sitegen_core::{FileKind, PageContent, StaticAsset, site_url};
use sitegen_parser::{ParserError, ParserRegistry};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    assets::{AssetError, copy_asset},
    walker::{WalkError, walk_files},
};

/// Content collection errors.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Directory traversal error.
    #[error(transparent)]
    Walk(#[from] WalkError),

    /// File could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Static asset could not be copied.
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Parser error.
    #[error("parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParserError,
    },

    /// Walked path is not inside the content directory.
    #[error("invalid content path: {0}")]
    InvalidPath(PathBuf),
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;

/// A parsed page and where its HTML goes.
#[derive(Debug, Clone)]
pub struct PendingPage {
    /// Source markdown file.
    pub source: PathBuf,

    /// Destination HTML file.
    pub output_path: PathBuf,

    /// Parsed page record.
    pub content: PageContent,
}

/// Collected site content, in traversal order.
#[derive(Debug, Default)]
pub struct SiteContent {
    /// Pages awaiting render.
    pub pages: Vec<PendingPage>,

    /// Copied static files, data files included.
    pub assets: Vec<StaticAsset>,
}

impl SiteContent {
    /// Page records in encounter order.
    pub fn page_contents(&self) -> Vec<PageContent> {
        self.pages.iter().map(|p| p.content.clone()).collect()
    }

    /// Number of assets carrying parsed data.
    pub fn data_files(&self) -> usize {
        self.assets.iter().filter(|a| a.content.is_some()).count()
    }
}

/// Content collector that walks the content tree and parses files.
#[derive(Debug)]
pub struct ContentCollector {
    parser: ParserRegistry,
    content_dir: PathBuf,
    output_dir: PathBuf,
}

impl ContentCollector {
    /// Create a new content collector.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            parser: ParserRegistry::new(),
            content_dir: content_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// Walk the content directory, copying static files as they are found.
    ///
    /// Stops at the first error; files copied before it stay in place.
    pub fn collect(&self) -> Result<SiteContent> {
        info!(dir = %self.content_dir.display(), "collecting content");

        let mut content = SiteContent::default();

        for path in walk_files(&self.content_dir) {
            let path = path?;
            let kind = FileKind::from_path(&path);
            if kind.is_copied() {
                content.assets.push(self.collect_asset(&path, kind)?);
            } else {
                content.pages.push(self.collect_page(&path)?);
            }
        }

        info!(
            pages = content.pages.len(),
            assets = content.assets.len(),
            data_files = content.data_files(),
            "content collection complete"
        );

        Ok(content)
    }

    /// Output path for a content file, extension unchanged.
    pub fn output_path(&self, path: &Path) -> Result<PathBuf> {
        Ok(self.output_dir.join(self.relative(path)?))
    }

    /// Parse a markdown file into a pending page.
    fn collect_page(&self, path: &Path) -> Result<PendingPage> {
        let relative = self.relative(path)?.with_extension("html");
        let output_path = self.output_dir.join(&relative);
        let url = site_url(&relative);

        let raw = read(path)?;
        let page = self
            .parser
            .parse_page(&raw, path, &url)
            .map_err(|source| CollectorError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(path = %path.display(), url = %url, "parsed page");

        Ok(PendingPage {
            source: path.to_path_buf(),
            output_path,
            content: page,
        })
    }

    /// Copy a non-markdown file and record it as an asset.
    fn collect_asset(&self, path: &Path, kind: FileKind) -> Result<StaticAsset> {
        let output_path = self.output_path(path)?;
        let url = site_url(self.relative(path)?);

        copy_asset(path, &output_path)?;
        info!(url = %url, "static file");

        if kind != FileKind::Data {
            return Ok(StaticAsset::file(url));
        }

        let raw = read(path)?;
        let data = self
            .parser
            .parse_data(&raw, path)
            .map_err(|source| CollectorError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(StaticAsset::data(url, data))
    }

    fn relative<'a>(&self, path: &'a Path) -> Result<&'a Path> {
        path.strip_prefix(&self.content_dir)
            .map_err(|_| CollectorError::InvalidPath(path.to_path_buf()))
    }
}

/// Read a text file. Invalid UTF-8 sequences become U+FFFD.
fn read(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| CollectorError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(path = %path.display(), "file is not valid UTF-8, decoding lossily");
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}
