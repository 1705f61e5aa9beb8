//! sitegen Core Library
//!
//! Core types, configuration, front matter parsing, and error handling for the
//! sitegen static site generator.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;

pub use config::{BuildConfig, Config};
pub use content::{FileKind, PageContent, SitemapEntry, StaticAsset, canonical_url, site_url};
pub use error::{CoreError, Result};
pub use frontmatter::{Metadata, parse_frontmatter};
