//! Sitegen Generator Library
//!
//! Static site generation engine for sitegen.
//!
//! # Modules
//!
//! - [`walker`] - Lazy content tree traversal
//! - [`collector`] - Content collection and static file copying
//! - [`assets`] - Byte-for-byte asset copying
//! - [`template`] - Page rendering through Jinja-style templates
//! - [`html`] - HTML pretty-printing
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`redirect`] - `.htaccess` host redirect generation
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod html;
pub mod redirect;
pub mod robots;
pub mod sitemap;
pub mod template;
pub mod walker;

pub use build::{BuildError, BuildStats, Builder};
pub use collector::{ContentCollector, PendingPage, SiteContent};
pub use html::prettify;
pub use redirect::RedirectGenerator;
pub use robots::RobotsGenerator;
pub use sitemap::SitemapGenerator;
pub use template::{RenderContext, TemplateEngine, TemplateError};
pub use walker::walk_files;
