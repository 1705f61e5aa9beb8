//! Build orchestration.
//!
//! Clears the output directory, collects content, renders every page through
//! its template, then writes `sitemap.xml` and `robots.txt`.

use std::{fs, path::Path, time::Instant};

use sitegen_core::{Config, CoreError, SitemapEntry};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    collector::{CollectorError, ContentCollector, PendingPage},
    html::prettify,
    robots::{RobotsError, RobotsGenerator},
    sitemap::{SitemapError, SitemapGenerator},
    template::{RenderContext, TemplateEngine, TemplateError},
};

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] CoreError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Collector error.
    #[error("collector error: {0}")]
    Collector(#[from] CollectorError),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    /// Robots generation error.
    #[error("robots error: {0}")]
    Robots(#[from] RobotsError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of pages rendered.
    pub pages: usize,

    /// Number of static files copied, data files included.
    pub assets: usize,

    /// Number of JSON data files parsed.
    pub data_files: usize,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Site builder that orchestrates the build process.
#[derive(Debug)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new builder.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the full build process.
    ///
    /// Stops at the first error. Output written before it stays in place.
    pub fn build(&self) -> Result<BuildStats> {
        let start = Instant::now();
        self.config.validate()?;

        let output_dir = &self.config.output_dir;
        info!(
            content = %self.config.content_dir.display(),
            output = %output_dir.display(),
            "starting build"
        );

        self.clean_output()?;

        let collector = ContentCollector::new(&self.config.content_dir, output_dir);
        let content = collector.collect()?;

        let engine = TemplateEngine::new(
            &self.config.template_dir,
            &self.config.build.template_extension,
        );
        let pages = content.page_contents();
        let mut entries = Vec::with_capacity(pages.len());

        for (pending, page) in content.pages.iter().zip(&pages) {
            let ctx = RenderContext {
                current: page,
                all: &pages,
                other: &content.assets,
            };
            self.write_page(&engine, pending, &ctx)?;
            entries.push(SitemapEntry::from_page(page));
        }

        SitemapGenerator::new(&self.config).write(&entries, output_dir)?;
        RobotsGenerator::new(&self.config).generate(output_dir)?;

        let stats = BuildStats {
            pages: pages.len(),
            assets: content.assets.len(),
            data_files: content.data_files(),
            duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            pages = stats.pages,
            assets = stats.assets,
            data_files = stats.data_files,
            duration_ms = stats.duration_ms,
            "build complete"
        );

        Ok(stats)
    }

    /// Clean the output directory.
    fn clean_output(&self) -> Result<()> {
        let dir = &self.config.output_dir;
        if dir.exists() {
            debug!(dir = %dir.display(), "cleaning output directory");
            fs::remove_dir_all(dir)?;
        }
        fs::create_dir_all(dir)?;
        Ok(())
    }

    /// Render one page and write it to its output path.
    fn write_page(
        &self,
        engine: &TemplateEngine,
        pending: &PendingPage,
        ctx: &RenderContext<'_>,
    ) -> Result<()> {
        let mut html = engine.render_page(ctx)?;
        if self.config.build.pretty_html {
            html = prettify(&html);
        }

        write_file(&pending.output_path, &html)?;

        info!(url = ctx.current.url(), canonical = ctx.current.canonical(), "rendered page");
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
