//! Robots.txt generation.

use std::{fs::File, io::Write, path::Path};

use sitegen_core::Config;
use thiserror::Error;
use tracing::info;

use crate::sitemap::SITEMAP_FILE;

/// Robots generation errors.
#[derive(Debug, Error)]
pub enum RobotsError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for robots generation.
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    sitemap_url: String,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            sitemap_url: config.url_for(SITEMAP_FILE),
        }
    }

    /// Write `robots.txt` into `output_dir`, allowing all crawlers and
    /// pointing them at the sitemap.
    pub fn generate(&self, output_dir: &Path) -> Result<()> {
        info!("generating robots.txt");

        let mut file = File::create(output_dir.join("robots.txt"))?;
        writeln!(file, "User-agent: *")?;
        writeln!(file, "Allow: /")?;
        writeln!(file, "Sitemap: {}", self.sitemap_url)?;

        Ok(())
    }
}
