//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Name of the optional configuration file inside the site root.
pub const CONFIG_FILE: &str = "sitegen.toml";

/// Prefix for environment overrides (`SITEGEN__BUILD__SCHEME=http`).
pub const ENV_PREFIX: &str = "SITEGEN";

/// Main configuration structure for sitegen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host used for absolute URLs (e.g., "example.com").
    pub domain: String,

    /// Directory holding the page templates.
    pub template_dir: PathBuf,

    /// Directory holding markdown and static content.
    pub content_dir: PathBuf,

    /// Directory the site is generated into. Wiped on every build.
    pub output_dir: PathBuf,

    /// Build settings.
    #[serde(default)]
    pub build: BuildConfig,
}

/// Build configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// URL scheme for sitemap and robots links.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Extension of template files, without the dot.
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Whether rendered pages are re-indented before writing.
    #[serde(default = "default_true")]
    pub pretty_html: bool,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_template_extension() -> String {
    "html".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            template_extension: default_template_extension(),
            pretty_html: true,
        }
    }
}

impl Config {
    /// Configuration for the conventional layout under `root`:
    /// `template/`, `content/` and `public/`.
    pub fn from_root(root: &Path, domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            template_dir: root.join("template"),
            content_dir: root.join("content"),
            output_dir: root.join("public"),
            build: BuildConfig::default(),
        }
    }

    /// Load configuration for the site at `root`.
    ///
    /// Sources, later ones winning: the conventional layout, an optional
    /// `sitegen.toml` in `root`, `SITEGEN__*` environment variables, and
    /// finally `domain` when given. Relative directories are taken relative
    /// to `root`.
    pub fn load(root: &Path, domain: Option<&str>) -> Result<Self> {
        let defaults = Self::from_root(Path::new(""), "");
        let file = root.join(CONFIG_FILE);

        let mut builder = config::Config::builder()
            .set_default("domain", defaults.domain)?
            .set_default("template_dir", path_value(&defaults.template_dir))?
            .set_default("content_dir", path_value(&defaults.content_dir))?
            .set_default("output_dir", path_value(&defaults.output_dir))?
            .set_default("build.scheme", defaults.build.scheme)?
            .set_default(
                "build.template_extension",
                defaults.build.template_extension,
            )?
            .set_default("build.pretty_html", defaults.build.pretty_html)?;

        if file.exists() {
            tracing::debug!(path = %file.display(), "reading configuration file");
            builder = builder.add_source(config::File::from(file.as_path()));
        }

        builder = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("domain", domain.map(str::to_string))?;

        let mut config: Config = builder.build()?.try_deserialize().map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to load configuration for {}", root.display()),
                e,
            )
        })?;

        config.resolve_paths(root);
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            return Err(CoreError::config("domain cannot be empty"));
        }

        if self.domain.contains("://") {
            return Err(CoreError::config(format!(
                "domain must be a bare host, without a scheme: {}",
                self.domain
            )));
        }

        if self.domain.contains('/') {
            return Err(CoreError::config(format!(
                "domain must not contain a path: {}",
                self.domain
            )));
        }

        if self.build.scheme.is_empty() {
            return Err(CoreError::config("build.scheme cannot be empty"));
        }

        if self.build.template_extension.is_empty() {
            return Err(CoreError::config(
                "build.template_extension cannot be empty",
            ));
        }

        if self.output_dir.starts_with(&self.content_dir)
            || self.content_dir.starts_with(&self.output_dir)
        {
            return Err(CoreError::config(format!(
                "output_dir ({}) and content_dir ({}) must not contain each other",
                self.output_dir.display(),
                self.content_dir.display()
            )));
        }

        Ok(())
    }

    /// Join relative directories onto `root`.
    fn resolve_paths(&mut self, root: &Path) {
        for dir in [
            &mut self.template_dir,
            &mut self.content_dir,
            &mut self.output_dir,
        ] {
            if dir.is_relative() {
                *dir = root.join(&*dir);
            }
        }
    }

    /// Origin of the site, e.g. `https://example.com`.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.build.scheme, self.domain)
    }

    /// Get the full URL for a site-relative path.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{path}", self.base_url())
    }
}

fn path_value(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
