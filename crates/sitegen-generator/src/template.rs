//! Page template rendering.
//!
//! Templates are Jinja-style files loaded by name from the template
//! directory. A page naming `template = "post"` in its front matter renders
//! through `post.html` (the extension is configurable). Each render gets
//! three variables:
//!
//! - `current`: the page being rendered
//! - `all`: every page of the site, in content order, `current` included
//! - `other`: every static asset; JSON files carry their parsed `content`
//!
//! Templates ending in `.html` auto-escape output, so page bodies are
//! emitted with `{{ current.content|safe }}`.

use std::path::{Path, PathBuf};

use minijinja::{Environment, ErrorKind, path_loader};
use serde::Serialize;
use sitegen_core::{PageContent, StaticAsset};
use thiserror::Error;
use tracing::trace;

/// Template rendering errors.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Page does not say which template to use.
    #[error("page {url} has no `template` key in its front matter")]
    Unspecified { url: String },

    /// Template not found.
    #[error("template not found: {name} (in {})", dir.display())]
    NotFound { name: String, dir: PathBuf },

    /// Template failed to compile or render.
    #[error("failed to render template {name}: {source:#}")]
    Render {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Variables handed to a template.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    /// Page being rendered.
    pub current: &'a PageContent,

    /// All pages, in encounter order.
    pub all: &'a [PageContent],

    /// All static assets.
    pub other: &'a [StaticAsset],
}

/// Template engine over a directory of template files.
#[derive(Debug)]
pub struct TemplateEngine {
    env: Environment<'static>,
    dir: PathBuf,
    extension: String,
}

impl TemplateEngine {
    /// Create an engine loading `<name>.<extension>` files from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let dir = dir.into();
        let mut env = Environment::new();
        env.set_loader(path_loader(&dir));

        Self {
            env,
            dir,
            extension: extension.into(),
        }
    }

    /// Template directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for a template identifier.
    #[must_use]
    pub fn file_name(&self, id: &str) -> String {
        format!("{id}.{}", self.extension)
    }

    /// Render the template named by the current page's front matter.
    pub fn render_page(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let id = ctx
            .current
            .template()
            .ok_or_else(|| TemplateError::Unspecified {
                url: ctx.current.url().to_string(),
            })?;

        self.render(id, ctx)
    }

    /// Render template `id` with the given context.
    pub fn render(&self, id: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let name = self.file_name(id);
        trace!(template = %name, url = ctx.current.url(), "rendering");

        let template = self.env.get_template(&name).map_err(|e| {
            if e.kind() == ErrorKind::TemplateNotFound {
                TemplateError::NotFound {
                    name: name.clone(),
                    dir: self.dir.clone(),
                }
            } else {
                TemplateError::Render {
                    name: name.clone(),
                    source: e,
                }
            }
        })?;

        template
            .render(ctx)
            .map_err(|source| TemplateError::Render { name, source })
    }
}
