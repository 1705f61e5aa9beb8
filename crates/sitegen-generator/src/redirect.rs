//! Host redirect generation.
//!
//! Produces an output directory holding only an Apache `.htaccess` that
//! permanently redirects every request for one host to another.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};

/// File name of the generated rule file.
pub const HTACCESS_FILE: &str = ".htaccess";

/// Redirect generation errors.
#[derive(Debug, Error)]
pub enum RedirectError {
    /// A host name is empty.
    #[error("redirect {0} host must not be empty")]
    EmptyHost(&'static str),

    /// Output directory could not be prepared or written.
    #[error("failed to write redirect to {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for redirect operations.
pub type Result<T> = std::result::Result<T, RedirectError>;

/// Generator for a host-to-host 301 redirect.
#[derive(Debug, Clone)]
pub struct RedirectGenerator {
    from: String,
    to: String,
}

impl RedirectGenerator {
    /// Redirect requests for host `from` to `https://{to}`.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Rule file contents.
    pub fn htaccess(&self) -> Result<String> {
        if self.from.is_empty() {
            return Err(RedirectError::EmptyHost("source"));
        }
        if self.to.is_empty() {
            return Err(RedirectError::EmptyHost("destination"));
        }

        Ok(format!(
            "RewriteEngine On\n\
             RewriteCond %{{HTTP_HOST}} {}\n\
             RewriteRule (.*) https://{}/$1 [R=301,L]\n",
            self.from, self.to
        ))
    }

    /// Clear `output_dir` and write the `.htaccess` into it.
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf> {
        let htaccess = self.htaccess()?;
        let io_err = |source: std::io::Error| RedirectError::Io {
            path: output_dir.to_path_buf(),
            source,
        };

        if output_dir.exists() {
            debug!(dir = %output_dir.display(), "cleaning output directory");
            fs::remove_dir_all(output_dir).map_err(io_err)?;
        }
        fs::create_dir_all(output_dir).map_err(io_err)?;

        let path = output_dir.join(HTACCESS_FILE);
        fs::write(&path, htaccess).map_err(io_err)?;

        info!(from = %self.from, to = %self.to, "wrote redirect");
        Ok(path)
    }
}
