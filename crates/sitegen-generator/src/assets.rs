//! Static asset copying.

use std::{
    fs,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Copy failed.
    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// Copy `source` to `dest` byte for byte, creating parent directories.
///
/// Returns the number of bytes copied.
pub fn copy_asset(source: &Path, dest: &Path) -> Result<u64> {
    let copy = || -> std::io::Result<u64> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, dest)
    };

    let bytes = copy().map_err(|source_err| AssetError::Copy {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: source_err,
    })?;

    debug!(from = %source.display(), to = %dest.display(), bytes, "copied asset");
    Ok(bytes)
}
