//! Content tree traversal.
//!
//! Yields every regular file below a root, depth-first. Inside each
//! directory all files come before any subdirectory is entered, and entries
//! are ordered by name so repeated walks see the same sequence.

use std::{cmp::Ordering, path::PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Walk errors.
#[derive(Debug, Error)]
pub enum WalkError {
    /// The root or one of its descendants could not be read.
    #[error("failed to walk {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl From<walkdir::Error> for WalkError {
    fn from(source: walkdir::Error) -> Self {
        Self::Read {
            path: source.path().map(PathBuf::from).unwrap_or_default(),
            source,
        }
    }
}

/// Result type for walk operations.
pub type Result<T> = std::result::Result<T, WalkError>;

/// Lazily list all files under `root`.
///
/// Symlinks are not followed. A missing or unreadable root surfaces as the
/// first item of the iterator.
pub fn walk_files(root: impl Into<PathBuf>) -> impl Iterator<Item = Result<PathBuf>> {
    WalkDir::new(root.into())
        .min_depth(1)
        .follow_links(false)
        .sort_by(files_first)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
}

fn files_first(a: &DirEntry, b: &DirEntry) -> Ordering {
    a.file_type()
        .is_dir()
        .cmp(&b.file_type().is_dir())
        .then_with(|| a.file_name().cmp(b.file_name()))
}
