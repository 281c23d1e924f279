//! Error types for extension packaging operations.
//!
//! Covers source tree validation, directory traversal, archive writing, and
//! the final rename of the finished archive into place.

use camino::Utf8PathBuf;
use std::path::PathBuf;
use thiserror::Error;

/// Errors arising from packaging an extension directory.
#[derive(Debug, Error)]
pub enum PackagingError {
    /// The source directory is missing, unreadable, or not a directory.
    #[error("cannot read source directory {path}: {source}")]
    SourceUnreadable {
        /// The source directory that was requested.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source directory has no `manifest.json` at its root.
    #[error("manifest.json not found under {source_dir}")]
    ManifestNotFound {
        /// The source directory that was inspected.
        source_dir: Utf8PathBuf,
    },

    /// A directory inside the source tree could not be traversed.
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A source path is not valid UTF-8 and cannot name an archive entry.
    #[error("path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    /// A source path cannot be expressed as an archive entry name.
    #[error(transparent)]
    InvalidEntryName(#[from] super::error::ArchiveError),

    /// The ZIP writer rejected an entry or failed to finish the archive.
    #[error("failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// The finished archive could not be moved to its destination.
    #[error("failed to write {path}: {source}")]
    Persist {
        /// The requested output path.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An I/O operation failed (reading a source file, writing the archive).
    #[error("I/O error during packaging: {0}")]
    Io(#[from] std::io::Error),
}
