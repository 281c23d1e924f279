//! Error types for upload archive verification.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors arising from verifying an upload archive.
///
/// A missing file, an unreadable file, and a file that is not a ZIP archive
/// are reported as distinct variants.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// No file exists at the archive path.
    #[error("archive not found: {path}")]
    ArchiveNotFound {
        /// The archive path that was requested.
        path: Utf8PathBuf,
    },

    /// The archive exists but could not be opened.
    #[error("cannot read archive {path}: {source}")]
    Unreadable {
        /// The archive path that was requested.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid ZIP archive.
    #[error("corrupt archive {path}: {source}")]
    CorruptArchive {
        /// The archive path that was requested.
        path: Utf8PathBuf,
        /// The parse failure reported by the ZIP reader.
        #[source]
        source: zip::result::ZipError,
    },

    /// An entry failed to decompress or its checksum did not match.
    #[error("corrupt entry {name} in {path}: {source}")]
    CorruptEntry {
        /// The archive path that was requested.
        path: Utf8PathBuf,
        /// Name of the damaged entry.
        name: String,
        /// The decompression or checksum failure.
        #[source]
        source: std::io::Error,
    },

    /// The archive has no `manifest.json` entry at its root.
    #[error("manifest.json missing at archive root of {path}")]
    MissingRootManifest {
        /// The archive path that was verified.
        path: Utf8PathBuf,
    },
}
