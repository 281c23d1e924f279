//! Error types for archive entry naming and exclusion rules.
//!
//! Each variant provides a descriptive message identifying the invalid input
//! and the constraint that was violated.

use thiserror::Error;

/// Errors arising from invalid archive-related values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArchiveError {
    /// A relative path cannot be used as an archive entry name.
    #[error("invalid archive entry name \"{value}\": {reason}")]
    InvalidEntryName {
        /// The rejected path.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },

    /// An exclusion suffix is empty or contains a path separator.
    #[error("invalid exclusion suffix \"{value}\": {reason}")]
    InvalidExclusionSuffix {
        /// The rejected suffix.
        value: String,
        /// Description of the validation failure.
        reason: String,
    },
}

/// Result type alias using [`ArchiveError`].
pub type Result<T> = std::result::Result<T, ArchiveError>;
