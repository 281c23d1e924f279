//! Archive entry name newtype.
//!
//! Entry names are the source-tree-relative paths stored inside the upload
//! archive. They always use `/` separators regardless of the host platform,
//! and can never point outside the archive root.

use super::error::{ArchiveError, Result};
use camino::{Utf8Component, Utf8Path};
use std::fmt;

/// A validated, forward-slash separated archive entry name.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use extension_packager::archive::entry_name::EntryName;
///
/// let name = EntryName::from_relative(Utf8Path::new("popup/popup.js")).expect("valid");
/// assert_eq!(name.as_str(), "popup/popup.js");
/// assert!(!name.is_root_manifest());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryName(String);

impl EntryName {
    /// Build an entry name from a path relative to the source tree root.
    ///
    /// Host separators are normalised to `/`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidEntryName`] if the path is empty,
    /// absolute, or contains `.` or `..` components.
    pub fn from_relative(path: &Utf8Path) -> Result<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Utf8Component::Normal(segment) => segments.push(segment),
                Utf8Component::ParentDir => {
                    return Err(invalid(path, "parent directory components are not allowed"));
                }
                Utf8Component::CurDir => {
                    return Err(invalid(path, "current directory components are not allowed"));
                }
                Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                    return Err(invalid(path, "absolute paths are not allowed"));
                }
            }
        }

        if segments.is_empty() {
            return Err(invalid(path, "name must not be empty"));
        }

        Ok(Self(segments.join("/")))
    }

    /// Return the entry name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the final path segment.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// Whether this entry is the manifest at the archive root.
    #[must_use]
    pub fn is_root_manifest(&self) -> bool {
        self.0 == super::ROOT_MANIFEST
    }
}

fn invalid(path: &Utf8Path, reason: &str) -> ArchiveError {
    ArchiveError::InvalidEntryName {
        value: path.to_string(),
        reason: reason.to_owned(),
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
