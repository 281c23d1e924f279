//! Source tree discovery for extension packaging.
//!
//! Validates that the extension directory carries its root manifest and
//! collects the files to archive in a deterministic order.

use super::ROOT_MANIFEST;
use super::entry_name::EntryName;
use super::error::ArchiveError;
use super::exclusion::ExclusionRule;
use super::packaging_error::PackagingError;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use std::fs;
use walkdir::WalkDir;

/// A file selected for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Location of the file on disk.
    pub path: Utf8PathBuf,
    /// Name the file is stored under inside the archive.
    pub entry: EntryName,
}

/// Files discovered beneath a source tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceListing {
    /// Files to archive, in traversal order.
    pub included: Vec<SourceFile>,
    /// Files left out by the exclusion rule.
    pub excluded: Vec<EntryName>,
}

/// An extension source directory known to contain a root manifest.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: Utf8PathBuf,
}

impl SourceTree {
    /// Open `root` as a source tree.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::SourceUnreadable`] if `root` cannot be
    /// inspected or is not a directory, or
    /// [`PackagingError::ManifestNotFound`] if `root/manifest.json` is not a
    /// regular file.
    pub fn open(root: &Utf8Path) -> Result<Self, PackagingError> {
        let metadata = fs::metadata(root).map_err(|source| PackagingError::SourceUnreadable {
            path: root.to_owned(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(PackagingError::SourceUnreadable {
                path: root.to_owned(),
                source: std::io::Error::other("not a directory"),
            });
        }

        if !root.join(ROOT_MANIFEST).is_file() {
            return Err(PackagingError::ManifestNotFound {
                source_dir: root.to_owned(),
            });
        }

        Ok(Self {
            root: root.to_owned(),
        })
    }

    /// The directory this tree was opened from.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Walk the tree and partition its files by `rule`.
    ///
    /// Directory entries are visited in file-name order. Symlinks to files
    /// are followed; symlinked directories are not descended. Any file that
    /// resolves to `skip` (typically the output archive) is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PackagingError::Walk`] if a directory cannot be read,
    /// [`PackagingError::NonUtf8Path`] for paths that are not UTF-8, or
    /// [`PackagingError::InvalidEntryName`] if a relative path cannot be
    /// expressed as an entry name.
    pub fn collect(
        &self,
        rule: &ExclusionRule,
        skip: Option<&Utf8Path>,
    ) -> Result<SourceListing, PackagingError> {
        let mut listing = SourceListing::default();

        for walk_result in WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = walk_result?;
            let path = Utf8Path::from_path(entry.path())
                .ok_or_else(|| PackagingError::NonUtf8Path(entry.path().to_path_buf()))?;

            // `is_file` follows symlinks, so linked files are archived with
            // their target's content.
            if entry.file_type().is_dir() || !path.is_file() {
                continue;
            }

            if skip.is_some_and(|target| is_same_file(path, target)) {
                debug!("skipping {path}: it is the output archive");
                continue;
            }

            let relative =
                path.strip_prefix(&self.root)
                    .map_err(|_| ArchiveError::InvalidEntryName {
                        value: path.to_string(),
                        reason: format!("path is outside the source tree {}", self.root),
                    })?;
            let entry_name = EntryName::from_relative(relative)?;

            if !entry_name.is_root_manifest() && rule.excludes(entry_name.file_name()) {
                debug!("excluding {entry_name}");
                listing.excluded.push(entry_name);
                continue;
            }

            debug!("including {entry_name}");
            listing.included.push(SourceFile {
                path: path.to_owned(),
                entry: entry_name,
            });
        }

        Ok(listing)
    }
}

/// Compare two paths by their canonical location.
///
/// Only paths that share a file name are canonicalised.
fn is_same_file(candidate: &Utf8Path, target: &Utf8Path) -> bool {
    if candidate.file_name() != target.file_name() {
        return false;
    }
    match (candidate.canonicalize(), target.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
