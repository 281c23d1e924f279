//! Structural verification of a packaged upload archive.
//!
//! Opens the archive read-only, lists its entries in central-directory
//! order, and checks that a `manifest.json` sits at the archive root.
//! Optionally inflates every entry so CRC mismatches surface before upload.

use super::ROOT_MANIFEST;
use super::exclusion::ExclusionRule;
use super::verification_error::VerificationError;
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, trace, warn};
use std::fs;
use std::io::{self, Read, Seek};
use zip::ZipArchive;

/// Number of entry names previewed by default.
pub const DEFAULT_PREVIEW_LIMIT: usize = 10;

/// Input parameters for [`verify_archive`].
#[derive(Debug, Clone)]
pub struct VerifyParams {
    /// Archive to verify.
    pub archive_path: Utf8PathBuf,
    /// How many entry names the report previews.
    pub preview_limit: usize,
    /// Inflate every entry and validate its checksum.
    pub check_entries: bool,
}

impl VerifyParams {
    /// Parameters with the default preview limit and no entry check.
    #[must_use]
    pub fn new(archive_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            preview_limit: DEFAULT_PREVIEW_LIMIT,
            check_entries: false,
        }
    }
}

/// Summary of a verified archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    archive_path: Utf8PathBuf,
    entries: Vec<String>,
    has_root_manifest: bool,
    preview_limit: usize,
    leaked_source_maps: usize,
}

impl VerificationReport {
    /// Build a report from the entry names of an archive.
    #[must_use]
    pub fn new(archive_path: Utf8PathBuf, entries: Vec<String>, preview_limit: usize) -> Self {
        let has_root_manifest = entries.iter().any(|name| name == ROOT_MANIFEST);
        let source_maps = ExclusionRule::default();
        let leaked_source_maps = entries
            .iter()
            .filter(|name| source_maps.excludes(name))
            .count();
        Self {
            archive_path,
            entries,
            has_root_manifest,
            preview_limit,
            leaked_source_maps,
        }
    }

    /// The verified archive.
    #[must_use]
    pub fn archive_path(&self) -> &Utf8Path {
        &self.archive_path
    }

    /// All entry names in archive order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Total number of entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether an entry named exactly `manifest.json` exists.
    #[must_use]
    pub fn has_root_manifest(&self) -> bool {
        self.has_root_manifest
    }

    /// The first entries, up to the preview limit.
    #[must_use]
    pub fn preview(&self) -> &[String] {
        let end = self.preview_limit.min(self.entries.len());
        self.entries.get(..end).unwrap_or_default()
    }

    /// Number of source map entries that should have been excluded.
    #[must_use]
    pub fn leaked_source_maps(&self) -> usize {
        self.leaked_source_maps
    }

    /// Fail unless the archive has a root manifest.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError::MissingRootManifest`] when the root
    /// manifest entry is absent.
    pub fn ensure_root_manifest(&self) -> Result<(), VerificationError> {
        if self.has_root_manifest {
            Ok(())
        } else {
            Err(VerificationError::MissingRootManifest {
                path: self.archive_path.clone(),
            })
        }
    }
}

/// Open an archive and summarise its entries.
///
/// A missing root manifest does not fail this call; use
/// [`VerificationReport::ensure_root_manifest`] after reporting.
///
/// # Errors
///
/// Returns [`VerificationError::ArchiveNotFound`] if no file exists at the
/// path, [`VerificationError::Unreadable`] if it cannot be opened,
/// [`VerificationError::CorruptArchive`] if it is not a ZIP archive, and
/// [`VerificationError::CorruptEntry`] if `check_entries` is set and an
/// entry fails to inflate.
pub fn verify_archive(params: &VerifyParams) -> Result<VerificationReport, VerificationError> {
    let path = &params.archive_path;
    let file = fs::File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => VerificationError::ArchiveNotFound { path: path.clone() },
        _ => VerificationError::Unreadable {
            path: path.clone(),
            source,
        },
    })?;
    let mut archive = ZipArchive::new(file).map_err(|source| corrupt(path, source))?;

    let entries = list_entries(&mut archive).map_err(|source| corrupt(path, source))?;
    debug!("{path} holds {} entries", entries.len());

    if params.check_entries {
        check_entries(&mut archive, path)?;
    }

    let report = VerificationReport::new(path.clone(), entries, params.preview_limit);
    if report.leaked_source_maps() > 0 {
        warn!(
            "{path} contains {} source map(s) that are normally excluded",
            report.leaked_source_maps()
        );
    }
    Ok(report)
}

/// Entry names in central-directory order, without decompressing.
fn list_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<String>, zip::result::ZipError> {
    let mut names = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        names.push(archive.by_index_raw(index)?.name().to_owned());
    }
    Ok(names)
}

/// Inflate every entry; reading to the end validates the CRC-32.
fn check_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &Utf8Path,
) -> Result<(), VerificationError> {
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| corrupt(path, source))?;
        let name = entry.name().to_owned();
        let bytes = io::copy(&mut entry, &mut io::sink()).map_err(|source| {
            VerificationError::CorruptEntry {
                path: path.to_owned(),
                name: name.clone(),
                source,
            }
        })?;
        trace!("{name}: {bytes} bytes inflated");
    }
    Ok(())
}

fn corrupt(path: &Utf8Path, source: zip::result::ZipError) -> VerificationError {
    VerificationError::CorruptArchive {
        path: path.to_owned(),
        source,
    }
}

#[cfg(test)]
#[path = "verification_tests.rs"]
mod tests;
