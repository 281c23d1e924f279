//! Upload archive packaging.
//!
//! Creates a deflate-compressed ZIP archive from an extension source tree.
//! The archive is assembled in a temporary file beside the destination and
//! renamed into place once complete, so a failed run never leaves a partial
//! archive behind or disturbs a previous one.

use super::entry_name::EntryName;
use super::exclusion::ExclusionRule;
use super::packaging_error::PackagingError;
use super::source_tree::{SourceFile, SourceTree};
use camino::{Utf8Path, Utf8PathBuf};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Permission bits stored for every entry.
const ENTRY_PERMISSIONS: u32 = 0o644;

/// Input parameters for [`package_extension`].
#[derive(Debug, Clone)]
pub struct PackageParams {
    /// Extension directory to package.
    pub source_dir: Utf8PathBuf,
    /// Where the archive is written.
    pub output_path: Utf8PathBuf,
    /// Which files are left out.
    pub exclusion: ExclusionRule,
}

/// Output produced by [`package_extension`].
#[derive(Debug, Clone)]
pub struct PackageOutput {
    /// Absolute path of the written archive.
    pub archive_path: Utf8PathBuf,
    /// Entry names in archive order.
    pub entries: Vec<EntryName>,
    /// Files skipped by the exclusion rule.
    pub excluded: Vec<EntryName>,
    /// Lowercase hex SHA-256 of the archive.
    pub sha256: String,
}

/// Compute the lowercase hex SHA-256 digest of a file.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if the file cannot be read.
pub fn compute_sha256(path: &Utf8Path) -> Result<String, PackagingError> {
    let mut file = fs::File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(buffer.get(..bytes_read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write `files` into a ZIP archive on `sink`.
///
/// Every entry is deflate-compressed and stamped with the DOS epoch and
/// `0644` permissions, so identical inputs give identical bytes.
///
/// # Errors
///
/// Returns [`PackagingError::Io`] if a source file cannot be read, or
/// [`PackagingError::Zip`] if the archive cannot be written.
pub fn write_archive<W: Write + Seek>(sink: W, files: &[SourceFile]) -> Result<W, PackagingError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
        .unix_permissions(ENTRY_PERMISSIONS);
    let mut writer = ZipWriter::new(sink);

    for file in files {
        writer.start_file(file.entry.as_str(), options)?;
        let mut source = fs::File::open(&file.path)?;
        io::copy(&mut source, &mut writer)?;
    }

    Ok(writer.finish()?)
}

/// Package an extension source tree into an upload archive.
///
/// Validates the source tree, collects and filters its files, writes the
/// archive to a temporary file beside `output_path`, then renames it over
/// the destination.
///
/// # Errors
///
/// Returns [`PackagingError::ManifestNotFound`] if the source tree has no
/// root manifest (no file is written in that case),
/// [`PackagingError::SourceUnreadable`] if the source directory cannot be
/// read, and the remaining [`PackagingError`] variants on traversal, I/O, or
/// archive failures.
pub fn package_extension(params: &PackageParams) -> Result<PackageOutput, PackagingError> {
    let tree = SourceTree::open(&params.source_dir)?;
    let listing = tree.collect(&params.exclusion, Some(params.output_path.as_path()))?;
    debug!(
        "packaging {} file(s) from {}, excluding {} ({})",
        listing.included.len(),
        tree.root(),
        listing.excluded.len(),
        params.exclusion
    );

    let output_dir = destination_dir(&params.output_path);
    fs::create_dir_all(output_dir).map_err(|source| PackagingError::Persist {
        path: params.output_path.clone(),
        source,
    })?;

    let mut staged = tempfile::Builder::new()
        .prefix(".upload-")
        .suffix(".zip.tmp")
        .tempfile_in(output_dir)
        .map_err(|source| PackagingError::Persist {
            path: params.output_path.clone(),
            source,
        })?;
    write_archive(staged.as_file_mut(), &listing.included)?;
    staged.as_file().sync_all()?;
    staged
        .persist(&params.output_path)
        .map_err(|err| PackagingError::Persist {
            path: params.output_path.clone(),
            source: err.error,
        })?;

    let archive_path = absolute_path(&params.output_path)?;
    let sha256 = compute_sha256(&archive_path)?;
    info!(
        "wrote {} entries to {archive_path} (sha256 {sha256})",
        listing.included.len()
    );

    Ok(PackageOutput {
        archive_path,
        entries: listing.included.into_iter().map(|f| f.entry).collect(),
        excluded: listing.excluded,
        sha256,
    })
}

/// Directory the archive is staged in; a bare file name stages in `.`.
fn destination_dir(output_path: &Utf8Path) -> &Utf8Path {
    match output_path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    }
}

fn absolute_path(path: &Utf8Path) -> Result<Utf8PathBuf, PackagingError> {
    let canonical = path.as_std_path().canonicalize()?;
    Utf8PathBuf::from_path_buf(canonical).map_err(PackagingError::NonUtf8Path)
}

#[cfg(test)]
#[path = "packaging_tests.rs"]
mod tests;
