//! Unit tests for archive verification.

use super::*;
use rstest::{fixture, rstest};
use std::io::Write;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

fn archive_path(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join("upload-extension.zip")).expect("utf8 temp dir")
}

/// Write a ZIP archive holding `entries` with the given compression.
fn write_zip(path: &Utf8Path, entries: &[(&str, &str)], method: CompressionMethod) {
    let file = fs::File::create(path).expect("create archive");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(method);
    for (name, contents) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(contents.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive");
}

#[rstest]
fn reports_concrete_archive(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    write_zip(
        &path,
        &[("app.js", "console.log(1)"), ("manifest.json", "{}")],
        CompressionMethod::Deflated,
    );

    let report = verify_archive(&VerifyParams::new(path.clone())).expect("verification");

    assert_eq!(report.archive_path(), path.as_path());
    assert_eq!(report.entry_count(), 2);
    assert!(report.has_root_manifest());
    assert_eq!(report.preview(), ["app.js", "manifest.json"]);
    assert_eq!(report.leaked_source_maps(), 0);
    report.ensure_root_manifest().expect("manifest present");
}

#[rstest]
fn missing_file_is_not_found(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);

    let err = verify_archive(&VerifyParams::new(path.clone())).expect_err("missing");

    assert!(matches!(
        err,
        VerificationError::ArchiveNotFound { path: ref p } if p == &path
    ));
    assert_eq!(err.to_string(), format!("archive not found: {path}"));
}

#[rstest]
#[case::garbage(b"this is not a zip archive".as_slice())]
#[case::empty(b"".as_slice())]
#[case::truncated_header(b"PK\x03\x04".as_slice())]
fn unparsable_file_is_corrupt(temp_dir: TempDir, #[case] contents: &[u8]) {
    let path = archive_path(&temp_dir);
    fs::write(&path, contents).expect("write");

    let err = verify_archive(&VerifyParams::new(path)).expect_err("corrupt");

    assert!(matches!(err, VerificationError::CorruptArchive { .. }));
}

#[cfg(unix)]
#[rstest]
fn directory_is_unreadable_or_corrupt(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    fs::create_dir_all(&path).expect("mkdir");

    let err = verify_archive(&VerifyParams::new(path)).expect_err("directory");

    assert!(!matches!(err, VerificationError::ArchiveNotFound { .. }));
}

#[rstest]
fn preview_is_capped_but_count_is_complete(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    let names: Vec<String> = (1..=15).map(|i| format!("file{i:02}.js")).collect();
    let entries: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "x")).collect();
    write_zip(&path, &entries, CompressionMethod::Deflated);

    let report = verify_archive(&VerifyParams::new(path)).expect("verification");

    assert_eq!(report.entry_count(), 15);
    assert_eq!(report.preview().len(), DEFAULT_PREVIEW_LIMIT);
    assert_eq!(report.preview(), names.get(..10).expect("ten names"));
    assert!(!report.has_root_manifest());
}

#[rstest]
#[case::zero(0, 0)]
#[case::three(3, 3)]
#[case::beyond(50, 4)]
fn preview_limit_is_configurable(
    temp_dir: TempDir,
    #[case] limit: usize,
    #[case] expected: usize,
) {
    let path = archive_path(&temp_dir);
    write_zip(
        &path,
        &[
            ("manifest.json", "{}"),
            ("a.js", "a"),
            ("b.js", "b"),
            ("c.js", "c"),
        ],
        CompressionMethod::Deflated,
    );
    let params = VerifyParams {
        preview_limit: limit,
        ..VerifyParams::new(path)
    };

    let report = verify_archive(&params).expect("verification");

    assert_eq!(report.preview().len(), expected);
}

#[rstest]
fn nested_manifest_does_not_count(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    write_zip(
        &path,
        &[("extension/manifest.json", "{}"), ("extension/app.js", "x")],
        CompressionMethod::Deflated,
    );

    let report = verify_archive(&VerifyParams::new(path.clone())).expect("verification");

    assert!(!report.has_root_manifest());
    let err = report.ensure_root_manifest().expect_err("no root manifest");
    assert_eq!(
        err.to_string(),
        format!("manifest.json missing at archive root of {path}")
    );
}

#[rstest]
fn counts_leaked_source_maps(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    write_zip(
        &path,
        &[
            ("manifest.json", "{}"),
            ("app.js", "x"),
            ("app.js.map", "{}"),
        ],
        CompressionMethod::Deflated,
    );

    let report = verify_archive(&VerifyParams::new(path)).expect("verification");

    assert_eq!(report.leaked_source_maps(), 1);
    assert!(report.has_root_manifest());
}

#[rstest]
fn check_entries_accepts_intact_archive(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    write_zip(
        &path,
        &[("manifest.json", "{}"), ("app.js", "console.log(1)")],
        CompressionMethod::Deflated,
    );
    let params = VerifyParams {
        check_entries: true,
        ..VerifyParams::new(path)
    };

    let report = verify_archive(&params).expect("intact archive");

    assert_eq!(report.entry_count(), 2);
}

#[rstest]
fn check_entries_detects_crc_mismatch(temp_dir: TempDir) {
    let path = archive_path(&temp_dir);
    let payload = "payload that will be damaged on disk";
    write_zip(
        &path,
        &[("manifest.json", "{}"), ("app.js", payload)],
        CompressionMethod::Stored,
    );
    let mut bytes = fs::read(&path).expect("read archive");
    let offset = bytes
        .windows(payload.len())
        .position(|window| window == payload.as_bytes())
        .expect("stored payload is present verbatim");
    if let Some(byte) = bytes.get_mut(offset) {
        *byte ^= 0xff;
    }
    fs::write(&path, bytes).expect("write damaged archive");

    let listing_only = verify_archive(&VerifyParams::new(path.clone()));
    assert!(listing_only.is_ok(), "listing does not inflate entries");

    let params = VerifyParams {
        check_entries: true,
        ..VerifyParams::new(path)
    };
    let err = verify_archive(&params).expect_err("crc mismatch");
    assert!(matches!(
        err,
        VerificationError::CorruptEntry { ref name, .. } if name == "app.js"
    ));
}
