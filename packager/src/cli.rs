//! CLI argument definitions for the packaging and verification tools.
//!
//! Both binaries accept zero arguments and fall back to the historical
//! layout: `extension/` packaged into `upload-extension.zip`, both relative
//! to the working directory.

use crate::archive::error::ArchiveError;
use crate::archive::exclusion::ExclusionRule;
use crate::archive::packaging::PackageParams;
use crate::archive::verification::{DEFAULT_PREVIEW_LIMIT, VerifyParams};
use camino::Utf8PathBuf;
use clap::{Args, Parser};

/// Source directory packaged when `--source-dir` is omitted.
pub const DEFAULT_SOURCE_DIR: &str = "extension";

/// Archive written and verified when no path is given.
pub const DEFAULT_ARCHIVE_PATH: &str = "upload-extension.zip";

/// Logging flags shared by both tools.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct LogArgs {
    /// Increase log output on stderr (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Package a browser-extension directory into an upload archive.
#[derive(Parser, Debug, Clone)]
#[command(name = "package-extension")]
#[command(version, about)]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Package ./extension into ./upload-extension.zip:\n",
    "    $ package-extension\n\n",
    "  Package a build directory into a release folder:\n",
    "    $ package-extension -s build/extension -o dist/extension.zip\n\n",
    "  Also leave TypeScript sources out:\n",
    "    $ package-extension --exclude .ts",
))]
pub struct PackageCli {
    /// Extension directory containing manifest.json.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_SOURCE_DIR)]
    pub source_dir: Utf8PathBuf,

    /// Archive to write; replaced atomically if it exists.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_ARCHIVE_PATH)]
    pub output: Utf8PathBuf,

    /// Extra file-name suffix to leave out (repeatable); `.map` is always excluded.
    #[arg(long = "exclude", value_name = "SUFFIX")]
    pub exclude: Vec<String>,

    /// Logging options.
    #[command(flatten)]
    pub log: LogArgs,
}

impl PackageCli {
    /// Convert the parsed flags into packaging parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidExclusionSuffix`] if an `--exclude`
    /// value is empty or contains a path separator.
    pub fn params(&self) -> Result<PackageParams, ArchiveError> {
        Ok(PackageParams {
            source_dir: self.source_dir.clone(),
            output_path: self.output.clone(),
            exclusion: ExclusionRule::with_suffixes(self.exclude.iter().cloned())?,
        })
    }
}

/// Verify that an upload archive is readable and has a root manifest.
#[derive(Parser, Debug, Clone)]
#[command(name = "verify-extension")]
#[command(version, about)]
pub struct VerifyCli {
    /// Archive to verify.
    #[arg(value_name = "ARCHIVE", default_value = DEFAULT_ARCHIVE_PATH)]
    pub archive: Utf8PathBuf,

    /// Number of entry names to preview.
    #[arg(short = 'n', long, value_name = "N", default_value_t = DEFAULT_PREVIEW_LIMIT)]
    pub preview: usize,

    /// Inflate every entry and validate its checksum.
    #[arg(long)]
    pub check_entries: bool,

    /// Logging options.
    #[command(flatten)]
    pub log: LogArgs,
}

impl VerifyCli {
    /// Convert the parsed flags into verification parameters.
    #[must_use]
    pub fn params(&self) -> VerifyParams {
        VerifyParams {
            archive_path: self.archive.clone(),
            preview_limit: self.preview,
            check_entries: self.check_entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn package_cli_defaults_match_historical_layout() {
        let cli = PackageCli::parse_from(["package-extension"]);
        let params = cli.params().expect("default params");
        assert_eq!(params.source_dir, Utf8PathBuf::from("extension"));
        assert_eq!(params.output_path, Utf8PathBuf::from("upload-extension.zip"));
        assert_eq!(params.exclusion, ExclusionRule::default());
        assert_eq!(cli.log, LogArgs::default());
    }

    #[test]
    fn package_cli_accepts_overrides() {
        let cli = PackageCli::parse_from([
            "package-extension",
            "--source-dir",
            "build/ext",
            "-o",
            "dist/ext.zip",
            "--exclude",
            ".ts",
            "--exclude",
            ".md",
        ]);
        let params = cli.params().expect("params");
        assert_eq!(params.source_dir, Utf8PathBuf::from("build/ext"));
        assert_eq!(params.output_path, Utf8PathBuf::from("dist/ext.zip"));
        assert_eq!(params.exclusion.suffixes(), [".map", ".ts", ".md"]);
    }

    #[test]
    fn package_cli_rejects_empty_exclude_suffix() {
        let cli = PackageCli::parse_from(["package-extension", "--exclude", ""]);
        let err = cli.params().expect_err("empty suffix");
        assert!(matches!(err, ArchiveError::InvalidExclusionSuffix { .. }));
    }

    #[test]
    fn package_cli_takes_no_positional_arguments() {
        PackageCli::try_parse_from(["package-extension", "extension"])
            .expect_err("expected clap to reject a positional argument");
    }

    #[test]
    fn verify_cli_defaults_match_historical_layout() {
        let cli = VerifyCli::parse_from(["verify-extension"]);
        let params = cli.params();
        assert_eq!(params.archive_path, Utf8PathBuf::from("upload-extension.zip"));
        assert_eq!(params.preview_limit, 10);
        assert!(!params.check_entries);
    }

    #[test]
    fn verify_cli_accepts_archive_and_flags() {
        let cli = VerifyCli::parse_from([
            "verify-extension",
            "dist/ext.zip",
            "-n",
            "3",
            "--check-entries",
        ]);
        let params = cli.params();
        assert_eq!(params.archive_path, Utf8PathBuf::from("dist/ext.zip"));
        assert_eq!(params.preview_limit, 3);
        assert!(params.check_entries);
    }

    #[rstest]
    #[case::none(&["verify-extension"], 0, false)]
    #[case::one(&["verify-extension", "-v"], 1, false)]
    #[case::three(&["verify-extension", "-vvv"], 3, false)]
    #[case::quiet(&["verify-extension", "--quiet"], 0, true)]
    fn log_flags_are_parsed(#[case] args: &[&str], #[case] verbosity: u8, #[case] quiet: bool) {
        let cli = VerifyCli::parse_from(args);
        assert_eq!(cli.log.verbosity, verbosity);
        assert_eq!(cli.log.quiet, quiet);
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        VerifyCli::try_parse_from(["verify-extension", "-v", "-q"])
            .expect_err("expected clap to reject --verbose with --quiet");
    }

    #[test]
    fn verify_cli_rejects_non_numeric_preview() {
        VerifyCli::try_parse_from(["verify-extension", "--preview", "many"])
            .expect_err("expected clap to reject a non-numeric preview");
    }
}
