//! Packaging binary for the extension upload archive.
//!
//! Thin CLI wrapper around [`extension_packager::archive::packaging`]. Run
//! with no arguments from the project root to package `extension/` into
//! `upload-extension.zip`.

use clap::Parser;
use extension_packager::archive::error::ArchiveError;
use extension_packager::archive::packaging::package_extension;
use extension_packager::archive::packaging_error::PackagingError;
use extension_packager::cli::PackageCli;
use extension_packager::logging;
use extension_packager::output::{exit_code_for_run_result, write_package_summary};
use std::io::Write;
use thiserror::Error;

/// Errors returned by the packaging CLI.
#[derive(Debug, Error)]
enum PackageCliError {
    /// An invalid `--exclude` suffix.
    #[error("{0}")]
    Archive(#[from] ArchiveError),

    /// An error while validating the source tree or writing the archive.
    #[error("{0}")]
    Packaging(#[from] PackagingError),

    /// The confirmation line could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn main() {
    let cli = PackageCli::parse();
    logging::init(&cli.log);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Package the source tree and report the archive path on `stdout`.
fn run(cli: &PackageCli, stdout: &mut dyn Write) -> Result<(), PackageCliError> {
    let params = cli.params()?;
    let output = package_extension(&params)?;
    write_package_summary(stdout, &output)?;
    Ok(())
}
