//! Verification binary for the extension upload archive.
//!
//! Lists the archive's entries, previews the first few, and fails unless
//! `manifest.json` sits at the archive root. The report is printed before
//! the root manifest check so a failing archive still shows its contents.

use clap::Parser;
use extension_packager::archive::verification::verify_archive;
use extension_packager::archive::verification_error::VerificationError;
use extension_packager::cli::VerifyCli;
use extension_packager::logging;
use extension_packager::output::{exit_code_for_run_result, write_verification_report};
use std::io::Write;
use thiserror::Error;

/// Errors returned by the verification CLI.
#[derive(Debug, Error)]
enum VerifyCliError {
    /// The archive is missing, unreadable, corrupt, or lacks a root manifest.
    #[error("{0}")]
    Verification(#[from] VerificationError),

    /// The report could not be written.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

fn main() {
    let cli = VerifyCli::parse();
    logging::init(&cli.log);
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let exit_code = exit_code_for_run_result(run(&cli, &mut stdout), &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// Verify the archive, print its report on `stdout`, then enforce the
/// root manifest requirement.
fn run(cli: &VerifyCli, stdout: &mut dyn Write) -> Result<(), VerifyCliError> {
    let report = verify_archive(&cli.params())?;
    write_verification_report(stdout, &report)?;
    stdout.flush()?;
    report.ensure_root_manifest()?;
    Ok(())
}
