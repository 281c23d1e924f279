//! Report formatting for the packaging and verification tools.
//!
//! Writers take `&mut dyn Write` so the binaries print to stdout and
//! stderr while tests capture the exact text.

use crate::archive::packaging::PackageOutput;
use crate::archive::verification::VerificationReport;
use std::fmt::Display;
use std::io::{self, Write};

/// Write the packaging confirmation line, `Wrote <path>`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_package_summary(out: &mut dyn Write, output: &PackageOutput) -> io::Result<()> {
    writeln!(out, "Wrote {}", output.archive_path)
}

/// Write the verification report.
///
/// The report is the entry count, the root manifest flag, then one
/// `- <name>` line per previewed entry.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn write_verification_report(
    out: &mut dyn Write,
    report: &VerificationReport,
) -> io::Result<()> {
    writeln!(out, "Archive entries: {}", report.entry_count())?;
    writeln!(
        out,
        "Has manifest at root: {}",
        display_flag(report.has_root_manifest())
    )?;
    for name in report.preview() {
        writeln!(out, "- {name}")?;
    }
    Ok(())
}

/// Capitalised boolean, as shown in the verification report.
#[must_use]
pub const fn display_flag(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

/// Report a run result on `stderr` and return the process exit code.
///
/// Success maps to 0; any error is printed as `error: <message>` and maps
/// to 1.
pub fn exit_code_for_run_result<E: Display>(
    result: Result<(), E>,
    stderr: &mut dyn Write,
) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}

/// Write one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; nothing else can be done.
    }
}
