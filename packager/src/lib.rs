//! Browser-extension upload packaging.
//!
//! This crate packages an extension source directory into a ZIP archive
//! ready for store upload and verifies that a packaged archive is readable
//! and carries `manifest.json` at its root. It backs the
//! `package-extension` and `verify-extension` binaries and can be driven
//! directly from tests.
//!
//! # Modules
//!
//! - [`archive`] - Entry naming, exclusion, packaging, and verification
//! - [`cli`] - Command-line argument definitions
//! - [`logging`] - Logger installation for the binaries
//! - [`output`] - Report formatting and exit code mapping

pub mod archive;
pub mod cli;
pub mod logging;
pub mod output;
