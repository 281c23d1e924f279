//! Upload archive domain model, packaging, and verification.
//!
//! # Sub-modules
//!
//! - [`entry_name`] — Forward-slash archive entry name newtype (`EntryName`).
//! - [`error`] — Validation errors for entry names and exclusion suffixes.
//! - [`exclusion`] — File-name exclusion rule (`ExclusionRule`).
//! - [`packaging`] — Source tree to ZIP archive, written atomically.
//! - [`packaging_error`] — Error types for packaging operations.
//! - [`source_tree`] — Manifest precondition and deterministic traversal.
//! - [`verification`] — Archive listing and root manifest check.
//! - [`verification_error`] — Error types for verification.

pub mod entry_name;
pub mod error;
pub mod exclusion;
pub mod packaging;
pub mod packaging_error;
pub mod source_tree;
pub mod verification;
pub mod verification_error;

/// File that must sit at the root of both the source tree and the archive.
pub const ROOT_MANIFEST: &str = "manifest.json";
