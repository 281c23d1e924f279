//! File-name exclusion rule applied while packaging.
//!
//! Source maps (`*.map`) are always left out of the upload archive. Callers
//! may extend the rule with further suffixes; the root manifest is exempt
//! from every suffix so a packaged archive can always be verified.

use super::error::{ArchiveError, Result};
use std::fmt;

/// Suffix excluded by every rule.
pub const SOURCE_MAP_SUFFIX: &str = ".map";

/// Predicate over file names deciding which files are left out of the archive.
///
/// # Examples
///
/// ```
/// use extension_packager::archive::exclusion::ExclusionRule;
///
/// let rule = ExclusionRule::default();
/// assert!(rule.excludes("app.js.map"));
/// assert!(!rule.excludes("app.js"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRule {
    suffixes: Vec<String>,
}

impl ExclusionRule {
    /// Build a rule that excludes `.map` plus each of `extra` suffixes.
    ///
    /// Duplicates are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidExclusionSuffix`] if a suffix is empty
    /// or contains a path separator.
    pub fn with_suffixes<I, S>(extra: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rule = Self::default();
        for suffix in extra {
            let suffix = suffix.into();
            validate_suffix(&suffix)?;
            if !rule.suffixes.contains(&suffix) {
                rule.suffixes.push(suffix);
            }
        }
        Ok(rule)
    }

    /// Whether a file called `file_name` is left out of the archive.
    #[must_use]
    pub fn excludes(&self, file_name: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| file_name.ends_with(suffix.as_str()))
    }

    /// The configured suffixes, `.map` first.
    #[must_use]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }
}

impl Default for ExclusionRule {
    fn default() -> Self {
        Self {
            suffixes: vec![SOURCE_MAP_SUFFIX.to_owned()],
        }
    }
}

impl fmt::Display for ExclusionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let patterns: Vec<String> = self.suffixes.iter().map(|s| format!("*{s}")).collect();
        f.write_str(&patterns.join(", "))
    }
}

fn validate_suffix(suffix: &str) -> Result<()> {
    let reason = if suffix.is_empty() {
        "suffix must not be empty"
    } else if suffix.contains(['/', '\\']) {
        "suffix must not contain a path separator"
    } else {
        return Ok(());
    };
    Err(ArchiveError::InvalidExclusionSuffix {
        value: suffix.to_owned(),
        reason: reason.to_owned(),
    })
}
