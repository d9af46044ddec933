//! PMC identifier normalization.
//!
//! PubMed Central accession numbers are written inconsistently in the wild:
//! `PMC7654321`, `pmc7654321`, or the bare digit run `7654321`. This module
//! canonicalizes all of them to the `PMC<digits>` form the repository uses,
//! rejecting anything that is not a digit run after prefix stripping.

use crate::error::InvalidIdentifier;
use compact_str::{CompactString, format_compact};
use serde::{Deserialize, Serialize};

/// Canonical accession prefix, re-applied in this casing after stripping.
const PMC_PREFIX: &str = "PMC";

/// A normalized PMC identifier in canonical `PMC<digits>` form.
///
/// Construct via [`PmcId::normalize`]; a value of this type is always
/// well-formed.
///
/// # Examples
///
/// ```
/// use softscan::PmcId;
///
/// let id = PmcId::normalize("pmc7654321").unwrap();
/// assert_eq!(id.as_str(), "PMC7654321");
/// assert_eq!(id.digits(), "7654321");
///
/// // The bare digit run and any prefix casing normalize identically.
/// assert_eq!(PmcId::normalize("7654321").unwrap(), id);
/// assert_eq!(PmcId::normalize(" PMC7654321 ").unwrap(), id);
///
/// assert!(PmcId::normalize("abc123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PmcId(CompactString);

impl PmcId {
    /// Validates and canonicalizes a raw user-supplied identifier.
    ///
    /// Surrounding whitespace is trimmed and one leading case-insensitive
    /// `PMC` prefix is stripped; the remainder must be a non-empty ASCII
    /// digit run.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidIdentifier`] when the remainder is empty or
    /// non-numeric.
    pub fn normalize(raw: &str) -> Result<Self, InvalidIdentifier> {
        let trimmed = raw.trim();
        let digits = strip_prefix_ci(trimmed, PMC_PREFIX);

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidIdentifier::new(raw));
        }

        Ok(Self(format_compact!("{PMC_PREFIX}{digits}")))
    }

    /// The canonical identifier, e.g. `"PMC7654321"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric accession part without the prefix.
    pub fn digits(&self) -> &str {
        &self.0[PMC_PREFIX.len()..]
    }
}

impl std::fmt::Display for PmcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PmcId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Strip one leading `prefix` from `s`, ignoring ASCII case.
fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> &'a str {
    match s.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => &s[prefix.len()..],
        _ => s,
    }
}
