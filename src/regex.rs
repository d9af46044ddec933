//! Regex engine selection.
//!
//! The crate compiles against the full `regex` engine by default. The `lite`
//! feature swaps in `regex-lite` for smaller binaries; both expose the same
//! `Regex` surface used here (`new`, `is_match`, `find_iter`, `captures`).

#[cfg(feature = "regex")]
pub(crate) use ::regex::Regex;

#[cfg(all(feature = "lite", not(feature = "regex")))]
pub(crate) use ::regex_lite::Regex;

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("either the `regex` or the `lite` feature must be enabled");
