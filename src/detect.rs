//! Software-mention detection over extracted article text.

use crate::DetectionResult;
use crate::catalog::catalog;

/// Detects software mentions in normalized article text.
///
/// Every catalog entry is tested against the full text; detections are
/// returned in catalog-declaration order (not match-position order), at
/// most one per software key. An entry with a version pattern also gets
/// the first version capture from the text, when one exists.
///
/// Empty input short-circuits to an empty result without scanning the
/// catalog. The function is pure: identical text always yields identical
/// detections.
///
/// # Examples
///
/// ```
/// use softscan::detect;
///
/// let text = "Analyses were performed using R version 4.1.2 and SPSS 26.";
/// let found = detect(text);
///
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].software_key, "R");
/// assert_eq!(found[0].version.as_deref(), Some("4.1.2"));
/// assert_eq!(found[1].software_key, "SPSS");
///
/// assert!(detect("").is_empty());
/// ```
pub fn detect(text: &str) -> Vec<DetectionResult> {
    if text.is_empty() {
        return Vec::new();
    }

    catalog()
        .iter()
        .filter(|entry| entry.matches(text))
        .map(|entry| DetectionResult {
            software_key: entry.key().to_string(),
            display_name: entry.display_name().to_string(),
            version: entry.extract_version(text),
        })
        .collect()
}
