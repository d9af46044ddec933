//! The built-in software-detection pattern catalog.
//!
//! A fixed table of statistical packages, each with a case-insensitive
//! presence pattern, an optional version-capture pattern, and a color tag
//! for charting. The table is compiled once into a process-wide static the
//! first time it is used; a pattern that fails to compile is a programming
//! error and aborts initialization, so request-time code never sees a
//! half-built catalog.
//!
//! Presence patterns are word-boundary-anchored alternations over product
//! names and aliases. Ambiguous names carry extra guards: the single letter
//! `R` must be followed by a version token or a product-context word,
//! `Prism` alone must be followed by a version digit, and `Python` matches
//! are discarded when immediately followed by the literal token `snake` or
//! `programming` (the regex engine has no lookaround, so that exclusion is
//! a second pattern applied to the text after each candidate match).
//!
//! # Examples
//!
//! ```
//! use softscan::catalog;
//!
//! let entry = catalog().iter().find(|e| e.key() == "R").unwrap();
//! assert!(entry.matches("analyses were performed using R version 4.1.2"));
//! assert!(!entry.matches("the lion let out a roar"));
//! assert_eq!(
//!     entry.extract_version("using R version 4.1.2 throughout"),
//!     Some("4.1.2".to_string()),
//! );
//! ```

use crate::error::CatalogError;
use crate::regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// One row of the catalog source table, patterns still in string form.
struct RawEntry {
    key: &'static str,
    display_name: &'static str,
    presence: &'static str,
    version: Option<&'static str>,
    exclude_after: Option<&'static str>,
    color: &'static str,
}

/// Catalog source table. Order here is the order detections are reported in.
///
/// Version patterns share one grammar: the product name, an optional
/// `version`/`v` lead-in, then a numeric dotted token in capture group 1.
const RAW_CATALOG: &[RawEntry] = &[
    // Single-letter product: bare \bR\b would fire on every variable name
    // and initial, so presence requires an adjacent version token, a
    // product-context word, or the RStudio alias.
    RawEntry {
        key: "R",
        display_name: "R",
        presence: r"(?i)\bR\s+(?:version\s+)?v?\d|\bR\s+(?:statistical|software|core\s+team|foundation|project|programming|language|environment)\b|\bRStudio\b",
        version: Some(r"(?i)\bR\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)+)"),
        exclude_after: None,
        color: "#1f77b4",
    },
    RawEntry {
        key: "SPSS",
        display_name: "SPSS",
        // PASW was the product name for releases 17-18
        presence: r"(?i)\bSPSS\b|\bPASW\b",
        version: Some(r"(?i)\bSPSS\b(?:\s+Statistics)?\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#ff7f0e",
    },
    RawEntry {
        key: "SAS",
        display_name: "SAS",
        presence: r"(?i)\bSAS\b",
        version: Some(r"(?i)\bSAS\s+(?:software\s+)?(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#2ca02c",
    },
    RawEntry {
        key: "Stata",
        display_name: "Stata",
        presence: r"(?i)\bStata\b",
        version: Some(
            r"(?i)\bStata\b(?:\s+(?:SE|MP|IC|BE))?\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)",
        ),
        exclude_after: None,
        color: "#d62728",
    },
    // "Prism" alone collides with ordinary English (a prism of glass), so
    // it only counts next to a version digit unless "GraphPad" precedes it.
    RawEntry {
        key: "Prism",
        display_name: "GraphPad Prism",
        presence: r"(?i)\bGraphPad\s+Prism\b|\bPrism\s+v?\d",
        version: Some(r"(?i)\bPrism\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#9467bd",
    },
    // "Python snake" and "Python programming" were observed as the dominant
    // non-software uses; a match directly followed by either token is
    // discarded.
    RawEntry {
        key: "Python",
        display_name: "Python",
        presence: r"(?i)\bPython\b",
        version: Some(r"(?i)\bPython\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: Some(r"(?i)^\s+(?:snake|programming)\b"),
        color: "#8c564b",
    },
    // The scientific-Python stack reports as one bucket; no version token
    // is meaningful across the bundle.
    RawEntry {
        key: "PythonLibs",
        display_name: "Python Libraries",
        presence: r"(?i)\b(?:NumPy|Pandas|SciPy|scikit-learn|sklearn|Matplotlib|Statsmodels|seaborn)\b",
        version: None,
        exclude_after: None,
        color: "#e377c2",
    },
    // MATLAB versions come as dotted tokens ("9.10") or release names
    // ("R2021a"); the release letter is kept in the capture.
    RawEntry {
        key: "MATLAB",
        display_name: "MATLAB",
        presence: r"(?i)\bMATLAB\b",
        version: Some(r"(?i)\bMATLAB\b\s+(?:version\s+|v\.?\s*)?R?(\d+(?:\.\d+)+|20\d{2}[ab])"),
        exclude_after: None,
        color: "#7f7f7f",
    },
    RawEntry {
        key: "Minitab",
        display_name: "Minitab",
        presence: r"(?i)\bMinitab\b",
        version: Some(r"(?i)\bMinitab\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#bcbd22",
    },
    RawEntry {
        key: "JMP",
        display_name: "JMP",
        presence: r"(?i)\bJMP\b",
        version: Some(r"(?i)\bJMP\s+(?:Pro\s+)?(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#17becf",
    },
    RawEntry {
        key: "Jamovi",
        display_name: "jamovi",
        presence: r"(?i)\bjamovi\b",
        version: Some(r"(?i)\bjamovi\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#aec7e8",
    },
    RawEntry {
        key: "JASP",
        display_name: "JASP",
        presence: r"(?i)\bJASP\b",
        version: Some(r"(?i)\bJASP\s+(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)"),
        exclude_after: None,
        color: "#ffbb78",
    },
    RawEntry {
        key: "RevMan",
        display_name: "RevMan",
        presence: r"(?i)\bRevMan\b|\bReview\s+Manager\b",
        version: Some(
            r"(?i)\b(?:RevMan|Review\s+Manager)\s+(?:\(RevMan\)\s+)?(?:version\s+|v\.?\s*)?(\d+(?:\.\d+)*)",
        ),
        exclude_after: None,
        color: "#98df8a",
    },
];

/// A compiled detection entry for one software package.
///
/// Entries live in the process-wide catalog returned by [`catalog`]; they
/// are immutable and safe to read from any thread.
#[derive(Debug)]
pub struct SoftwareEntry {
    key: &'static str,
    display_name: &'static str,
    presence: Regex,
    version: Option<Regex>,
    exclude_after: Option<Regex>,
    color: &'static str,
}

impl SoftwareEntry {
    /// Stable catalog key, unique across the table.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Human-readable product name for reports.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Decorative color tag for charting.
    pub fn color(&self) -> &'static str {
        self.color
    }

    /// Tests whether this package is mentioned anywhere in `text`.
    ///
    /// Scans presence matches left to right and discards any match whose
    /// tail is claimed by the entry's exclusion pattern; the first
    /// surviving match decides.
    pub fn matches(&self, text: &str) -> bool {
        self.presence
            .find_iter(text)
            .any(|m| !self.tail_excluded(&text[m.end()..]))
    }

    /// Extracts the version mentioned for this package, if any.
    ///
    /// Takes the first capture group of the first match of the version
    /// pattern; `None` when the entry has no version pattern or the text
    /// names no version.
    pub fn extract_version(&self, text: &str) -> Option<String> {
        self.version
            .as_ref()?
            .captures(text)?
            .get(1)
            .map(|m| m.as_str().to_string())
    }

    fn tail_excluded(&self, tail: &str) -> bool {
        self.exclude_after.as_ref().is_some_and(|re| re.is_match(tail))
    }
}

static CATALOG: LazyLock<Vec<SoftwareEntry>> =
    LazyLock::new(|| compile_catalog().expect("built-in software catalog must compile"));

/// The compiled software catalog, in declaration (reporting) order.
///
/// Compiled and validated on first use; any later call returns the same
/// shared table.
pub fn catalog() -> &'static [SoftwareEntry] {
    &CATALOG
}

/// Compile the raw table, validating every pattern and key uniqueness.
fn compile_catalog() -> Result<Vec<SoftwareEntry>, CatalogError> {
    let mut seen = HashSet::with_capacity(RAW_CATALOG.len());
    let mut entries = Vec::with_capacity(RAW_CATALOG.len());

    for raw in RAW_CATALOG {
        if !seen.insert(raw.key) {
            return Err(CatalogError::DuplicateKey { key: raw.key });
        }
        entries.push(SoftwareEntry {
            key: raw.key,
            display_name: raw.display_name,
            presence: compile_pattern(raw.key, raw.presence)?,
            version: raw
                .version
                .map(|p| compile_pattern(raw.key, p))
                .transpose()?,
            exclude_after: raw
                .exclude_after
                .map(|p| compile_pattern(raw.key, p))
                .transpose()?,
            color: raw.color,
        });
    }

    Ok(entries)
}

fn compile_pattern(key: &'static str, pattern: &str) -> Result<Regex, CatalogError> {
    Regex::new(pattern).map_err(|e| CatalogError::BadPattern {
        key,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn entry(key: &str) -> &'static SoftwareEntry {
        catalog()
            .iter()
            .find(|e| e.key() == key)
            .unwrap_or_else(|| panic!("no catalog entry for {key}"))
    }

    #[test]
    fn test_catalog_compiles_and_keys_unique() {
        let entries = compile_catalog().unwrap();
        assert_eq!(entries.len(), 13);

        let keys: HashSet<_> = entries.iter().map(|e| e.key()).collect();
        assert_eq!(keys.len(), entries.len());
    }

    #[test]
    fn test_catalog_declaration_order() {
        let keys: Vec<_> = catalog().iter().map(|e| e.key()).collect();
        assert_eq!(
            keys,
            [
                "R", "SPSS", "SAS", "Stata", "Prism", "Python", "PythonLibs", "MATLAB",
                "Minitab", "JMP", "Jamovi", "JASP", "RevMan",
            ]
        );
    }

    #[rstest]
    #[case("R", "analyses were performed using R version 4.1.2")]
    #[case("R", "computed with R 3.6.3 on Linux")]
    #[case("R", "the R statistical environment")]
    #[case("R", "scripts were written in RStudio")]
    #[case("R", "R Core Team (2021)")]
    #[case("SPSS", "data were analysed in SPSS version 26")]
    #[case("SPSS", "using PASW Statistics 18")]
    #[case("SAS", "SAS 9.4 (SAS Institute, Cary, NC)")]
    #[case("Stata", "Stata SE 17 was used for all models")]
    #[case("Prism", "plotted with GraphPad Prism")]
    #[case("Prism", "figures were produced in Prism 9.3")]
    #[case("Python", "a custom Python 3.8 script")]
    #[case("Python", "the Python scripts are available on request")]
    #[case("PythonLibs", "statistics were computed with SciPy and pandas")]
    #[case("PythonLibs", "models fit using scikit-learn")]
    #[case("MATLAB", "simulations ran in MATLAB R2021a")]
    #[case("Minitab", "Minitab 19 was used")]
    #[case("JMP", "JMP Pro 16 (SAS Institute)")]
    #[case("Jamovi", "analysed with the jamovi project software")]
    #[case("JASP", "Bayesian analyses used JASP 0.16")]
    #[case("RevMan", "meta-analysis in Review Manager (RevMan) 5.4")]
    fn test_presence_positive(#[case] key: &str, #[case] sentence: &str) {
        assert!(entry(key).matches(sentence), "{key} should match {sentence:?}");
    }

    #[rstest]
    #[case("R", "the lion let out a roar")]
    #[case("R", "group R received the placebo")]
    #[case("R", "figure 2R shows the distribution")]
    #[case("SPSS", "a spasm of activity")]
    #[case("SAS", "sassy remarks aside")]
    #[case("Stata", "statistical methods were applied")]
    #[case("Prism", "light passed through a prism of glass")]
    #[case("Python", "a python snake was the study animal")]
    #[case("Python", "the Python programming language was used")]
    #[case("MATLAB", "the matlaboratory protocol")]
    #[case("JMP", "a jump in expression levels")]
    #[case("RevMan", "the reviewer noted several issues")]
    fn test_presence_negative(#[case] key: &str, #[case] sentence: &str) {
        assert!(!entry(key).matches(sentence), "{key} should not match {sentence:?}");
    }

    /// The exclusion only fires on the literal adjacent tokens, not on
    /// later occurrences of those words.
    #[test]
    fn test_python_exclusion_is_adjacent_only() {
        let python = entry("Python");
        assert!(!python.matches("Python snake handling"));
        assert!(!python.matches("python  programming was taught"));
        assert!(python.matches("Python was used; programming was outsourced"));
        assert!(python.matches("Python, a programming language"));
        // a later clean mention survives an excluded first one
        assert!(python.matches("the python snake; data processed in Python 3.9"));
    }

    #[rstest]
    #[case("R", "using R version 4.1.2 for all analyses", Some("4.1.2"))]
    #[case("R", "using R 3.6.3 for all analyses", Some("3.6.3"))]
    #[case("R", "the R statistical environment", None)]
    #[case("SPSS", "SPSS Statistics version 26 (IBM)", Some("26"))]
    #[case("SPSS", "IBM SPSS 25.0 was used", Some("25.0"))]
    #[case("SAS", "SAS software version 9.4", Some("9.4"))]
    #[case("Stata", "Stata MP 17.0", Some("17.0"))]
    #[case("Prism", "GraphPad Prism v9.3.1", Some("9.3.1"))]
    #[case("Python", "Python 3.8.10 with NumPy", Some("3.8.10"))]
    #[case("MATLAB", "MATLAB R2021a", Some("2021a"))]
    #[case("MATLAB", "MATLAB version 9.10", Some("9.10"))]
    #[case("MATLAB", "MATLAB was used", None)]
    #[case("Minitab", "Minitab version 19.2", Some("19.2"))]
    #[case("JMP", "JMP Pro 16.1", Some("16.1"))]
    #[case("JASP", "JASP v0.16.3", Some("0.16.3"))]
    #[case("RevMan", "Review Manager (RevMan) version 5.4", Some("5.4"))]
    fn test_version_extraction(
        #[case] key: &str,
        #[case] sentence: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            entry(key).extract_version(sentence).as_deref(),
            expected,
            "version for {key} in {sentence:?}"
        );
    }

    #[test]
    fn test_python_libs_has_no_version_pattern() {
        assert_eq!(entry("PythonLibs").extract_version("NumPy 1.21.0"), None);
    }

    #[test]
    fn test_color_tags_present() {
        for e in catalog() {
            assert!(e.color().starts_with('#'), "{} color tag", e.key());
        }
    }
}
