//! A library for detecting statistical-software mentions in PMC open-access articles.
//!
//! `softscan` takes a batch of PubMed Central identifiers, retrieves each
//! article's JATS XML full text, reduces it to readable prose, and matches
//! it against a built-in catalog of statistical packages (R, SPSS, SAS,
//! Stata, and friends), reporting per-article detections (with versions
//! where the text names one) plus aggregate statistics.
//!
//! # Features
//!
//! - `fetch` *(default)* - the blocking NCBI E-utilities client
//!   ([`EutilsFetcher`]); disable it to bring your own
//!   [`DocumentFetcher`]
//! - `regex` *(default)* - match with the full `regex` engine
//! - `lite` - match with `regex-lite` instead, for smaller builds
//!
//! # Key Characteristics
//!
//! - **Deterministic matching**: detection is pattern-based, no inference;
//!   the same text always yields the same detections
//! - **Total extraction**: reducing a document to text never fails; an
//!   unreadable or empty document extracts to `""` and is reported as
//!   such, not raised as an error
//! - **Recoverable per-item failures**: a bad identifier or a failed
//!   fetch marks its own record and the batch carries on; a batch always
//!   returns a complete [`BatchResult`]
//!
//! # Basic Usage
//!
//! ```
//! use softscan::{ArticleDocument, BatchRunner, DocumentFetcher, FetchError, PmcId};
//! use std::time::Duration;
//!
//! // Any fetcher works; the `fetch` feature provides one for NCBI
//! // E-utilities. Here, a canned document stands in for the network.
//! struct FixtureFetcher;
//!
//! impl DocumentFetcher for FixtureFetcher {
//!     fn fetch(&self, _id: &PmcId) -> Result<ArticleDocument, FetchError> {
//!         Ok(ArticleDocument::new(
//!             "<article><body>\
//!                <p>Analyses were performed using R version 4.1.2.</p>\
//!              </body></article>",
//!         ))
//!     }
//! }
//!
//! let runner = BatchRunner::new().with_pacing(Duration::ZERO);
//! let batch = runner.run(
//!     &FixtureFetcher,
//!     &["PMC7654321".to_string(), "not-an-id".to_string()],
//! );
//!
//! assert_eq!(batch.records.len(), 2);
//! assert_eq!(batch.records[0].detections[0].software_key, "R");
//! assert_eq!(batch.records[0].detections[0].version.as_deref(), Some("4.1.2"));
//! assert_eq!(batch.records[1].error_message, "Invalid identifier format");
//! ```
//!
//! # Aggregate Reporting
//!
//! ```
//! # use softscan::{ArticleDocument, BatchRunner, DocumentFetcher, FetchError, PmcId};
//! # use std::time::Duration;
//! # struct FixtureFetcher;
//! # impl DocumentFetcher for FixtureFetcher {
//! #     fn fetch(&self, _id: &PmcId) -> Result<ArticleDocument, FetchError> {
//! #         Ok(ArticleDocument::new(
//! #             "<article><body><p>Stata 17 and R version 4.2.0 were used.</p></body></article>",
//! #         ))
//! #     }
//! # }
//! use softscan::summarize;
//!
//! let runner = BatchRunner::new().with_pacing(Duration::ZERO);
//! let batch = runner.run(&FixtureFetcher, &["PMC1".to_string(), "PMC2".to_string()]);
//!
//! let summary = summarize(&batch);
//! assert_eq!(summary.total_count, 2);
//! assert_eq!(summary.software_detected_count, 2);
//! assert_eq!(summary.frequency["R"], 2);
//! assert_eq!(summary.frequency["Stata"], 2);
//! ```
//!
//! # Error Handling
//!
//! Per-item conditions never escape the batch: they become
//! [`ArticleRecord`] fields (`error_message`, `text_accessible`). The
//! library-level [`ScanError`] only surfaces where callers invoke the
//! pieces directly, e.g. normalizing a single identifier or running a
//! fetcher by hand.
//!
//! # Thread Safety
//!
//! The compiled pattern catalog is a process-wide read-only table, safe
//! for unsynchronized concurrent reads. [`DocumentFetcher`] implementations
//! are `Send + Sync`; the built-in [`BatchRunner`] itself processes items
//! strictly sequentially, pacing each fetch to respect the upstream rate
//! limit.

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub mod batch;
pub mod catalog;
pub mod error;
pub mod summary;

mod detect;
mod fetch;
mod jats;
mod pmcid;
mod regex;
mod utils;

// Reexports
pub use batch::{BatchRunner, MAX_BATCH};
pub use catalog::{SoftwareEntry, catalog};
pub use detect::detect;
pub use error::{CatalogError, FetchError, InvalidIdentifier, ScanError};
#[cfg(feature = "fetch")]
pub use fetch::EutilsFetcher;
pub use fetch::DocumentFetcher;
pub use jats::ArticleDocument;
pub use pmcid::PmcId;
pub use summary::{BatchSummary, summarize};

/// One detected software package in one article.
///
/// A given `software_key` appears at most once per article, whatever the
/// number of mentions; `version` is the first version the text names for
/// that package, when any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Stable catalog key (e.g. `"R"`).
    pub software_key: String,
    /// Human-readable product name (e.g. `"GraphPad Prism"`).
    pub display_name: String,
    /// Extracted version string, absent when the text names none.
    pub version: Option<String>,
}

/// The finalized outcome of processing one input identifier.
///
/// Created by the batch processor, populated stage by stage, and published
/// once its item reaches a terminal state; it is plain data from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// The identifier exactly as supplied by the caller.
    pub input_identifier: String,
    /// Canonical `PMC<digits>` form, `None` when normalization failed.
    pub canonical_identifier: Option<String>,
    /// Whether article text was retrieved and extraction ran.
    pub text_accessible: bool,
    /// Detections in catalog order; empty on failure or when none matched.
    pub detections: Vec<DetectionResult>,
    /// Failure description, empty for a fully successful item.
    pub error_message: String,
    /// Wall-clock time from first stage to terminal state.
    pub processing_seconds: f64,
}

impl ArticleRecord {
    /// Whether at least one software package was detected.
    pub fn has_detections(&self) -> bool {
        !self.detections.is_empty()
    }

    /// The canonical identifier for table rows, `"Invalid"` when
    /// normalization failed.
    pub fn canonical_display(&self) -> &str {
        self.canonical_identifier.as_deref().unwrap_or("Invalid")
    }

    /// Detections as one display string, e.g. `"R 4.1.2; SPSS"`, or
    /// `"None detected"`.
    pub fn software_display(&self) -> String {
        if self.detections.is_empty() {
            return "None detected".to_string();
        }
        self.detections
            .iter()
            .map(|d| match &d.version {
                Some(version) => format!("{} {}", d.display_name, version),
                None => d.display_name.clone(),
            })
            .join("; ")
    }
}

/// One timestamped line of the batch log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the event was recorded.
    pub at: DateTime<Utc>,
    /// Human-readable message, including the item identifier where one
    /// applies.
    pub message: String,
}

impl std::fmt::Display for LogEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.at.format("%H:%M:%S"), self.message)
    }
}

/// Everything one batch invocation produced.
///
/// Records preserve input order. The result is owned by the caller and
/// carries no references into the library; the next batch produces a
/// fresh one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    /// One record per input identifier, in input order.
    pub records: Vec<ArticleRecord>,
    /// The running log, in emission order.
    pub log: Vec<LogEntry>,
}
