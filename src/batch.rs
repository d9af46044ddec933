//! Batch processing of PMC identifiers.
//!
//! The [`BatchRunner`] drives each identifier through a fixed sequence of
//! stages (normalize, fetch, extract, detect) and collects one
//! [`ArticleRecord`] per input, in input order. Failure at any stage is
//! recorded on that item and terminates it; it never aborts the batch or
//! affects sibling items, so `run` always returns a complete
//! [`BatchResult`].
//!
//! Every stage transition appends a timestamped line to a log owned by the
//! invocation; the same events are mirrored through `tracing` for ambient
//! observability.

use std::time::{Duration, Instant};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::detect::detect;
use crate::fetch::DocumentFetcher;
use crate::pmcid::PmcId;
use crate::utils::truncate_message;
use crate::{ArticleRecord, BatchResult, LogEntry};

/// Largest batch the interactive caller is expected to submit.
///
/// Enforcement (rejecting or truncating oversized input) is the caller's
/// concern; the runner itself processes whatever list it receives and
/// handles lists up to this cap without degradation.
pub const MAX_BATCH: usize = 20;

/// Upstream failure messages are truncated to this many characters before
/// being recorded on an [`ArticleRecord`].
pub const MAX_ERROR_LEN: usize = 100;

/// Pause before each fetch, to stay friendly to the upstream rate limit.
const DEFAULT_PACING: Duration = Duration::from_millis(200);

const INVALID_IDENTIFIER_MESSAGE: &str = "Invalid identifier format";
const NO_TEXT_MESSAGE: &str = "No extractable text content";

/// Splits a pasted identifier blob on commas and newlines.
///
/// Trims each piece and drops blanks; performs no validation and no
/// truncation (see [`MAX_BATCH`]).
///
/// # Examples
///
/// ```
/// use softscan::batch::split_identifiers;
///
/// assert_eq!(
///     split_identifiers("PMC1, PMC2\n\n 7654321 ,"),
///     vec!["PMC1", "PMC2", "7654321"],
/// );
/// ```
pub fn split_identifiers(raw: &str) -> Vec<String> {
    raw.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Append-only log owned by one batch invocation.
#[derive(Debug, Default)]
struct BatchLog {
    entries: Vec<LogEntry>,
}

impl BatchLog {
    fn push(&mut self, message: impl Into<String>) {
        self.entries.push(LogEntry {
            at: Utc::now(),
            message: message.into(),
        });
    }

    fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}

/// Sequential batch processor.
///
/// Construction compiles the software catalog, so a catalog defect
/// surfaces at startup rather than in the middle of a batch. The pacing
/// delay applied before each fetch is builder-configurable; tests
/// typically use [`Duration::ZERO`].
///
/// # Examples
///
/// ```
/// use softscan::{ArticleDocument, BatchRunner, DocumentFetcher, FetchError, PmcId};
/// use std::time::Duration;
///
/// struct FixtureFetcher;
///
/// impl DocumentFetcher for FixtureFetcher {
///     fn fetch(&self, _id: &PmcId) -> Result<ArticleDocument, FetchError> {
///         Ok(ArticleDocument::new(
///             "<article><body><p>Stata 17 was used throughout.</p></body></article>",
///         ))
///     }
/// }
///
/// let runner = BatchRunner::new().with_pacing(Duration::ZERO);
/// let batch = runner.run(&FixtureFetcher, &["PMC1".to_string()]);
///
/// assert!(batch.records[0].text_accessible);
/// assert_eq!(batch.records[0].detections[0].software_key, "Stata");
/// ```
#[derive(Debug, Clone)]
pub struct BatchRunner {
    pacing: Duration,
}

impl BatchRunner {
    /// Creates a runner with the default fetch pacing.
    pub fn new() -> Self {
        // force catalog compilation; a defect is fatal here, not per item
        let _ = crate::catalog::catalog();
        Self {
            pacing: DEFAULT_PACING,
        }
    }

    /// Sets the pause applied before each fetch.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Processes `identifiers` in order, one record per input.
    ///
    /// Never fails as a whole: per-item conditions are recorded on the
    /// item and the batch continues. The returned records preserve input
    /// order, and the log covers every stage transition.
    pub fn run<F: DocumentFetcher>(&self, fetcher: &F, identifiers: &[String]) -> BatchResult {
        let mut log = BatchLog::default();

        info!(count = identifiers.len(), "starting batch scan");
        log.push(format!(
            "Starting batch of {} identifier(s)",
            identifiers.len()
        ));

        let mut records = Vec::with_capacity(identifiers.len());
        for raw in identifiers {
            records.push(self.process_one(fetcher, raw, &mut log));
        }

        let detected = records.iter().filter(|r| r.has_detections()).count();
        info!(total = records.len(), detected, "batch scan finished");
        log.push(format!(
            "Batch complete: software detected in {} of {} article(s)",
            detected,
            records.len()
        ));

        BatchResult {
            records,
            log: log.into_entries(),
        }
    }

    /// Runs one identifier to its terminal state and returns the
    /// finalized record.
    fn process_one<F: DocumentFetcher>(
        &self,
        fetcher: &F,
        raw: &str,
        log: &mut BatchLog,
    ) -> ArticleRecord {
        let started = Instant::now();
        let mut record = ArticleRecord {
            input_identifier: raw.to_string(),
            canonical_identifier: None,
            text_accessible: false,
            detections: Vec::new(),
            error_message: String::new(),
            processing_seconds: 0.0,
        };

        log.push(format!("Processing {raw:?}"));

        let id = match PmcId::normalize(raw) {
            Ok(id) => id,
            Err(err) => {
                warn!(input = raw, %err, "invalid identifier");
                log.push(format!("{raw:?}: invalid identifier format"));
                record.error_message = INVALID_IDENTIFIER_MESSAGE.to_string();
                return finish(record, started);
            }
        };
        record.canonical_identifier = Some(id.as_str().to_string());

        std::thread::sleep(self.pacing);
        log.push(format!("{id}: fetching article"));
        let doc = match fetcher.fetch(&id) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(%id, %err, "fetch failed");
                let message = truncate_message(&err.to_string(), MAX_ERROR_LEN);
                log.push(format!("{id}: fetch failed ({message})"));
                record.error_message = message;
                return finish(record, started);
            }
        };

        let text = doc.extract_text();
        record.text_accessible = true;
        if text.is_empty() {
            debug!(%id, "no extractable text");
            log.push(format!("{id}: no extractable text content"));
            record.error_message = NO_TEXT_MESSAGE.to_string();
            return finish(record, started);
        }
        log.push(format!("{id}: extracted {} characters", text.len()));

        record.detections = detect(&text);
        debug!(%id, detections = record.detections.len(), "detection finished");
        log.push(format!(
            "{id}: detected {} software package(s)",
            record.detections.len()
        ));

        finish(record, started)
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Stamps the wall-clock duration and publishes the record.
fn finish(mut record: ArticleRecord, started: Instant) -> ArticleRecord {
    record.processing_seconds = started.elapsed().as_secs_f64();
    record
}
