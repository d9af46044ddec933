//! Aggregate reporting over a finished batch.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::BatchResult;

/// Summary statistics computed from a [`BatchResult`].
///
/// `frequency` maps each software key to the number of *records* that
/// mention it; the detector guarantees at most one detection per key per
/// record, so no per-record deduplication is needed here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of records in the batch.
    pub total_count: usize,
    /// Records whose article text was accessible.
    pub accessible_count: usize,
    /// Records with at least one software detection.
    pub software_detected_count: usize,
    /// Sum of per-record processing times.
    pub total_processing_seconds: f64,
    /// Software key → number of records containing that key.
    pub frequency: HashMap<String, usize>,
}

/// Reduces a batch into its summary statistics.
///
/// Pure and idempotent: recomputing over an unchanged batch always yields
/// identical values.
///
/// # Examples
///
/// ```
/// use softscan::{BatchResult, summarize};
///
/// let summary = summarize(&BatchResult::default());
/// assert_eq!(summary.total_count, 0);
/// assert!(summary.frequency.is_empty());
/// ```
pub fn summarize(batch: &BatchResult) -> BatchSummary {
    let records = &batch.records;
    BatchSummary {
        total_count: records.len(),
        accessible_count: records.iter().filter(|r| r.text_accessible).count(),
        software_detected_count: records.iter().filter(|r| r.has_detections()).count(),
        total_processing_seconds: records.iter().map(|r| r.processing_seconds).sum(),
        frequency: records
            .iter()
            .flat_map(|r| r.detections.iter().map(|d| d.software_key.clone()))
            .counts(),
    }
}
