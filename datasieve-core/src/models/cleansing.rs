use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Cleansing policy. Selects a pure removal/relabel policy per call; there
/// are no transitions between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleansingMode {
    /// Remove every suspected sample unconditionally.
    Strict,
    /// Remove only suspected samples at or above the confidence threshold.
    Safe,
    /// Remove nothing; emit relabel suggestions for manual review.
    Review,
}

/// A proposed label correction for a suspected-but-kept sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelabelSuggestion {
    pub index: usize,
    pub current_label: usize,
    pub suggested_label: usize,
    pub confidence: f64,
}

/// Counts and ratios for one cleansing call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleansingSummary {
    pub original_samples: usize,
    pub removed_samples: usize,
    pub remaining_samples: usize,
    pub removal_ratio: f64,
    pub mode: CleansingMode,
}

/// Output of one cleansing call. Remaining samples preserve the original
/// relative order minus the removed indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleansingResult {
    pub remaining_features: Vec<Vec<f64>>,
    pub remaining_labels: Vec<usize>,
    pub removed_indices: BTreeSet<usize>,
    pub kept_indices: Vec<usize>,
    pub relabel_suggestions: Vec<RelabelSuggestion>,
    pub summary: CleansingSummary,
}

/// Output of scrubbing trigger patterns out of carrier samples in place.
/// Labels and sample count are unchanged; only the overwritten cells
/// differ from the input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerScrubResult {
    pub features: Vec<Vec<f64>>,
    /// Samples that had at least one cell overwritten.
    pub scrubbed_samples: BTreeSet<usize>,
    /// Total number of overwritten cells across all samples.
    pub scrubbed_cells: usize,
}
