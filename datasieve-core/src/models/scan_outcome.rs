use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::detection_result::{DetectionMethod, DetectionResult};

/// A non-fatal detector failure, reported inside the aggregate result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorDiagnostic {
    pub method: DetectionMethod,
    pub reason: String,
}

/// Accuracy of the merged suspected set against known ground truth.
///
/// Every metric is 0.0 when its denominator is 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionAccuracy {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub false_positive_rate: f64,
}

impl DetectionAccuracy {
    /// Compute precision/recall/F1/FPR for a suspected set against the
    /// ground-truth poison set over `n_samples` total samples.
    pub fn compute(
        suspected: &BTreeSet<usize>,
        truth: &BTreeSet<usize>,
        n_samples: usize,
    ) -> Self {
        let true_positives = suspected.intersection(truth).count();
        let false_positives = suspected.len() - true_positives;
        let clean = n_samples.saturating_sub(truth.len());

        let precision = if suspected.is_empty() {
            0.0
        } else {
            true_positives as f64 / suspected.len() as f64
        };
        let recall = if truth.is_empty() {
            0.0
        } else {
            true_positives as f64 / truth.len() as f64
        };
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        let false_positive_rate = if clean == 0 {
            0.0
        } else {
            false_positives as f64 / clean as f64
        };

        Self {
            precision,
            recall,
            f1,
            false_positive_rate,
        }
    }
}

/// Aggregate output of an orchestrator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Unified severity in [0, 100], weight-normalized over the methods
    /// actually attempted.
    pub poisoning_score: f64,
    /// Union of every attempted detector's suspected set.
    pub suspected_indices: BTreeSet<usize>,
    /// Per-sample confidence, the maximum across methods.
    pub confidence_scores: BTreeMap<usize, f64>,
    /// Per-method results, including empty placeholders for failures.
    pub results: Vec<DetectionResult>,
    /// Non-fatal failures; empty when every method succeeded.
    pub diagnostics: Vec<DetectorDiagnostic>,
    /// Methods that were attempted. Empty means "no methods run".
    pub methods_run: Vec<DetectionMethod>,
    /// Present only when ground truth was supplied.
    pub accuracy: Option<DetectionAccuracy>,
}

impl ScanOutcome {
    /// The outcome of a run with no enabled methods.
    pub fn no_methods() -> Self {
        Self {
            poisoning_score: 0.0,
            suspected_indices: BTreeSet::new(),
            confidence_scores: BTreeMap::new(),
            results: Vec::new(),
            diagnostics: Vec::new(),
            methods_run: Vec::new(),
            accuracy: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn accuracy_on_perfect_detection() {
        let acc = DetectionAccuracy::compute(&set(&[1, 2, 3]), &set(&[1, 2, 3]), 10);
        assert_eq!(acc.precision, 1.0);
        assert_eq!(acc.recall, 1.0);
        assert_eq!(acc.f1, 1.0);
        assert_eq!(acc.false_positive_rate, 0.0);
    }

    #[test]
    fn accuracy_zero_when_denominators_empty() {
        let acc = DetectionAccuracy::compute(&set(&[]), &set(&[]), 10);
        assert_eq!(acc.precision, 0.0);
        assert_eq!(acc.recall, 0.0);
        assert_eq!(acc.f1, 0.0);
        assert_eq!(acc.false_positive_rate, 0.0);
    }

    #[test]
    fn accuracy_counts_false_positives() {
        // 2 true positives, 2 false positives, truth of 4, 10 samples.
        let acc = DetectionAccuracy::compute(&set(&[1, 2, 5, 6]), &set(&[1, 2, 3, 4]), 10);
        assert_eq!(acc.precision, 0.5);
        assert_eq!(acc.recall, 0.5);
        assert!((acc.f1 - 0.5).abs() < 1e-12);
        // 6 clean samples, 2 wrongly flagged.
        assert!((acc.false_positive_rate - 2.0 / 6.0).abs() < 1e-12);
    }
}
