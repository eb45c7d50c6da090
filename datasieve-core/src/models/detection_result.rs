use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// The four detection methods the orchestrator can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    Spectral,
    Clustering,
    Influence,
    Trigger,
}

impl DetectionMethod {
    pub const ALL: [DetectionMethod; 4] = [
        DetectionMethod::Spectral,
        DetectionMethod::Clustering,
        DetectionMethod::Influence,
        DetectionMethod::Trigger,
    ];
}

/// Per-class sample/flag counts attached to every detection result.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClassDetail {
    pub samples: usize,
    pub flagged: usize,
}

/// A within-class cluster that sits closer to a different class's
/// activation distribution than to its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MisalignedCluster {
    pub class: usize,
    pub cluster: usize,
    pub size: usize,
    pub nearest_class: usize,
    /// `1 - d_other / d_own`, in (0, 1]; larger means more misaligned.
    pub margin: f64,
    pub sample_indices: Vec<usize>,
}

/// One entry in the influence estimator's harmful ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmfulSample {
    pub index: usize,
    pub influence_score: f64,
    pub label: usize,
}

/// The kind of trigger pattern a modality scan matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Near-identical bright patch in an image corner region.
    CornerPatch,
    /// A token recurring at one trailing position.
    PositionalToken,
    /// A repeated trailing token subsequence.
    TokenSequence,
    /// Samples extreme in several tabular columns at once.
    ExtremeValues,
}

/// A matched trigger pattern and the samples carrying it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerPattern {
    pub kind: TriggerKind,
    pub sample_indices: Vec<usize>,
    /// Flat feature indices the pattern occupies, each in [0, dim).
    /// Downstream scrubbing overwrites exactly these cells.
    pub feature_positions: Vec<usize>,
    pub description: String,
    /// Fraction of carriers sharing the dominant label, in [0, 1].
    pub label_concentration: f64,
    pub dominant_label: Option<usize>,
}

/// Method-specific auxiliary findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodFindings {
    None,
    Spectral {
        /// Top singular values per analyzed class.
        class_singular_values: BTreeMap<usize, Vec<f64>>,
    },
    Clustering {
        misaligned_clusters: Vec<MisalignedCluster>,
    },
    Influence {
        top_harmful: Vec<HarmfulSample>,
    },
    Trigger {
        detected_triggers: Vec<TriggerPattern>,
    },
}

/// Output of a single detector over one dataset. Created fresh per call,
/// immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub method: DetectionMethod,
    /// Severity in [0, 100].
    pub poisoning_score: f64,
    /// Suspected sample indices, each in [0, N).
    pub suspected_indices: BTreeSet<usize>,
    /// Per-sample suspicion confidence in [0, 1].
    pub confidence_scores: BTreeMap<usize, f64>,
    /// Sample/flag counts per class.
    pub class_details: BTreeMap<usize, ClassDetail>,
    pub findings: MethodFindings,
}

impl DetectionResult {
    /// The zero-score placeholder contributed by a failed or skipped
    /// detector.
    pub fn empty(method: DetectionMethod) -> Self {
        Self {
            method,
            poisoning_score: 0.0,
            suspected_indices: BTreeSet::new(),
            confidence_scores: BTreeMap::new(),
            class_details: BTreeMap::new(),
            findings: MethodFindings::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_has_zero_score() {
        let r = DetectionResult::empty(DetectionMethod::Spectral);
        assert_eq!(r.poisoning_score, 0.0);
        assert!(r.suspected_indices.is_empty());
        assert!(matches!(r.findings, MethodFindings::None));
    }

    #[test]
    fn result_round_trips_through_json() {
        let mut r = DetectionResult::empty(DetectionMethod::Trigger);
        r.poisoning_score = 42.5;
        r.suspected_indices.insert(7);
        r.confidence_scores.insert(7, 0.9);
        let json = serde_json::to_string(&r).unwrap();
        let back: DetectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.method, DetectionMethod::Trigger);
        assert_eq!(back.suspected_indices.len(), 1);
        assert_eq!(back.confidence_scores[&7], 0.9);
    }
}
