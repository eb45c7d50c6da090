//! Backdoor-trigger detector.
//!
//! Dispatches one scan per modality: image corner patches, recurring
//! token triggers, or extreme tabular cells. Each match becomes a
//! `TriggerPattern`; result shaping is shared, the scans are not.

pub mod image;
pub mod tabular;
pub mod text;

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use datasieve_core::config::TriggerConfig;
use datasieve_core::dataset::{Dataset, Modality};
use datasieve_core::errors::SieveResult;
use datasieve_core::models::{ClassDetail, DetectionMethod, DetectionResult, MethodFindings};
use datasieve_core::traits::Detector;

pub struct TriggerDetector {
    config: TriggerConfig,
}

impl TriggerDetector {
    pub fn new(config: TriggerConfig) -> Self {
        Self { config }
    }

    /// Scan the dataset for modality-specific trigger patterns.
    pub fn scan(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.config.validate()?;
        info!(
            samples = dataset.n_samples(),
            modality = ?dataset.modality(),
            "starting trigger scan"
        );

        let detected_triggers = match dataset.modality() {
            Modality::Image {
                height,
                width,
                channels,
            } => image::scan(dataset, &self.config, height, width, channels),
            Modality::Text { .. } => text::scan(dataset, &self.config),
            Modality::Tabular => tabular::scan(dataset, &self.config),
        };

        let mut suspected = BTreeSet::new();
        let mut confidences: BTreeMap<usize, f64> = BTreeMap::new();
        for trigger in &detected_triggers {
            for &index in &trigger.sample_indices {
                suspected.insert(index);
                let entry = confidences.entry(index).or_insert(0.0f64);
                *entry = entry.max(trigger.label_concentration.clamp(0.0, 1.0));
            }
        }

        let mut class_details = BTreeMap::new();
        for class in 0..dataset.n_classes() {
            let members = dataset.class_members(class);
            if members.is_empty() {
                continue;
            }
            let flagged = members.iter().filter(|i| suspected.contains(i)).count();
            class_details.insert(
                class,
                ClassDetail {
                    samples: members.len(),
                    flagged,
                },
            );
        }

        let poisoning_score = detected_triggers
            .iter()
            .map(|t| 20.0 * t.label_concentration)
            .sum::<f64>()
            .min(100.0);

        Ok(DetectionResult {
            method: DetectionMethod::Trigger,
            poisoning_score,
            suspected_indices: suspected,
            confidence_scores: confidences,
            class_details,
            findings: MethodFindings::Trigger { detected_triggers },
        })
    }
}

impl Default for TriggerDetector {
    fn default() -> Self {
        Self::new(TriggerConfig::default())
    }
}

impl Detector for TriggerDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Trigger
    }

    fn detect(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.scan(dataset)
    }
}

/// (dominant-label fraction, dominant label, distinct label count) of a
/// carrier group. Empty groups report zero concentration.
fn label_concentration(dataset: &Dataset, carriers: &[usize]) -> (f64, Option<usize>, usize) {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &i in carriers {
        *counts.entry(dataset.label(i)).or_insert(0) += 1;
    }
    let n_labels = counts.len();
    match counts.into_iter().max_by_key(|&(label, count)| (count, std::cmp::Reverse(label))) {
        Some((label, count)) => (
            count as f64 / carriers.len() as f64,
            Some(label),
            n_labels,
        ),
        None => (0.0, None, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabular(features: Vec<Vec<f64>>, labels: Vec<usize>) -> Dataset {
        Dataset::new(features, labels, Modality::Tabular).unwrap()
    }

    #[test]
    fn clean_tabular_data_scores_zero() {
        let features: Vec<Vec<f64>> = (0..40)
            .map(|i| vec![0.1 * (i % 9) as f64, 0.2 * (i % 5) as f64])
            .collect();
        let labels: Vec<usize> = (0..40).map(|i| i % 2).collect();
        let result = TriggerDetector::default().scan(&tabular(features, labels)).unwrap();
        assert_eq!(result.poisoning_score, 0.0);
        assert!(result.suspected_indices.is_empty());
        assert!(matches!(
            result.findings,
            MethodFindings::Trigger { ref detected_triggers } if detected_triggers.is_empty()
        ));
    }

    #[test]
    fn score_accumulates_per_trigger() {
        // Planted tabular trigger with perfect concentration scores 20.
        let mut features: Vec<Vec<f64>> = (0..60)
            .map(|i| vec![0.1 * (i % 9) as f64; 6])
            .collect();
        let mut labels: Vec<usize> = (0..60).map(|i| i % 3).collect();
        for i in 0..6 {
            features[i][4] = 30.0;
            features[i][5] = 30.0;
            labels[i] = 2;
        }
        let result = TriggerDetector::default().scan(&tabular(features, labels)).unwrap();
        assert_eq!(result.poisoning_score, 20.0);
        assert_eq!(result.suspected_indices.len(), 6);
        assert!(result.confidence_scores.values().all(|&c| c == 1.0));
    }

    #[test]
    fn label_concentration_prefers_lowest_label_on_tie() {
        let features = vec![vec![0.0]; 4];
        let ds = tabular(features, vec![0, 0, 1, 1]);
        let (concentration, dominant, n_labels) = label_concentration(&ds, &[0, 1, 2, 3]);
        assert_eq!(concentration, 0.5);
        assert_eq!(dominant, Some(0));
        assert_eq!(n_labels, 2);
    }
}
