//! Detection orchestrator.
//!
//! Fans the enabled detectors out with rayon over one immutable dataset,
//! turns individual failures into diagnostics instead of aborting the
//! run, and merges the survivors into a single `ScanOutcome`.

use rayon::prelude::*;
use tracing::{info, warn};

use datasieve_core::config::DetectionConfig;
use datasieve_core::dataset::Dataset;
use datasieve_core::errors::SieveResult;
use datasieve_core::models::{
    DetectionAccuracy, DetectionMethod, DetectionResult, DetectorDiagnostic, PoisonMetadata,
    ScanOutcome,
};
use datasieve_core::traits::Detector;

use crate::clustering::ClusteringDetector;
use crate::influence::InfluenceEstimator;
use crate::spectral::SpectralDetector;
use crate::trigger::TriggerDetector;

pub struct DetectionEngine {
    config: DetectionConfig,
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Run every enabled method and merge the results into one verdict.
    ///
    /// A failing detector contributes an empty zero-score result plus a
    /// diagnostic; its weight still enters the normalization because the
    /// method was attempted. Zero enabled methods is a valid, empty run.
    pub fn run(
        &self,
        dataset: &Dataset,
        enabled: &[DetectionMethod],
        truth: Option<&PoisonMetadata>,
    ) -> SieveResult<ScanOutcome> {
        self.config.validate()?;
        if enabled.is_empty() {
            info!("no detection methods enabled");
            return Ok(ScanOutcome::no_methods());
        }

        info!(
            samples = dataset.n_samples(),
            methods = enabled.len(),
            "starting detection scan"
        );

        let per_method: Vec<(DetectionResult, Option<DetectorDiagnostic>)> = enabled
            .par_iter()
            .map(|&method| match self.detect_with(method, dataset) {
                Ok(result) => (result, None),
                Err(error) => {
                    warn!(?method, %error, "detector failed");
                    (
                        DetectionResult::empty(method),
                        Some(DetectorDiagnostic {
                            method,
                            reason: error.to_string(),
                        }),
                    )
                }
            })
            .collect();

        let mut outcome = ScanOutcome::no_methods();
        outcome.methods_run = enabled.to_vec();

        let mut weight_total = 0.0;
        let mut weighted_score = 0.0;
        for (result, diagnostic) in per_method {
            let weight = self.config.weights.weight_for(result.method);
            weight_total += weight;
            weighted_score += weight * result.poisoning_score;

            outcome
                .suspected_indices
                .extend(result.suspected_indices.iter().copied());
            for (&index, &confidence) in &result.confidence_scores {
                let entry = outcome.confidence_scores.entry(index).or_insert(0.0f64);
                *entry = entry.max(confidence);
            }
            outcome.results.push(result);
            outcome.diagnostics.extend(diagnostic);
        }

        outcome.poisoning_score = if weight_total > 0.0 {
            weighted_score / weight_total
        } else {
            0.0
        };
        outcome.accuracy = truth.map(|t| {
            DetectionAccuracy::compute(&outcome.suspected_indices, &t.indices, dataset.n_samples())
        });

        info!(
            score = outcome.poisoning_score,
            suspected = outcome.suspected_indices.len(),
            failures = outcome.diagnostics.len(),
            "detection scan complete"
        );
        Ok(outcome)
    }

    fn detect_with(&self, method: DetectionMethod, dataset: &Dataset) -> SieveResult<DetectionResult> {
        match method {
            DetectionMethod::Spectral => {
                SpectralDetector::new(self.config.spectral.clone()).detect(dataset)
            }
            DetectionMethod::Clustering => {
                ClusteringDetector::new(self.config.clustering.clone()).detect(dataset)
            }
            DetectionMethod::Influence => {
                InfluenceEstimator::new(self.config.influence.clone()).detect(dataset)
            }
            DetectionMethod::Trigger => {
                TriggerDetector::new(self.config.trigger.clone()).detect(dataset)
            }
        }
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new(DetectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;
    use std::collections::BTreeSet;

    fn small_dataset() -> Dataset {
        let features: Vec<Vec<f64>> = (0..40)
            .map(|i| {
                let base = if i % 2 == 0 { 0.0 } else { 5.0 };
                vec![
                    base + 0.1 * ((i % 7) as f64 - 3.0),
                    base + 0.1 * ((i % 5) as f64 - 2.0),
                    base,
                ]
            })
            .collect();
        let labels: Vec<usize> = (0..40).map(|i| i % 2).collect();
        Dataset::new(features, labels, Modality::Tabular).unwrap()
    }

    #[test]
    fn no_methods_is_an_empty_outcome() {
        let outcome = DetectionEngine::default()
            .run(&small_dataset(), &[], None)
            .unwrap();
        assert_eq!(outcome.poisoning_score, 0.0);
        assert!(outcome.suspected_indices.is_empty());
        assert!(outcome.methods_run.is_empty());
        assert!(outcome.accuracy.is_none());
    }

    #[test]
    fn all_methods_report_results() {
        let outcome = DetectionEngine::default()
            .run(&small_dataset(), &DetectionMethod::ALL, None)
            .unwrap();
        assert_eq!(outcome.results.len(), 4);
        assert_eq!(outcome.methods_run, DetectionMethod::ALL.to_vec());
        assert!(outcome.diagnostics.is_empty());
        assert!(outcome.poisoning_score >= 0.0 && outcome.poisoning_score <= 100.0);
    }

    #[test]
    fn score_is_weight_normalized_over_attempted_methods() {
        let ds = small_dataset();
        let engine = DetectionEngine::default();
        let single = engine
            .run(&ds, &[DetectionMethod::Spectral], None)
            .unwrap();
        let spectral_only_score = single.results[0].poisoning_score;
        // Equal weights, one method: aggregate equals that method's score.
        assert!((single.poisoning_score - spectral_only_score).abs() < 1e-12);
    }

    #[test]
    fn truth_produces_accuracy_metrics() {
        let truth = PoisonMetadata::new(BTreeSet::from([0, 1, 2]), None);
        let outcome = DetectionEngine::default()
            .run(&small_dataset(), &DetectionMethod::ALL, Some(&truth))
            .unwrap();
        let accuracy = outcome.accuracy.unwrap();
        assert!(accuracy.precision >= 0.0 && accuracy.precision <= 1.0);
        assert!(accuracy.recall >= 0.0 && accuracy.recall <= 1.0);
    }

    #[test]
    fn parallel_run_matches_sequential_merge() {
        let ds = small_dataset();
        let engine = DetectionEngine::default();
        let a = engine.run(&ds, &DetectionMethod::ALL, None).unwrap();
        let b = engine.run(&ds, &DetectionMethod::ALL, None).unwrap();
        assert_eq!(a.poisoning_score, b.poisoning_score);
        assert_eq!(a.suspected_indices, b.suspected_indices);
    }
}
