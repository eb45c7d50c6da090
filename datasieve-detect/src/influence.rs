//! Influence estimator.
//!
//! A cheap proxy for per-sample training influence: within each class,
//! combine the z-score of the Euclidean distance to the class centroid
//! with the z-score of the L1 deviation sum (a stand-in for gradient
//! magnitude). Samples that dominate both are the ones most able to pull
//! the decision boundary.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use datasieve_core::config::InfluenceConfig;
use datasieve_core::constants::TOP_HARMFUL_LIMIT;
use datasieve_core::dataset::Dataset;
use datasieve_core::errors::SieveResult;
use datasieve_core::models::{
    ClassDetail, DetectionMethod, DetectionResult, HarmfulSample, MethodFindings,
};
use datasieve_core::stats;
use datasieve_core::traits::Detector;

const DISTANCE_WEIGHT: f64 = 0.6;
const GRADIENT_WEIGHT: f64 = 0.4;

pub struct InfluenceEstimator {
    config: InfluenceConfig,
}

impl InfluenceEstimator {
    pub fn new(config: InfluenceConfig) -> Self {
        Self { config }
    }

    /// Rank every sample by proxy influence; within the top fraction,
    /// flag only the samples whose influence clears the baseline.
    pub fn estimate(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.config.validate()?;
        info!(
            samples = dataset.n_samples(),
            top_fraction = self.config.top_fraction,
            "starting influence estimation"
        );

        let influence = per_sample_influence(dataset);

        // Global top-K, ties broken by lower index.
        let k = (self.config.top_fraction * dataset.n_samples() as f64).ceil() as usize;
        let k = k.min(dataset.n_samples());
        let mut ranked: Vec<usize> = (0..dataset.n_samples()).collect();
        ranked.sort_by(|&a, &b| influence[b].total_cmp(&influence[a]).then(a.cmp(&b)));
        let top: Vec<usize> = ranked.into_iter().take(k).collect();

        // Ranking alone is not evidence; on clean data the top fraction is
        // just the distribution's tail. Only above-baseline influence flags.
        let flagged: Vec<usize> = top
            .iter()
            .copied()
            .filter(|&index| influence[index] > self.config.baseline)
            .collect();

        let mut suspected = BTreeSet::new();
        let mut confidences = BTreeMap::new();
        let mut flagged_per_class: BTreeMap<usize, usize> = BTreeMap::new();
        for &index in &flagged {
            suspected.insert(index);
            confidences.insert(
                index,
                (influence[index] / (2.0 * self.config.baseline)).clamp(0.0, 1.0),
            );
            *flagged_per_class.entry(dataset.label(index)).or_insert(0) += 1;
        }

        let mut class_details = BTreeMap::new();
        for class in 0..dataset.n_classes() {
            let samples = dataset.class_members(class).len();
            if samples == 0 {
                continue;
            }
            class_details.insert(
                class,
                ClassDetail {
                    samples,
                    flagged: flagged_per_class.get(&class).copied().unwrap_or(0),
                },
            );
        }

        let top_harmful: Vec<HarmfulSample> = top
            .iter()
            .take(TOP_HARMFUL_LIMIT)
            .map(|&index| HarmfulSample {
                index,
                influence_score: influence[index],
                label: dataset.label(index),
            })
            .collect();

        let mean_flagged = if flagged.is_empty() {
            0.0
        } else {
            flagged.iter().map(|&i| influence[i]).sum::<f64>() / flagged.len() as f64
        };
        let poisoning_score =
            (40.0 * (mean_flagged - self.config.baseline).max(0.0)).min(100.0);
        debug!(flagged = flagged.len(), mean_flagged, "influence ranking done");

        Ok(DetectionResult {
            method: DetectionMethod::Influence,
            poisoning_score,
            suspected_indices: suspected,
            confidence_scores: confidences,
            class_details,
            findings: MethodFindings::Influence { top_harmful },
        })
    }
}

impl Default for InfluenceEstimator {
    fn default() -> Self {
        Self::new(InfluenceConfig::default())
    }
}

impl Detector for InfluenceEstimator {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Influence
    }

    fn detect(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.estimate(dataset)
    }
}

/// Per-sample combined influence; zero for members of zero-variance
/// classes.
fn per_sample_influence(dataset: &Dataset) -> Vec<f64> {
    let mut influence = vec![0.0; dataset.n_samples()];

    for class in 0..dataset.n_classes() {
        let members = dataset.class_members(class);
        if members.is_empty() {
            continue;
        }
        let centroid = match stats::centroid_of(members.iter().map(|&i| dataset.row(i))) {
            Some(c) => c,
            None => continue,
        };

        let distances: Vec<f64> = members
            .iter()
            .map(|&i| stats::euclidean(dataset.row(i), &centroid))
            .collect();
        let l1_deviations: Vec<f64> = members
            .iter()
            .map(|&i| {
                dataset
                    .row(i)
                    .iter()
                    .zip(centroid.iter())
                    .map(|(v, c)| (v - c).abs())
                    .sum()
            })
            .collect();

        let z_dist = stats::z_scores(&distances);
        let z_grad = stats::z_scores(&l1_deviations);
        for ((&index, zd), zg) in members.iter().zip(z_dist).zip(z_grad) {
            influence[index] = DISTANCE_WEIGHT * zd + GRADIENT_WEIGHT * zg;
        }
    }

    influence
}
