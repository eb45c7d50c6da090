//! Spectral-signature detector.
//!
//! Poisoned subpopulations tend to form a separable subspace in a class's
//! feature distribution, showing up as outliers along the class's top
//! singular vector. Per class: center, SVD, project onto the strongest
//! singular vector, z-score the projection magnitudes, flag the tails.

use std::collections::{BTreeMap, BTreeSet};

use nalgebra::DMatrix;
use tracing::{debug, info};

use datasieve_core::config::SpectralConfig;
use datasieve_core::dataset::Dataset;
use datasieve_core::errors::{SieveError, SieveResult};
use datasieve_core::models::{ClassDetail, DetectionMethod, DetectionResult, MethodFindings};
use datasieve_core::stats;
use datasieve_core::traits::Detector;

pub struct SpectralDetector {
    config: SpectralConfig,
}

impl SpectralDetector {
    pub fn new(config: SpectralConfig) -> Self {
        Self { config }
    }

    /// Run spectral analysis over every class of the dataset.
    pub fn analyze(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.config.validate()?;
        info!(
            samples = dataset.n_samples(),
            classes = dataset.n_classes(),
            "starting spectral analysis"
        );

        let threshold = self.config.detection_threshold;
        let mut suspected = BTreeSet::new();
        let mut confidences = BTreeMap::new();
        let mut class_details = BTreeMap::new();
        let mut class_singular_values = BTreeMap::new();
        let mut flagged_z: Vec<f64> = Vec::new();

        for class in 0..dataset.n_classes() {
            let members = dataset.class_members(class);
            if members.is_empty() {
                continue;
            }

            let centered = center_rows(dataset, &members);
            let scores: Vec<f64> = if members.len() < self.config.n_components + 2 {
                // Too few members for a meaningful subspace; fall back to
                // raw magnitude outlier scoring.
                centered
                    .iter()
                    .map(|row| row.iter().map(|v| v * v).sum::<f64>().sqrt())
                    .collect()
            } else {
                let (projections, singular_values) =
                    top_component_projections(&centered, self.config.n_components, class)?;
                class_singular_values.insert(class, singular_values);
                projections.into_iter().map(f64::abs).collect()
            };

            // Zero-variance classes produce all-zero z-scores and no flags.
            let z = stats::z_scores(&scores);
            let mut flagged = 0usize;
            for (&index, &zi) in members.iter().zip(z.iter()) {
                if zi.abs() > threshold {
                    suspected.insert(index);
                    confidences.insert(index, (zi.abs() / (2.0 * threshold)).min(1.0));
                    flagged_z.push(zi.abs());
                    flagged += 1;
                }
            }

            debug!(class, samples = members.len(), flagged, "spectral class scan");
            class_details.insert(
                class,
                ClassDetail {
                    samples: members.len(),
                    flagged,
                },
            );
        }

        let ratio = suspected.len() as f64 / dataset.n_samples() as f64;
        let mean_excess = (stats::mean(&flagged_z) - threshold).max(0.0);
        let poisoning_score = (450.0 * ratio + 10.0 * mean_excess).min(100.0);

        Ok(DetectionResult {
            method: DetectionMethod::Spectral,
            poisoning_score,
            suspected_indices: suspected,
            confidence_scores: confidences,
            class_details,
            findings: MethodFindings::Spectral {
                class_singular_values,
            },
        })
    }
}

impl Default for SpectralDetector {
    fn default() -> Self {
        Self::new(SpectralConfig::default())
    }
}

impl Detector for SpectralDetector {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Spectral
    }

    fn detect(&self, dataset: &Dataset) -> SieveResult<DetectionResult> {
        self.analyze(dataset)
    }
}

/// Subtract the class mean from every member row.
fn center_rows(dataset: &Dataset, members: &[usize]) -> Vec<Vec<f64>> {
    let centroid = stats::centroid_of(members.iter().map(|&i| dataset.row(i)))
        .unwrap_or_else(|| vec![0.0; dataset.dim()]);
    members
        .iter()
        .map(|&i| {
            dataset
                .row(i)
                .iter()
                .zip(centroid.iter())
                .map(|(v, c)| v - c)
                .collect()
        })
        .collect()
}

/// Project each centered row onto the singular vector with the largest
/// singular value; also return the leading singular values (descending).
fn top_component_projections(
    centered: &[Vec<f64>],
    n_components: usize,
    class: usize,
) -> SieveResult<(Vec<f64>, Vec<f64>)> {
    if centered.iter().flatten().any(|v| !v.is_finite()) {
        return Err(SieveError::detector_failed(
            DetectionMethod::Spectral,
            format!("non-finite feature values in class {class}"),
        ));
    }

    let rows = centered.len();
    let cols = centered[0].len();
    let matrix = DMatrix::from_fn(rows, cols, |i, j| centered[i][j]);

    let svd = matrix.svd(false, true);
    let v_t = svd.v_t.ok_or_else(|| {
        SieveError::detector_failed(DetectionMethod::Spectral, "SVD produced no singular vectors")
    })?;

    if svd.singular_values.iter().any(|s| !s.is_finite()) {
        return Err(SieveError::detector_failed(
            DetectionMethod::Spectral,
            format!("non-finite singular values in class {class}"),
        ));
    }

    // nalgebra does not guarantee ordering; pick the strongest component.
    let top = svd
        .singular_values
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);
    let component = v_t.row(top);

    let projections = centered
        .iter()
        .map(|row| {
            row.iter()
                .zip(component.iter())
                .map(|(v, c)| v * c)
                .sum::<f64>()
        })
        .collect();

    let mut singular_values: Vec<f64> = svd.singular_values.iter().copied().collect();
    singular_values.sort_by(|a, b| b.total_cmp(a));
    singular_values.truncate(n_components);

    Ok((projections, singular_values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;

    fn gaussian_like(n: usize, dim: usize, offset: f64) -> Vec<Vec<f64>> {
        // Deterministic spread without a RNG: interleaved small deviations.
        (0..n)
            .map(|i| {
                (0..dim)
                    .map(|j| offset + 0.1 * (((i * dim + j) % 7) as f64 - 3.0))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn zero_variance_class_yields_no_flags() {
        let features = vec![vec![1.0, 1.0]; 20];
        let ds = Dataset::new(features, vec![0; 20], Modality::Tabular).unwrap();
        let result = SpectralDetector::default().analyze(&ds).unwrap();
        assert!(result.suspected_indices.is_empty());
        assert_eq!(result.poisoning_score, 0.0);
    }

    #[test]
    fn gross_outliers_are_flagged() {
        let mut features = gaussian_like(40, 6, 0.0);
        // Inject four far-off samples.
        for i in 0..4 {
            features[i] = vec![25.0; 6];
        }
        let ds = Dataset::new(features, vec![0; 40], Modality::Tabular).unwrap();
        let result = SpectralDetector::default().analyze(&ds).unwrap();
        for i in 0..4 {
            assert!(result.suspected_indices.contains(&i), "missing outlier {i}");
        }
        assert!(result.poisoning_score > 0.0);
        assert!(result.poisoning_score <= 100.0);
    }

    #[test]
    fn tiny_class_uses_magnitude_fallback() {
        // 5 samples < n_components + 2, one extreme.
        let mut features = gaussian_like(5, 3, 0.0);
        features[2] = vec![50.0, 50.0, 50.0];
        let ds = Dataset::new(features, vec![0; 5], Modality::Tabular).unwrap();
        let result = SpectralDetector::default().analyze(&ds).unwrap();
        // Fallback path stores no singular values.
        if let MethodFindings::Spectral {
            class_singular_values,
        } = &result.findings
        {
            assert!(class_singular_values.is_empty());
        } else {
            panic!("wrong findings variant");
        }
    }

    #[test]
    fn analysis_is_deterministic() {
        let mut features = gaussian_like(30, 4, 1.0);
        features[5] = vec![12.0; 4];
        let ds = Dataset::new(features, vec![0; 30], Modality::Tabular).unwrap();
        let detector = SpectralDetector::default();
        let a = detector.analyze(&ds).unwrap();
        let b = detector.analyze(&ds).unwrap();
        assert_eq!(a.suspected_indices, b.suspected_indices);
        assert_eq!(a.poisoning_score, b.poisoning_score);
    }
}
