//! Overfit potential from dataset shape alone.

use datasieve_core::dataset::Dataset;

const MIN_SAMPLES_PER_FEATURE: f64 = 10.0;
const MIN_SAMPLES_PER_CLASS: f64 = 50.0;
const MAX_CLASS_IMBALANCE: f64 = 5.0;

/// Additive shape heuristics: sparse samples-per-feature, sparse
/// samples-per-class, and class imbalance each contribute; capped at 1.
pub fn overfit_potential(dataset: &Dataset) -> f64 {
    let n = dataset.n_samples() as f64;
    let mut factor: f64 = 0.0;

    if n / (dataset.dim() as f64) < MIN_SAMPLES_PER_FEATURE {
        factor += 0.3;
    }
    if n / (dataset.n_classes() as f64) < MIN_SAMPLES_PER_CLASS {
        factor += 0.3;
    }

    let counts: Vec<usize> = (0..dataset.n_classes())
        .map(|c| dataset.class_members(c).len())
        .collect();
    let max = counts.iter().max().copied().unwrap_or(0);
    let min = counts.iter().min().copied().unwrap_or(0);
    // An empty class is the extreme imbalance.
    if max > 0 && (min == 0 || max as f64 / min as f64 > MAX_CLASS_IMBALANCE) {
        factor += 0.4;
    }

    factor.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;

    fn dataset(n: usize, dim: usize, labels: Vec<usize>) -> Dataset {
        let features = (0..n).map(|i| vec![i as f64; dim]).collect();
        Dataset::new(features, labels, Modality::Tabular).unwrap()
    }

    #[test]
    fn large_balanced_dataset_scores_zero() {
        let labels: Vec<usize> = (0..200).map(|i| i % 2).collect();
        assert_eq!(overfit_potential(&dataset(200, 4, labels)), 0.0);
    }

    #[test]
    fn wide_features_raise_the_factor() {
        let labels: Vec<usize> = (0..100).map(|i| i % 2).collect();
        // 100 samples over 50 features: samples-per-feature = 2.
        assert_eq!(overfit_potential(&dataset(100, 50, labels)), 0.3);
    }

    #[test]
    fn severe_imbalance_fires_all_three() {
        // 55 samples, 50 features: 1.1 per feature, class 1 has 5 samples.
        let labels: Vec<usize> = (0..55).map(|i| usize::from(i >= 50)).collect();
        assert_eq!(overfit_potential(&dataset(55, 50, labels)), 1.0);
    }
}
