//! Class-boundary distortion: intra-class spread against inter-class
//! separation.

use datasieve_core::dataset::Dataset;
use datasieve_core::stats;

/// `s / (s + d)` where `s` is the mean distance to the own-class centroid
/// and `d` the mean pairwise centroid distance. One class scores 0;
/// coincident centroids with non-zero spread score 1.
pub fn class_boundary_distortion(dataset: &Dataset) -> f64 {
    let centroids = stats::class_centroids(dataset);
    let present: Vec<&Vec<f64>> = centroids.iter().flatten().collect();
    if present.len() < 2 {
        return 0.0;
    }

    let mut spread_total = 0.0;
    let mut spread_count = 0usize;
    for (i, &label) in dataset.labels().iter().enumerate() {
        if let Some(centroid) = &centroids[label] {
            spread_total += stats::euclidean(dataset.row(i), centroid);
            spread_count += 1;
        }
    }
    let spread = spread_total / spread_count as f64;

    let mut separation_total = 0.0;
    let mut pairs = 0usize;
    for a in 0..present.len() {
        for b in a + 1..present.len() {
            separation_total += stats::euclidean(present[a], present[b]);
            pairs += 1;
        }
    }
    let separation = separation_total / pairs as f64;

    if separation == 0.0 {
        if spread == 0.0 {
            // Fully degenerate data carries no boundary signal.
            return 0.0;
        }
        return 1.0;
    }
    spread / (spread + separation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;

    #[test]
    fn single_class_scores_zero() {
        let features: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, 0.0]).collect();
        let ds = Dataset::new(features, vec![0; 20], Modality::Tabular).unwrap();
        assert_eq!(class_boundary_distortion(&ds), 0.0);
    }

    #[test]
    fn well_separated_tight_classes_score_low() {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..20 {
            features.push(vec![0.1 * (i % 3) as f64, 0.0]);
            labels.push(0);
            features.push(vec![50.0 + 0.1 * (i % 3) as f64, 50.0]);
            labels.push(1);
        }
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        assert!(class_boundary_distortion(&ds) < 0.01);
    }

    #[test]
    fn coincident_classes_score_high() {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..30 {
            features.push(vec![(i % 5) as f64, ((i * 7) % 11) as f64]);
            labels.push(i % 2);
        }
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        // Interleaved labels over one cloud: spread dwarfs separation.
        assert!(class_boundary_distortion(&ds) > 0.5);
    }

    #[test]
    fn factor_is_always_a_fraction() {
        let features: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64]).collect();
        let labels: Vec<usize> = (0..12).map(|i| i % 3).collect();
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        let f = class_boundary_distortion(&ds);
        assert!((0.0..=1.0).contains(&f));
    }
}
