//! Relabel suggestions for review-mode cleansing.

use datasieve_core::constants::MAX_RELABEL_SUGGESTIONS;
use datasieve_core::dataset::Dataset;
use datasieve_core::models::RelabelSuggestion;
use datasieve_core::stats;

/// Suggest the nearest class centroid excluding the current label, ties
/// broken by the lowest class index. Suggestion confidence is
/// `1 − d_nearest / Σd` over the candidate centroids. Capped at
/// [`MAX_RELABEL_SUGGESTIONS`]; `indices` must already be sorted.
pub fn suggestions(dataset: &Dataset, indices: &[usize]) -> Vec<RelabelSuggestion> {
    let centroids = stats::class_centroids(dataset);

    indices
        .iter()
        .filter_map(|&index| {
            let current_label = dataset.label(index);
            let row = dataset.row(index);

            let distances: Vec<(usize, f64)> = centroids
                .iter()
                .enumerate()
                .filter(|(class, c)| *class != current_label && c.is_some())
                .map(|(class, c)| {
                    (class, stats::euclidean(row, c.as_deref().unwrap_or(&[])))
                })
                .collect();
            // Strict < keeps the lowest class index on ties.
            let (suggested_label, d_nearest) = distances
                .iter()
                .copied()
                .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))?;

            let total: f64 = distances.iter().map(|(_, d)| d).sum();
            let confidence = if total > 0.0 {
                (1.0 - d_nearest / total).clamp(0.0, 1.0)
            } else {
                0.0
            };

            Some(RelabelSuggestion {
                index,
                current_label,
                suggested_label,
                confidence,
            })
        })
        .take(MAX_RELABEL_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;

    fn three_class_dataset() -> Dataset {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for (class, offset) in [(0usize, 0.0), (1, 10.0), (2, 20.0)] {
            for i in 0..5 {
                features.push(vec![offset + 0.1 * i as f64, offset]);
                labels.push(class);
            }
        }
        Dataset::new(features, labels, Modality::Tabular).unwrap()
    }

    #[test]
    fn suggests_the_nearest_other_class() {
        let ds = three_class_dataset();
        // Sample 0 sits at class 0's centroid; class 1 is the nearest
        // alternative.
        let s = suggestions(&ds, &[0]);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].current_label, 0);
        assert_eq!(s[0].suggested_label, 1);
        assert!(s[0].confidence > 0.5);
    }

    #[test]
    fn single_class_yields_no_suggestions() {
        let features: Vec<Vec<f64>> = (0..6).map(|i| vec![i as f64]).collect();
        let ds = Dataset::new(features, vec![0; 6], Modality::Tabular).unwrap();
        assert!(suggestions(&ds, &[0, 3]).is_empty());
    }

    #[test]
    fn output_is_capped() {
        let features: Vec<Vec<f64>> = (0..200).map(|i| vec![(i % 10) as f64]).collect();
        let labels: Vec<usize> = (0..200).map(|i| i % 2).collect();
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        let indices: Vec<usize> = (0..200).collect();
        assert_eq!(suggestions(&ds, &indices).len(), MAX_RELABEL_SUGGESTIONS);
    }
}
