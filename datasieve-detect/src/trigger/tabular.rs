//! Extreme-value scan for tabular data.
//!
//! A tabular backdoor plants implausible values in a few columns. Cells
//! with a per-column |z| above the threshold are "extreme"; samples
//! extreme in several columns at once form the candidate group.

use std::collections::BTreeSet;

use datasieve_core::config::TriggerConfig;
use datasieve_core::dataset::Dataset;
use datasieve_core::models::{TriggerKind, TriggerPattern};
use datasieve_core::stats;

use super::label_concentration;

pub fn scan(dataset: &Dataset, config: &TriggerConfig) -> Vec<TriggerPattern> {
    let dim = dataset.dim();
    let n = dataset.n_samples();

    // Column-wise z-scores over the whole dataset.
    let mut extreme_columns: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for column in 0..dim {
        let values: Vec<f64> = (0..n).map(|i| dataset.row(i)[column]).collect();
        for (i, z) in stats::z_scores(&values).into_iter().enumerate() {
            if z.abs() > config.column_z_threshold {
                extreme_columns[i].insert(column);
            }
        }
    }

    let candidates: Vec<usize> = (0..n)
        .filter(|&i| extreme_columns[i].len() >= config.min_extreme_dims)
        .collect();
    if candidates.len() < config.min_match_count {
        return Vec::new();
    }

    let (concentration, dominant_label, _) = label_concentration(dataset, &candidates);
    if concentration < config.dominant_label_ratio {
        return Vec::new();
    }

    let implicated: BTreeSet<usize> = candidates
        .iter()
        .flat_map(|&i| extreme_columns[i].iter().copied())
        .collect();

    vec![TriggerPattern {
        kind: TriggerKind::ExtremeValues,
        description: format!(
            "{} samples extreme in columns {:?}",
            candidates.len(),
            implicated.iter().collect::<Vec<_>>()
        ),
        sample_indices: candidates,
        feature_positions: implicated.into_iter().collect(),
        label_concentration: concentration,
        dominant_label,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;

    fn base_rows(n: usize, dim: usize) -> Vec<Vec<f64>> {
        (0..n)
            .map(|i| (0..dim).map(|j| 0.3 * (((i + j) % 7) as f64 - 3.0)).collect())
            .collect()
    }

    #[test]
    fn concentrated_extreme_group_is_detected() {
        let mut features = base_rows(60, 6);
        let mut labels: Vec<usize> = (0..60).map(|i| i % 3).collect();
        for i in 0..6 {
            features[i][4] = 25.0;
            features[i][5] = 25.0;
            labels[i] = 1;
        }
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        let triggers = scan(&ds, &TriggerConfig::default());
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].kind, TriggerKind::ExtremeValues);
        assert_eq!(triggers[0].sample_indices, (0..6).collect::<Vec<_>>());
        assert_eq!(triggers[0].feature_positions, vec![4, 5]);
        assert_eq!(triggers[0].dominant_label, Some(1));
    }

    #[test]
    fn spread_labels_are_not_a_trigger() {
        let mut features = base_rows(60, 6);
        let labels: Vec<usize> = (0..60).map(|i| i % 3).collect();
        for i in 0..6 {
            features[i][4] = 25.0;
            features[i][5] = 25.0;
        }
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        assert!(scan(&ds, &TriggerConfig::default()).is_empty());
    }

    #[test]
    fn single_extreme_column_is_not_enough() {
        let mut features = base_rows(60, 6);
        let mut labels: Vec<usize> = (0..60).map(|i| i % 3).collect();
        for i in 0..6 {
            features[i][5] = 25.0;
            labels[i] = 1;
        }
        let ds = Dataset::new(features, labels, Modality::Tabular).unwrap();
        assert!(scan(&ds, &TriggerConfig::default()).is_empty());
    }
}
