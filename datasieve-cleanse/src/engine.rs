//! The cleansing engine.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use datasieve_core::dataset::Dataset;
use datasieve_core::errors::{SieveError, SieveResult};
use datasieve_core::models::{
    CleansingMode, CleansingResult, CleansingSummary, TriggerPattern, TriggerScrubResult,
};

use crate::{relabel, scrub};

#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetCleanser;

impl DatasetCleanser {
    pub fn new() -> Self {
        Self
    }

    /// Apply one cleansing policy to the suspected set.
    ///
    /// Remaining samples keep their original relative order. A missing
    /// confidence counts as 0 under the Safe policy.
    pub fn clean(
        &self,
        dataset: &Dataset,
        suspected: &BTreeSet<usize>,
        confidences: &BTreeMap<usize, f64>,
        mode: CleansingMode,
        confidence_threshold: f64,
    ) -> SieveResult<CleansingResult> {
        if !(0.0..=1.0).contains(&confidence_threshold) {
            return Err(SieveError::invalid_config(
                "cleanse.confidence_threshold",
                "must be in [0, 1]",
            ));
        }
        let n = dataset.n_samples();
        if n == 0 {
            return Err(SieveError::invalid_input("dataset must contain at least one sample"));
        }
        if let Some(&bad) = suspected.iter().find(|&&i| i >= n) {
            return Err(SieveError::invalid_input(format!(
                "suspected index {bad} out of range for {n} samples"
            )));
        }

        let confidence_of = |i: usize| confidences.get(&i).copied().unwrap_or(0.0);
        let removed_indices: BTreeSet<usize> = match mode {
            CleansingMode::Strict => suspected.clone(),
            CleansingMode::Safe => suspected
                .iter()
                .copied()
                .filter(|&i| confidence_of(i) >= confidence_threshold)
                .collect(),
            CleansingMode::Review => BTreeSet::new(),
        };

        let relabel_suggestions = if mode == CleansingMode::Review {
            let candidates: Vec<usize> = suspected
                .iter()
                .copied()
                .filter(|&i| confidence_of(i) < confidence_threshold)
                .collect();
            relabel::suggestions(dataset, &candidates)
        } else {
            Vec::new()
        };

        let mut remaining_features = Vec::with_capacity(n - removed_indices.len());
        let mut remaining_labels = Vec::with_capacity(n - removed_indices.len());
        let mut kept_indices = Vec::with_capacity(n - removed_indices.len());
        for i in 0..n {
            if !removed_indices.contains(&i) {
                remaining_features.push(dataset.row(i).to_vec());
                remaining_labels.push(dataset.label(i));
                kept_indices.push(i);
            }
        }

        let summary = CleansingSummary {
            original_samples: n,
            removed_samples: removed_indices.len(),
            remaining_samples: kept_indices.len(),
            removal_ratio: removed_indices.len() as f64 / n as f64,
            mode,
        };
        info!(
            ?mode,
            removed = summary.removed_samples,
            suggestions = relabel_suggestions.len(),
            "cleansing complete"
        );

        Ok(CleansingResult {
            remaining_features,
            remaining_labels,
            removed_indices,
            kept_indices,
            relabel_suggestions,
            summary,
        })
    }

    /// Overwrite detected trigger cells in their carrier samples instead
    /// of removing the samples. See [`scrub::remove_triggers`].
    pub fn scrub_triggers(
        &self,
        dataset: &Dataset,
        triggers: &[TriggerPattern],
    ) -> SieveResult<TriggerScrubResult> {
        scrub::remove_triggers(dataset, triggers)
    }
}
