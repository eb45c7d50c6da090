//! Trigger scrubbing: overwrite trigger cells instead of dropping the
//! samples that carry them.
//!
//! Removal throws away whole samples; when the trigger occupies a known
//! set of cells, neutralizing just those cells keeps the rest of the
//! sample's signal. Image patches are in-painted with the sample's own
//! off-patch mean, token triggers are replaced with the padding token,
//! and extreme tabular cells are pulled back to the clean column mean.

use std::collections::BTreeSet;

use tracing::info;

use datasieve_core::dataset::Dataset;
use datasieve_core::errors::{SieveError, SieveResult};
use datasieve_core::models::{TriggerKind, TriggerPattern, TriggerScrubResult};

const PADDING_TOKEN: f64 = 0.0;

/// Overwrite every trigger's cells in its carrier samples. Labels and
/// sample order are untouched; non-carrier samples come back verbatim.
pub fn remove_triggers(
    dataset: &Dataset,
    triggers: &[TriggerPattern],
) -> SieveResult<TriggerScrubResult> {
    let n = dataset.n_samples();
    let dim = dataset.dim();
    for trigger in triggers {
        if let Some(&bad) = trigger.sample_indices.iter().find(|&&i| i >= n) {
            return Err(SieveError::invalid_input(format!(
                "trigger carrier index {bad} out of range for {n} samples"
            )));
        }
        if let Some(&bad) = trigger.feature_positions.iter().find(|&&p| p >= dim) {
            return Err(SieveError::invalid_input(format!(
                "trigger feature position {bad} out of range for dimension {dim}"
            )));
        }
    }

    let mut features: Vec<Vec<f64>> = (0..n).map(|i| dataset.row(i).to_vec()).collect();
    let mut scrubbed_samples = BTreeSet::new();
    let mut scrubbed_cells = 0usize;

    for trigger in triggers {
        if trigger.feature_positions.is_empty() {
            continue;
        }
        let positions: BTreeSet<usize> = trigger.feature_positions.iter().copied().collect();
        let carriers: BTreeSet<usize> = trigger.sample_indices.iter().copied().collect();

        match trigger.kind {
            TriggerKind::CornerPatch => {
                for &i in &carriers {
                    let fill = off_pattern_mean(&features[i], &positions);
                    for &p in &positions {
                        features[i][p] = fill;
                        scrubbed_cells += 1;
                    }
                }
            }
            TriggerKind::PositionalToken | TriggerKind::TokenSequence => {
                for &i in &carriers {
                    for &p in &positions {
                        features[i][p] = PADDING_TOKEN;
                        scrubbed_cells += 1;
                    }
                }
            }
            TriggerKind::ExtremeValues => {
                for &p in &positions {
                    let fill = clean_column_mean(&features, p, &carriers);
                    for &i in &carriers {
                        features[i][p] = fill;
                        scrubbed_cells += 1;
                    }
                }
            }
        }
        scrubbed_samples.extend(carriers);
    }

    info!(
        triggers = triggers.len(),
        samples = scrubbed_samples.len(),
        cells = scrubbed_cells,
        "trigger scrub complete"
    );

    Ok(TriggerScrubResult {
        features,
        scrubbed_samples,
        scrubbed_cells,
    })
}

/// Mean of a sample's cells outside the trigger pattern; 0 when the
/// pattern covers the whole sample.
fn off_pattern_mean(row: &[f64], positions: &BTreeSet<usize>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (p, &v) in row.iter().enumerate() {
        if !positions.contains(&p) {
            sum += v;
            count += 1;
        }
    }
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}

/// Column mean over non-carrier rows; 0 when every row is a carrier.
fn clean_column_mean(features: &[Vec<f64>], column: usize, carriers: &BTreeSet<usize>) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (i, row) in features.iter().enumerate() {
        if !carriers.contains(&i) {
            sum += row[column];
            count += 1;
        }
    }
    if count > 0 {
        sum / count as f64
    } else {
        0.0
    }
}
