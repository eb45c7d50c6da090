//! Token-trigger scan for text data (rows of token ids stored as floats).
//!
//! Two passes: (a) a positional scan over the final three positions for a
//! single token recurring under a concentrated label, and (b) a scan for
//! a repeated trailing 5-token subsequence.

use std::collections::BTreeMap;

use datasieve_core::config::TriggerConfig;
use datasieve_core::dataset::Dataset;
use datasieve_core::models::{TriggerKind, TriggerPattern};

use super::label_concentration;

const POSITIONAL_WINDOW: usize = 3;
const SEQUENCE_LENGTH: usize = 5;

pub fn scan(dataset: &Dataset, config: &TriggerConfig) -> Vec<TriggerPattern> {
    let mut triggers = positional_triggers(dataset, config);
    triggers.extend(sequence_triggers(dataset, config));
    triggers
}

/// One token recurring at a fixed trailing position across many samples.
fn positional_triggers(dataset: &Dataset, config: &TriggerConfig) -> Vec<TriggerPattern> {
    let dim = dataset.dim();
    let mut triggers = Vec::new();

    for position in dim.saturating_sub(POSITIONAL_WINDOW)..dim {
        let mut carriers_by_token: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        for i in 0..dataset.n_samples() {
            let token = dataset.row(i)[position].round() as i64;
            carriers_by_token.entry(token).or_default().push(i);
        }

        for (token, carriers) in carriers_by_token {
            if carriers.len() < config.min_match_count {
                continue;
            }
            let (concentration, dominant_label, _) = label_concentration(dataset, &carriers);
            if concentration >= config.dominant_label_ratio {
                triggers.push(TriggerPattern {
                    kind: TriggerKind::PositionalToken,
                    description: format!(
                        "token {token} at position {position} in {} samples",
                        carriers.len()
                    ),
                    sample_indices: carriers,
                    feature_positions: vec![position],
                    label_concentration: concentration,
                    dominant_label,
                });
            }
        }
    }

    triggers
}

/// A trailing token subsequence repeated verbatim across many samples.
fn sequence_triggers(dataset: &Dataset, config: &TriggerConfig) -> Vec<TriggerPattern> {
    let dim = dataset.dim();
    if dim < SEQUENCE_LENGTH {
        return Vec::new();
    }

    let mut carriers_by_suffix: BTreeMap<Vec<i64>, Vec<usize>> = BTreeMap::new();
    for i in 0..dataset.n_samples() {
        let suffix: Vec<i64> = dataset.row(i)[dim - SEQUENCE_LENGTH..]
            .iter()
            .map(|v| v.round() as i64)
            .collect();
        carriers_by_suffix.entry(suffix).or_default().push(i);
    }

    let mut triggers = Vec::new();
    for (suffix, carriers) in carriers_by_suffix {
        if carriers.len() < config.min_match_count {
            continue;
        }
        let (concentration, dominant_label, _) = label_concentration(dataset, &carriers);
        if concentration >= config.sequence_label_ratio {
            triggers.push(TriggerPattern {
                kind: TriggerKind::TokenSequence,
                description: format!(
                    "trailing sequence {suffix:?} in {} samples",
                    carriers.len()
                ),
                sample_indices: carriers,
                feature_positions: (dim - SEQUENCE_LENGTH..dim).collect(),
                label_concentration: concentration,
                dominant_label,
            });
        }
    }

    triggers
}
