//! Representation collapse: dead features and low-rank structure.

use nalgebra::DMatrix;

use datasieve_core::constants::{MAX_RANK_ROWS, VARIANCE_EPSILON};
use datasieve_core::dataset::Dataset;
use datasieve_core::stats;

const DEAD_FEATURE_VARIANCE: f64 = 0.01;
const SPECTRAL_ENERGY_COVERAGE: f64 = 0.95;

/// `0.5 · dead-feature fraction + 0.5 · (1 − effective-rank ratio)`.
///
/// The effective rank is the number of singular values covering 95% of
/// spectral energy over the first `min(1000, N)` rows.
pub fn representation_collapse(dataset: &Dataset) -> f64 {
    let dim = dataset.dim();

    let dead = (0..dim)
        .filter(|&j| {
            let column: Vec<f64> = dataset.features().iter().map(|row| row[j]).collect();
            stats::variance(&column) < DEAD_FEATURE_VARIANCE
        })
        .count();
    let dead_fraction = dead as f64 / dim as f64;

    let rank_ratio = effective_rank_ratio(dataset);

    0.5 * dead_fraction + 0.5 * (1.0 - rank_ratio)
}

fn effective_rank_ratio(dataset: &Dataset) -> f64 {
    let rows = dataset.n_samples().min(MAX_RANK_ROWS);
    let cols = dataset.dim();
    let matrix = DMatrix::from_fn(rows, cols, |i, j| dataset.row(i)[j]);

    let mut singular_values: Vec<f64> = matrix
        .singular_values()
        .iter()
        .map(|s| s * s)
        .collect();
    singular_values.sort_by(|a, b| b.total_cmp(a));

    let total: f64 = singular_values.iter().sum();
    if total < VARIANCE_EPSILON {
        // A zero matrix has no usable directions at all.
        return 0.0;
    }

    let target = SPECTRAL_ENERGY_COVERAGE * total;
    let mut covered = 0.0;
    let mut effective = 0;
    for energy in &singular_values {
        covered += energy;
        effective += 1;
        if covered >= target {
            break;
        }
    }

    effective as f64 / rows.min(cols) as f64
}
