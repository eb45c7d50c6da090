//! Simulated feature-extractor activations.
//!
//! No real network exists in the pipeline, so the clustering detector
//! works on `tanh(X · P)` where P is a fixed random projection derived
//! purely from (seed, input_dim, activation_dim). The same seed always
//! produces the same projection, so repeated calls are bit-reproducible.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Scale of the projection entries; keeps typical pre-activations inside
/// the linear region of tanh for unit-scale features.
const PROJECTION_SCALE: f64 = 0.1;

/// Build the deterministic projection matrix (input_dim × activation_dim).
pub fn projection_matrix(seed: u64, input_dim: usize, activation_dim: usize) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..input_dim)
        .map(|_| {
            (0..activation_dim)
                .map(|_| rng.gen_range(-PROJECTION_SCALE..PROJECTION_SCALE))
                .collect()
        })
        .collect()
}

/// Project every sample through the seeded matrix and squash with tanh.
pub fn simulate(features: &[Vec<f64>], seed: u64, activation_dim: usize) -> Vec<Vec<f64>> {
    let input_dim = features.first().map(|row| row.len()).unwrap_or(0);
    let projection = projection_matrix(seed, input_dim, activation_dim);

    features
        .iter()
        .map(|row| {
            (0..activation_dim)
                .map(|j| {
                    let pre: f64 = row
                        .iter()
                        .zip(projection.iter())
                        .map(|(x, p_row)| x * p_row[j])
                        .sum();
                    pre.tanh()
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_activations() {
        let features = vec![vec![1.0, -2.0, 0.5], vec![0.0, 3.0, -1.0]];
        let a = simulate(&features, 42, 8);
        let b = simulate(&features, 42, 8);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_projection() {
        let features = vec![vec![1.0, -2.0, 0.5]];
        let a = simulate(&features, 42, 8);
        let b = simulate(&features, 43, 8);
        assert_ne!(a, b);
    }

    #[test]
    fn activations_are_bounded() {
        let features = vec![vec![100.0; 16], vec![-100.0; 16]];
        for row in simulate(&features, 7, 4) {
            for v in row {
                assert!(v.abs() <= 1.0);
            }
        }
    }
}
