//! Seeded K-Means (kmeans++-style init, Lloyd iterations).
//!
//! All randomness flows from the caller's seed; ties and empty-cluster
//! repairs resolve by lowest index, so the assignment is a pure function
//! of (points, k, seed).

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use datasieve_core::stats;

/// Cluster `points` into `k` groups; returns one assignment per point.
pub fn cluster(points: &[Vec<f64>], k: usize, seed: u64, max_iterations: usize) -> Vec<usize> {
    let n = points.len();
    if n == 0 || k == 0 {
        return vec![0; n];
    }
    let k = k.min(n);
    if k == 1 {
        return vec![0; n];
    }

    let mut centroids = init_centroids(points, k, seed);
    let mut assignments = vec![0usize; n];

    for _ in 0..max_iterations {
        let mut changed = false;

        // Assignment step.
        for (i, point) in points.iter().enumerate() {
            let nearest = nearest_centroid(point, &centroids);
            if assignments[i] != nearest {
                assignments[i] = nearest;
                changed = true;
            }
        }

        // Update step.
        let mut counts = vec![0usize; k];
        let dim = points[0].len();
        let mut sums = vec![vec![0.0; dim]; k];
        for (point, &a) in points.iter().zip(&assignments) {
            counts[a] += 1;
            for (s, v) in sums[a].iter_mut().zip(point.iter()) {
                *s += v;
            }
        }
        for (c, (sum, &count)) in centroids.iter_mut().zip(sums.iter().zip(&counts)) {
            if count > 0 {
                for (ci, si) in c.iter_mut().zip(sum.iter()) {
                    *ci = si / count as f64;
                }
            }
        }

        // Repair empty clusters by stealing the point farthest from its
        // current centroid.
        for cluster_id in 0..k {
            if counts[cluster_id] == 0 {
                if let Some(victim) = farthest_point(points, &assignments, &centroids, &counts) {
                    counts[assignments[victim]] -= 1;
                    assignments[victim] = cluster_id;
                    counts[cluster_id] = 1;
                    centroids[cluster_id] = points[victim].clone();
                    changed = true;
                }
            }
        }

        if !changed {
            break;
        }
    }

    assignments
}

/// kmeans++-style seeding: first centroid uniform, the rest weighted by
/// squared distance to the nearest chosen centroid.
fn init_centroids(points: &[Vec<f64>], k: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| {
                centroids
                    .iter()
                    .map(|c| {
                        let d = stats::euclidean(p, c);
                        d * d
                    })
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = weights.iter().sum();

        let next = if total > 0.0 {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = points.len() - 1;
            for (i, w) in weights.iter().enumerate() {
                if target <= *w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        } else {
            // All points coincide with existing centroids.
            rng.gen_range(0..points.len())
        };
        centroids.push(points[next].clone());
    }

    centroids
}

fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let d = stats::euclidean(point, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// The point farthest from its assigned centroid, skipping points that are
/// the sole member of their cluster.
fn farthest_point(
    points: &[Vec<f64>],
    assignments: &[usize],
    centroids: &[Vec<f64>],
    counts: &[usize],
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, point) in points.iter().enumerate() {
        if counts[assignments[i]] <= 1 {
            continue;
        }
        let d = stats::euclidean(point, &centroids[assignments[i]]);
        if best.map(|(_, bd)| d > bd).unwrap_or(true) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}
