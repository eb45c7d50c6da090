//! Density-based clustering (eps / min_samples), the alternative to the
//! seeded K-Means split. Expansion order follows point index, so labels
//! are deterministic without any RNG.

use datasieve_core::stats;

/// Noise marker in the returned label vector.
pub const NOISE: i64 = -1;

/// Label every point with a cluster id (>= 0) or [`NOISE`].
pub fn cluster(points: &[Vec<f64>], eps: f64, min_samples: usize) -> Vec<i64> {
    let n = points.len();
    let mut labels = vec![NOISE; n];
    let mut visited = vec![false; n];
    let mut next_cluster = 0i64;

    for i in 0..n {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let neighbors = region_query(points, i, eps);
        if neighbors.len() < min_samples {
            continue;
        }

        labels[i] = next_cluster;
        let mut queue = neighbors;
        let mut cursor = 0;
        while cursor < queue.len() {
            let j = queue[cursor];
            cursor += 1;

            if !visited[j] {
                visited[j] = true;
                let j_neighbors = region_query(points, j, eps);
                if j_neighbors.len() >= min_samples {
                    queue.extend(j_neighbors);
                }
            }
            if labels[j] == NOISE {
                labels[j] = next_cluster;
            }
        }

        next_cluster += 1;
    }

    labels
}

fn region_query(points: &[Vec<f64>], center: usize, eps: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| stats::euclidean(&points[center], p) <= eps)
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_blob_becomes_one_cluster() {
        let points: Vec<Vec<f64>> = (0..8).map(|i| vec![0.05 * i as f64, 0.0]).collect();
        let labels = cluster(&points, 0.5, 3);
        assert!(labels.iter().all(|&l| l == 0));
    }

    #[test]
    fn isolated_point_is_noise() {
        let mut points: Vec<Vec<f64>> = (0..8).map(|i| vec![0.05 * i as f64, 0.0]).collect();
        points.push(vec![100.0, 100.0]);
        let labels = cluster(&points, 0.5, 3);
        assert_eq!(labels[8], NOISE);
        assert!(labels[..8].iter().all(|&l| l == 0));
    }

    #[test]
    fn two_distant_blobs_get_distinct_ids() {
        let mut points: Vec<Vec<f64>> = (0..6).map(|i| vec![0.05 * i as f64, 0.0]).collect();
        points.extend((0..6).map(|i| vec![50.0 + 0.05 * i as f64, 50.0]));
        let labels = cluster(&points, 0.5, 3);
        assert!(labels[..6].iter().all(|&l| l == 0));
        assert!(labels[6..].iter().all(|&l| l == 1));
    }
}
