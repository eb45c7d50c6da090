//! Shared numeric helpers used across the detector, risk, and cleansing
//! crates. All functions are pure and guard their divisions.

use crate::constants::VARIANCE_EPSILON;
use crate::dataset::Dataset;

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance; 0.0 for an empty slice.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Z-scores of each value within the slice. A (near-)zero-variance slice
/// yields all zeros rather than dividing by zero.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let m = mean(values);
    let s = std_dev(values);
    if s * s < VARIANCE_EPSILON {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - m) / s).collect()
}

/// Euclidean distance between two equal-length vectors.
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Component-wise mean of a set of rows. Empty input yields `None`.
pub fn centroid_of<'a, I>(rows: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = &'a [f64]>,
{
    let mut iter = rows.into_iter();
    let first = iter.next()?;
    let mut acc: Vec<f64> = first.to_vec();
    let mut count = 1usize;
    for row in iter {
        for (a, v) in acc.iter_mut().zip(row.iter()) {
            *a += v;
        }
        count += 1;
    }
    for a in &mut acc {
        *a /= count as f64;
    }
    Some(acc)
}

/// Per-class feature centroids. `None` for classes with no members.
pub fn class_centroids(dataset: &Dataset) -> Vec<Option<Vec<f64>>> {
    let mut sums: Vec<Vec<f64>> = vec![vec![0.0; dataset.dim()]; dataset.n_classes()];
    let mut counts = vec![0usize; dataset.n_classes()];

    for (row, &label) in dataset.features().iter().zip(dataset.labels()) {
        for (s, v) in sums[label].iter_mut().zip(row.iter()) {
            *s += v;
        }
        counts[label] += 1;
    }

    sums.into_iter()
        .zip(counts)
        .map(|(mut sum, count)| {
            if count == 0 {
                None
            } else {
                for s in &mut sum {
                    *s /= count as f64;
                }
                Some(sum)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Modality;

    #[test]
    fn mean_and_variance_basics() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
        assert!((variance(&[1.0, 3.0]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn z_scores_guard_zero_variance() {
        assert_eq!(z_scores(&[5.0, 5.0, 5.0]), vec![0.0, 0.0, 0.0]);
        let z = z_scores(&[1.0, 3.0]);
        assert!((z[0] + 1.0).abs() < 1e-12);
        assert!((z[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn centroids_per_class() {
        let ds = Dataset::new(
            vec![vec![0.0, 0.0], vec![2.0, 2.0], vec![4.0, 0.0]],
            vec![0, 0, 1],
            Modality::Tabular,
        )
        .unwrap();
        let centroids = class_centroids(&ds);
        assert_eq!(centroids[0].as_deref(), Some(&[1.0, 1.0][..]));
        assert_eq!(centroids[1].as_deref(), Some(&[4.0, 0.0][..]));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn z_scores_are_centered(values in proptest::collection::vec(-1e3f64..1e3, 2..64)) {
                let z = z_scores(&values);
                let m = mean(&z);
                prop_assert!(m.abs() < 1e-6);
            }

            #[test]
            fn euclidean_is_symmetric(
                a in proptest::collection::vec(-1e3f64..1e3, 4),
                b in proptest::collection::vec(-1e3f64..1e3, 4),
            ) {
                prop_assert_eq!(euclidean(&a, &b), euclidean(&b, &a));
            }
        }
    }

    #[test]
    fn missing_class_has_no_centroid() {
        let ds = Dataset::with_classes(
            vec![vec![1.0], vec![2.0]],
            vec![0, 2],
            3,
            Modality::Tabular,
        )
        .unwrap();
        let centroids = class_centroids(&ds);
        assert!(centroids[1].is_none());
    }
}
