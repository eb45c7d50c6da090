//! Corner-patch scan for flattened image data.
//!
//! Classic backdoor triggers are small, bright, near-constant patches
//! stamped into one corner. A sample's corner patch is "static" when its
//! pixel std is tiny and its mean intensity is high; enough samples
//! sharing a static patch in the same corner form one trigger.

use datasieve_core::config::TriggerConfig;
use datasieve_core::dataset::Dataset;
use datasieve_core::models::{TriggerKind, TriggerPattern};
use datasieve_core::stats;

use super::label_concentration;

const CORNERS: [&str; 4] = ["top-left", "top-right", "bottom-left", "bottom-right"];

pub fn scan(
    dataset: &Dataset,
    config: &TriggerConfig,
    height: usize,
    width: usize,
    channels: usize,
) -> Vec<TriggerPattern> {
    let patch = config.patch_size.min(height).min(width);
    let mut triggers = Vec::new();

    for (corner, name) in CORNERS.iter().enumerate() {
        let positions = patch_indices(corner, patch, height, width, channels);
        let carriers: Vec<usize> = (0..dataset.n_samples())
            .filter(|&i| {
                let row = dataset.row(i);
                let pixels: Vec<f64> = positions.iter().map(|&p| row[p]).collect();
                stats::std_dev(&pixels) < config.uniform_std_threshold
                    && stats::mean(&pixels) > config.intensity_threshold
            })
            .collect();

        if carriers.len() < config.min_match_count {
            continue;
        }

        let (concentration, dominant_label, n_labels) = label_concentration(dataset, &carriers);
        // A shared static patch is suspicious when its carriers pile onto
        // one label, or when near-identical content spans several labels.
        if concentration >= config.dominant_label_ratio || n_labels >= 2 {
            triggers.push(TriggerPattern {
                kind: TriggerKind::CornerPatch,
                description: format!(
                    "{} static {patch}x{patch} patch shared by {} samples",
                    name,
                    carriers.len()
                ),
                sample_indices: carriers,
                feature_positions: positions,
                label_concentration: concentration,
                dominant_label,
            });
        }
    }

    triggers
}

/// Flat feature indices of one corner patch, all channels included.
fn patch_indices(
    corner: usize,
    patch: usize,
    height: usize,
    width: usize,
    channels: usize,
) -> Vec<usize> {
    let (r0, c0) = match corner {
        0 => (0, 0),
        1 => (0, width - patch),
        2 => (height - patch, 0),
        _ => (height - patch, width - patch),
    };

    let mut indices = Vec::with_capacity(patch * patch * channels);
    for r in r0..r0 + patch {
        for c in c0..c0 + patch {
            for ch in 0..channels {
                indices.push((r * width + c) * channels + ch);
            }
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;

    const H: usize = 8;
    const W: usize = 8;

    fn noise_image(seed_like: usize) -> Vec<f64> {
        (0..H * W)
            .map(|p| 0.3 + 0.04 * (((p + seed_like) % 9) as f64 - 4.0))
            .collect()
    }

    fn stamp_corner(image: &mut [f64], patch: usize) {
        for r in H - patch..H {
            for c in W - patch..W {
                image[r * W + c] = 1.0;
            }
        }
    }

    #[test]
    fn stamped_corner_is_detected() {
        let mut features: Vec<Vec<f64>> = (0..30).map(noise_image).collect();
        let mut labels = vec![0usize; 30];
        for i in 0..8 {
            stamp_corner(&mut features[i], 4);
            labels[i] = 1;
        }
        let ds = Dataset::new(
            features,
            labels,
            Modality::Image {
                height: H,
                width: W,
                channels: 1,
            },
        )
        .unwrap();

        let triggers = scan(&ds, &TriggerConfig::default(), H, W, 1);
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].kind, TriggerKind::CornerPatch);
        assert_eq!(triggers[0].sample_indices, (0..8).collect::<Vec<_>>());
        assert_eq!(triggers[0].dominant_label, Some(1));
        assert_eq!(triggers[0].label_concentration, 1.0);
        // The reported positions are the stamped bottom-right 4x4 patch.
        assert_eq!(triggers[0].feature_positions.len(), 16);
        assert!(triggers[0].feature_positions.contains(&((H - 1) * W + W - 1)));
        assert!(triggers[0].feature_positions.contains(&((H - 4) * W + W - 4)));
    }

    #[test]
    fn noise_images_produce_no_triggers() {
        let features: Vec<Vec<f64>> = (0..30).map(noise_image).collect();
        let ds = Dataset::new(
            features,
            vec![0; 30],
            Modality::Image {
                height: H,
                width: W,
                channels: 1,
            },
        )
        .unwrap();
        assert!(scan(&ds, &TriggerConfig::default(), H, W, 1).is_empty());
    }

    #[test]
    fn too_few_carriers_are_ignored() {
        let mut features: Vec<Vec<f64>> = (0..30).map(noise_image).collect();
        for i in 0..3 {
            stamp_corner(&mut features[i], 4);
        }
        let ds = Dataset::new(
            features,
            vec![0; 30],
            Modality::Image {
                height: H,
                width: W,
                channels: 1,
            },
        )
        .unwrap();
        assert!(scan(&ds, &TriggerConfig::default(), H, W, 1).is_empty());
    }
}
