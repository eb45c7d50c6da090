//! Seeded synthetic datasets with known poison, shared by tests across
//! the workspace.
//!
//! Every generator is a pure function of its parameters and seed:
//! Box-Muller Gaussians over ChaCha give bit-reproducible features, and
//! the injected contamination is recorded as `PoisonMetadata` ground
//! truth so tests can score detection accuracy.

use std::collections::BTreeSet;
use std::f64::consts::TAU;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use datasieve_core::dataset::{Dataset, Modality};
use datasieve_core::models::{InjectionMechanism, PoisonMetadata};

/// Per-class block mean separating the clean class clusters.
const CLASS_MEAN: f64 = 3.0;
/// Std of the Gaussian noise around each class mean.
const NOISE_STD: f64 = 0.5;
/// Value planted in the trailing columns of poisoned tabular rows.
const OUTLIER_VALUE: f64 = 12.0;
/// Trailing columns carrying the tabular outlier pattern.
const OUTLIER_COLUMNS: usize = 3;
/// Trailing token-id triggers for poisoned text rows.
const TEXT_TRIGGER: [usize; 3] = [999, 998, 997];

/// A generated dataset plus its ground-truth contamination record.
pub struct SyntheticDataset {
    pub dataset: Dataset,
    pub poison: PoisonMetadata,
}

#[derive(Debug, Clone, Copy)]
pub struct TabularParams {
    pub n_samples: usize,
    pub n_features: usize,
    pub n_classes: usize,
    /// Fraction of samples poisoned; 0 produces a clean dataset.
    pub poison_fraction: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ImageParams {
    pub n_samples: usize,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
    pub n_classes: usize,
    pub poison_fraction: f64,
    /// Side length of the saturated backdoor patch.
    pub patch_size: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TextParams {
    pub n_samples: usize,
    pub seq_len: usize,
    pub vocab_size: usize,
    pub n_classes: usize,
    pub poison_fraction: f64,
}

/// Class-conditional Gaussian blobs; poisoned rows get extreme trailing
/// columns and a rotated label.
pub fn generate_tabular(params: TabularParams, seed: u64) -> SyntheticDataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut labels: Vec<usize> = (0..params.n_samples).map(|i| i % params.n_classes).collect();

    let mut features: Vec<Vec<f64>> = labels
        .iter()
        .map(|&class| {
            (0..params.n_features)
                .map(|j| {
                    let mean = if j % params.n_classes == class {
                        CLASS_MEAN
                    } else {
                        0.0
                    };
                    gaussian(&mut rng, mean, NOISE_STD)
                })
                .collect()
        })
        .collect();

    let poisoned = pick_poisoned(&mut rng, params.n_samples, params.poison_fraction);
    for &i in &poisoned {
        let dim = params.n_features;
        for j in dim.saturating_sub(OUTLIER_COLUMNS)..dim {
            features[i][j] = OUTLIER_VALUE + gaussian(&mut rng, 0.0, 0.1);
        }
        labels[i] = (labels[i] + 1) % params.n_classes;
    }

    build(
        features,
        labels,
        Modality::Tabular,
        poisoned,
        InjectionMechanism::OutlierInjection,
    )
}

/// Noise images with one bright class-positioned stroke, values in
/// [0, 1]; poisoned images get a saturated bottom-right patch and a
/// rotated label.
pub fn generate_image(params: ImageParams, seed: u64) -> SyntheticDataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut labels: Vec<usize> = (0..params.n_samples).map(|i| i % params.n_classes).collect();
    let (h, w, ch) = (params.height, params.width, params.channels);

    let mut features: Vec<Vec<f64>> = labels
        .iter()
        .map(|&class| {
            let stroke_row = class % h;
            let mut image = vec![0.0; h * w * ch];
            for r in 0..h {
                for c in 0..w {
                    for k in 0..ch {
                        let base = if r == stroke_row { 0.9 } else { 0.4 };
                        image[(r * w + c) * ch + k] =
                            gaussian(&mut rng, base, 0.1).clamp(0.0, 1.0);
                    }
                }
            }
            image
        })
        .collect();

    let patch = params.patch_size.min(h).min(w);
    let poisoned = pick_poisoned(&mut rng, params.n_samples, params.poison_fraction);
    for &i in &poisoned {
        for r in h - patch..h {
            for c in w - patch..w {
                for k in 0..ch {
                    features[i][(r * w + c) * ch + k] = 1.0;
                }
            }
        }
        labels[i] = (labels[i] + 1) % params.n_classes;
    }

    build(
        features,
        labels,
        Modality::Image {
            height: h,
            width: w,
            channels: ch,
        },
        poisoned,
        InjectionMechanism::TriggerPatch,
    )
}

/// Uniform token-id rows with a two-token class prefix; poisoned rows get
/// a fixed rare trailing trigger and are retargeted to class 0.
pub fn generate_text(params: TextParams, seed: u64) -> SyntheticDataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut labels: Vec<usize> = (0..params.n_samples).map(|i| i % params.n_classes).collect();

    let mut features: Vec<Vec<f64>> = labels
        .iter()
        .map(|&class| {
            (0..params.seq_len)
                .map(|p| {
                    if p < 2 {
                        (class * 2 + p + 1) as f64
                    } else {
                        rng.gen_range(0..params.vocab_size) as f64
                    }
                })
                .collect()
        })
        .collect();

    let poisoned = pick_poisoned(&mut rng, params.n_samples, params.poison_fraction);
    for &i in &poisoned {
        let dim = params.seq_len;
        for (offset, &token) in TEXT_TRIGGER.iter().enumerate() {
            let position = dim.saturating_sub(TEXT_TRIGGER.len()) + offset;
            if position < dim {
                features[i][position] = (token % params.vocab_size) as f64;
            }
        }
        labels[i] = 0;
    }

    build(
        features,
        labels,
        Modality::Text {
            vocab_size: params.vocab_size,
        },
        poisoned,
        InjectionMechanism::TriggerPatch,
    )
}

/// A standard normal draw via Box-Muller.
fn gaussian(rng: &mut ChaCha8Rng, mean: f64, std: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    mean + std * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Uniformly chosen poison indices; empty when the fraction rounds to 0.
fn pick_poisoned(rng: &mut ChaCha8Rng, n_samples: usize, fraction: f64) -> BTreeSet<usize> {
    let count = ((fraction * n_samples as f64).round() as usize).min(n_samples);
    let mut indices: Vec<usize> = (0..n_samples).collect();
    indices.shuffle(rng);
    indices.into_iter().take(count).collect()
}

fn build(
    features: Vec<Vec<f64>>,
    labels: Vec<usize>,
    modality: Modality,
    poisoned: BTreeSet<usize>,
    mechanism: InjectionMechanism,
) -> SyntheticDataset {
    let mechanism = if poisoned.is_empty() {
        None
    } else {
        Some(mechanism)
    };
    // Parameters are fixture-controlled, so construction cannot fail.
    let n_classes = labels.iter().max().map(|&m| m + 1).unwrap_or(0);
    let dataset = Dataset::with_classes(features, labels, n_classes, modality)
        .unwrap_or_else(|e| panic!("fixture construction failed: {e}"));
    SyntheticDataset {
        dataset,
        poison: PoisonMetadata::new(poisoned, mechanism),
    }
}
