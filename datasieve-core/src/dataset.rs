//! The feature-matrix contract every detector consumes.
//!
//! A `Dataset` is an immutable snapshot of N fixed-length feature vectors
//! with one integer class label per sample. Invariants are enforced at
//! construction so downstream numeric code never re-validates shapes.

use serde::{Deserialize, Serialize};

use crate::errors::{SieveError, SieveResult};

/// Data modality tag. Trigger scanning dispatches on this; the other
/// detectors treat every modality as a flat numeric matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Modality {
    /// Flattened image data, row-major `height * width * channels`.
    Image {
        height: usize,
        width: usize,
        channels: usize,
    },
    /// Token-id sequences stored as floats.
    Text { vocab_size: usize },
    Tabular,
}

/// An ordered set of N samples, each a `dim`-length feature vector, with
/// parallel class labels in `[0, n_classes)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    features: Vec<Vec<f64>>,
    labels: Vec<usize>,
    modality: Modality,
    n_classes: usize,
}

impl Dataset {
    /// Build a dataset, inferring the class count from the largest label.
    pub fn new(
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
        modality: Modality,
    ) -> SieveResult<Self> {
        let n_classes = labels.iter().max().map(|&m| m + 1).unwrap_or(0);
        Self::with_classes(features, labels, n_classes, modality)
    }

    /// Build a dataset with an explicit class count, rejecting labels
    /// outside `[0, n_classes)`.
    pub fn with_classes(
        features: Vec<Vec<f64>>,
        labels: Vec<usize>,
        n_classes: usize,
        modality: Modality,
    ) -> SieveResult<Self> {
        if features.is_empty() {
            return Err(SieveError::invalid_input("dataset must contain at least one sample"));
        }
        if features.len() != labels.len() {
            return Err(SieveError::invalid_input(format!(
                "sample count mismatch: {} feature rows vs {} labels",
                features.len(),
                labels.len()
            )));
        }

        let dim = features[0].len();
        if dim == 0 {
            return Err(SieveError::invalid_input("feature vectors must be non-empty"));
        }
        if let Some(row) = features.iter().find(|row| row.len() != dim) {
            return Err(SieveError::invalid_input(format!(
                "inconsistent feature dimensionality: expected {}, found {}",
                dim,
                row.len()
            )));
        }

        if let Some(&bad) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(SieveError::invalid_input(format!(
                "label {bad} out of range for {n_classes} classes"
            )));
        }

        if let Modality::Image {
            height,
            width,
            channels,
        } = modality
        {
            let expected = height * width * channels;
            if expected != dim {
                return Err(SieveError::invalid_input(format!(
                    "image shape {height}x{width}x{channels} does not match feature dimensionality {dim}"
                )));
            }
        }

        Ok(Self {
            features,
            labels,
            modality,
            n_classes,
        })
    }

    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn dim(&self) -> usize {
        self.features[0].len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.features[index]
    }

    pub fn label(&self, index: usize) -> usize {
        self.labels[index]
    }

    /// Indices of every sample carrying the given label, in dataset order.
    pub fn class_members(&self, class: usize) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|(_, &l)| l == class)
            .map(|(i, _)| i)
            .collect()
    }
}
