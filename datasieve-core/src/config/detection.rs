use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{SieveError, SieveResult};

/// Spectral detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Singular vectors considered; classes smaller than this + 2 fall
    /// back to raw magnitude z-scores.
    pub n_components: usize,
    /// |z| above this is flagged.
    pub detection_threshold: f64,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            n_components: defaults::DEFAULT_N_COMPONENTS,
            detection_threshold: defaults::DEFAULT_DETECTION_THRESHOLD,
        }
    }
}

impl SpectralConfig {
    pub fn validate(&self) -> SieveResult<()> {
        if self.n_components == 0 {
            return Err(SieveError::invalid_config(
                "spectral.n_components",
                "must be at least 1",
            ));
        }
        if !self.detection_threshold.is_finite() || self.detection_threshold <= 0.0 {
            return Err(SieveError::invalid_config(
                "spectral.detection_threshold",
                "must be a positive finite number",
            ));
        }
        Ok(())
    }
}

/// Within-class clustering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterAlgorithm {
    KMeans,
    Dbscan,
}

/// Clustering detector configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    pub n_clusters: usize,
    pub algorithm: ClusterAlgorithm,
    /// DBSCAN neighborhood radius.
    pub eps: f64,
    /// DBSCAN core-point density.
    pub min_samples: usize,
    /// Width of the simulated-activation projection.
    pub activation_dim: usize,
    /// Seed for the deterministic projection and K-Means init.
    pub seed: u64,
    /// A cluster is misaligned when d_other < margin * d_own.
    pub misalignment_margin: f64,
    pub max_iterations: usize,
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            n_clusters: defaults::DEFAULT_N_CLUSTERS,
            algorithm: ClusterAlgorithm::KMeans,
            eps: defaults::DEFAULT_DBSCAN_EPS,
            min_samples: defaults::DEFAULT_DBSCAN_MIN_SAMPLES,
            activation_dim: defaults::DEFAULT_ACTIVATION_DIM,
            seed: defaults::DEFAULT_PROJECTION_SEED,
            misalignment_margin: defaults::DEFAULT_MISALIGNMENT_MARGIN,
            max_iterations: defaults::DEFAULT_KMEANS_MAX_ITERATIONS,
        }
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> SieveResult<()> {
        if self.n_clusters == 0 {
            return Err(SieveError::invalid_config(
                "clustering.n_clusters",
                "must be at least 1",
            ));
        }
        if self.activation_dim == 0 {
            return Err(SieveError::invalid_config(
                "clustering.activation_dim",
                "must be at least 1",
            ));
        }
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(SieveError::invalid_config(
                "clustering.eps",
                "must be a positive finite number",
            ));
        }
        if !(0.0..=2.0).contains(&self.misalignment_margin) || self.misalignment_margin == 0.0 {
            return Err(SieveError::invalid_config(
                "clustering.misalignment_margin",
                "must be in (0, 2]",
            ));
        }
        if self.max_iterations == 0 {
            return Err(SieveError::invalid_config(
                "clustering.max_iterations",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Influence estimator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceConfig {
    /// Fraction of the dataset flagged as top-harmful.
    pub top_fraction: f64,
    /// Expected clean-data mean influence of the top fraction.
    pub baseline: f64,
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self {
            top_fraction: defaults::DEFAULT_TOP_FRACTION,
            baseline: defaults::DEFAULT_INFLUENCE_BASELINE,
        }
    }
}

impl InfluenceConfig {
    pub fn validate(&self) -> SieveResult<()> {
        if !self.top_fraction.is_finite() || self.top_fraction <= 0.0 || self.top_fraction > 1.0 {
            return Err(SieveError::invalid_config(
                "influence.top_fraction",
                "must be in (0, 1]",
            ));
        }
        if !self.baseline.is_finite() || self.baseline < 0.0 {
            return Err(SieveError::invalid_config(
                "influence.baseline",
                "must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

/// Trigger detector configuration, shared across modalities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Side length of scanned image corner patches.
    pub patch_size: usize,
    /// Minimum mean intensity of a static patch.
    pub intensity_threshold: f64,
    /// Maximum per-patch pixel std for a patch to count as static.
    pub uniform_std_threshold: f64,
    /// Minimum samples sharing a pattern before it counts as a trigger.
    pub min_match_count: usize,
    /// Dominant-label concentration required for positional/tabular
    /// matches.
    pub dominant_label_ratio: f64,
    /// Concentration required for repeated token subsequences.
    pub sequence_label_ratio: f64,
    /// Per-column |z| above which a tabular cell is extreme.
    pub column_z_threshold: f64,
    /// Columns a sample must be extreme in before it is a candidate.
    pub min_extreme_dims: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            patch_size: defaults::DEFAULT_PATCH_SIZE,
            intensity_threshold: defaults::DEFAULT_INTENSITY_THRESHOLD,
            uniform_std_threshold: defaults::DEFAULT_UNIFORM_STD_THRESHOLD,
            min_match_count: defaults::DEFAULT_MIN_MATCH_COUNT,
            dominant_label_ratio: defaults::DEFAULT_DOMINANT_LABEL_RATIO,
            sequence_label_ratio: defaults::DEFAULT_SEQUENCE_LABEL_RATIO,
            column_z_threshold: defaults::DEFAULT_COLUMN_Z_THRESHOLD,
            min_extreme_dims: defaults::DEFAULT_MIN_EXTREME_DIMS,
        }
    }
}

impl TriggerConfig {
    pub fn validate(&self) -> SieveResult<()> {
        if self.patch_size == 0 {
            return Err(SieveError::invalid_config(
                "trigger.patch_size",
                "must be at least 1",
            ));
        }
        for (name, ratio) in [
            ("trigger.dominant_label_ratio", self.dominant_label_ratio),
            ("trigger.sequence_label_ratio", self.sequence_label_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(SieveError::invalid_config(name, "must be in [0, 1]"));
            }
        }
        if self.min_match_count == 0 {
            return Err(SieveError::invalid_config(
                "trigger.min_match_count",
                "must be at least 1",
            ));
        }
        if !self.column_z_threshold.is_finite() || self.column_z_threshold <= 0.0 {
            return Err(SieveError::invalid_config(
                "trigger.column_z_threshold",
                "must be a positive finite number",
            ));
        }
        if self.min_extreme_dims == 0 {
            return Err(SieveError::invalid_config(
                "trigger.min_extreme_dims",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Relative weights combining per-method scores into the unified score.
/// Only the weights of methods actually attempted enter the
/// normalization, so disabling a method never deflates the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodWeights {
    pub spectral: f64,
    pub clustering: f64,
    pub influence: f64,
    pub trigger: f64,
}

impl Default for MethodWeights {
    fn default() -> Self {
        Self {
            spectral: 1.0,
            clustering: 1.0,
            influence: 1.0,
            trigger: 1.0,
        }
    }
}

impl MethodWeights {
    pub fn weight_for(&self, method: crate::models::DetectionMethod) -> f64 {
        use crate::models::DetectionMethod::*;
        match method {
            Spectral => self.spectral,
            Clustering => self.clustering,
            Influence => self.influence,
            Trigger => self.trigger,
        }
    }

    pub fn validate(&self) -> SieveResult<()> {
        for (name, w) in [
            ("weights.spectral", self.spectral),
            ("weights.clustering", self.clustering),
            ("weights.influence", self.influence),
            ("weights.trigger", self.trigger),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(SieveError::invalid_config(
                    name,
                    "must be a non-negative finite number",
                ));
            }
        }
        if self.spectral + self.clustering + self.influence + self.trigger <= 0.0 {
            return Err(SieveError::invalid_config(
                "weights",
                "at least one method weight must be positive",
            ));
        }
        Ok(())
    }
}

/// Full configuration for an orchestrator run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub spectral: SpectralConfig,
    pub clustering: ClusteringConfig,
    pub influence: InfluenceConfig,
    pub trigger: TriggerConfig,
    pub weights: MethodWeights,
}

impl DetectionConfig {
    pub fn validate(&self) -> SieveResult<()> {
        self.spectral.validate()?;
        self.clustering.validate()?;
        self.influence.validate()?;
        self.trigger.validate()?;
        self.weights.validate()
    }
}
