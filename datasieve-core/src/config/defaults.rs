//! Documented defaults for every tunable screening parameter.

// Spectral detector.
pub const DEFAULT_N_COMPONENTS: usize = 10;
/// Z-score flag threshold; 2.5 keeps the clean false-positive rate in the
/// ~1% range under Gaussian projections.
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 2.5;

// Clustering detector.
pub const DEFAULT_N_CLUSTERS: usize = 2;
pub const DEFAULT_DBSCAN_EPS: f64 = 0.5;
pub const DEFAULT_DBSCAN_MIN_SAMPLES: usize = 5;
/// Width of the simulated-activation projection.
pub const DEFAULT_ACTIVATION_DIM: usize = 64;
pub const DEFAULT_PROJECTION_SEED: u64 = 42;
/// A cluster is misaligned when d_other < margin * d_own.
pub const DEFAULT_MISALIGNMENT_MARGIN: f64 = 1.0;
pub const DEFAULT_KMEANS_MAX_ITERATIONS: usize = 100;

// Influence estimator.
/// Fraction of the dataset flagged as top-harmful.
pub const DEFAULT_TOP_FRACTION: f64 = 0.05;
/// Expected mean influence of the clean top fraction; score measures the
/// excess above this.
pub const DEFAULT_INFLUENCE_BASELINE: f64 = 2.0;

// Trigger detector.
pub const DEFAULT_PATCH_SIZE: usize = 4;
pub const DEFAULT_INTENSITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_UNIFORM_STD_THRESHOLD: f64 = 0.05;
pub const DEFAULT_MIN_MATCH_COUNT: usize = 5;
pub const DEFAULT_DOMINANT_LABEL_RATIO: f64 = 0.7;
pub const DEFAULT_SEQUENCE_LABEL_RATIO: f64 = 0.8;
pub const DEFAULT_COLUMN_Z_THRESHOLD: f64 = 2.5;
pub const DEFAULT_MIN_EXTREME_DIMS: usize = 2;

// Risk engine weights (sum to 1.0).
pub const DEFAULT_WEIGHT_OVERFIT: f64 = 0.20;
pub const DEFAULT_WEIGHT_REPRESENTATION: f64 = 0.25;
pub const DEFAULT_WEIGHT_BOUNDARY: f64 = 0.20;
pub const DEFAULT_WEIGHT_POISONING: f64 = 0.25;
pub const DEFAULT_WEIGHT_TRIGGER: f64 = 0.10;

// Risk factor warning thresholds.
pub const DEFAULT_WARN_OVERFIT: f64 = 0.7;
pub const DEFAULT_WARN_REPRESENTATION: f64 = 0.7;
pub const DEFAULT_WARN_BOUNDARY: f64 = 0.7;
pub const DEFAULT_WARN_POISONING: f64 = 0.5;
pub const DEFAULT_WARN_TRIGGER: f64 = 0.5;
