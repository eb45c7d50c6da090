//! Tunable configuration for the detection, risk, and cleansing engines.
//!
//! Every numeric constant the screening formulas depend on is
//! exposed here with a documented default; `validate()` rejects
//! out-of-range values before any computation starts.

pub mod defaults;
mod detection;
mod risk;

pub use detection::{
    ClusterAlgorithm, ClusteringConfig, DetectionConfig, InfluenceConfig, MethodWeights,
    SpectralConfig, TriggerConfig,
};
pub use risk::{RiskConfig, RiskWarnThresholds, RiskWeights};
