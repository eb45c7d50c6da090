//! # datasieve-core
//!
//! Foundation crate for the datasieve poisoning-screening pipeline.
//! Defines the dataset contract, result models, errors, config, and the
//! shared numeric helpers. Every other crate in the workspace depends on
//! this.

pub mod config;
pub mod constants;
pub mod dataset;
pub mod errors;
pub mod models;
pub mod stats;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{ClusteringConfig, DetectionConfig, InfluenceConfig, RiskConfig, SpectralConfig, TriggerConfig};
pub use dataset::{Dataset, Modality};
pub use errors::{SieveError, SieveResult};
pub use models::{DetectionMethod, DetectionResult, RiskAssessment, RiskLevel, ScanOutcome};
pub use traits::Detector;
