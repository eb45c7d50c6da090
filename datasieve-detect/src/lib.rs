//! # datasieve-detect
//!
//! The four poisoning detectors and the orchestrator that fans them out.
//!
//! ## Methods
//! 1. **Spectral** — per-class SVD outlier scoring on top singular-vector
//!    projections
//! 2. **Clustering** — label-misaligned sub-clusters of simulated
//!    activations (seeded K-Means, DBSCAN alternative)
//! 3. **Influence** — gradient-magnitude proxy ranking of harmful samples
//! 4. **Trigger** — per-modality backdoor pattern scans (image corner
//!    patches, token triggers, extreme tabular cells)
//!
//! Detectors are pure functions of (dataset, config, seed); the
//! orchestrator runs them in parallel, isolates per-method failures, and
//! merges the survivors into one verdict.

pub mod activation;
pub mod clustering;
pub mod engine;
pub mod influence;
pub mod spectral;
pub mod trigger;

pub use clustering::ClusteringDetector;
pub use engine::DetectionEngine;
pub use influence::InfluenceEstimator;
pub use spectral::SpectralDetector;
pub use trigger::TriggerDetector;
