use crate::dataset::Dataset;
use crate::errors::SieveResult;
use crate::models::{DetectionMethod, DetectionResult};

/// A poisoning detector.
///
/// Implementations are pure functions of (dataset, configuration): no
/// shared mutable state, no I/O, no unseeded randomness. This is the seam
/// the orchestrator fans out over.
pub trait Detector: Send + Sync {
    fn method(&self) -> DetectionMethod;

    fn detect(&self, dataset: &Dataset) -> SieveResult<DetectionResult>;
}
