use crate::models::DetectionMethod;

/// Errors surfaced by the screening pipeline.
///
/// `InvalidInput` and `InvalidConfig` always propagate to the caller;
/// `DetectorFailed` is recovered by the orchestrator into a diagnostic
/// entry on the aggregate result and never aborts the other detectors.
#[derive(Debug, thiserror::Error)]
pub enum SieveError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("invalid configuration for {parameter}: {reason}")]
    InvalidConfig { parameter: String, reason: String },

    #[error("detector {method:?} failed: {reason}")]
    DetectorFailed {
        method: DetectionMethod,
        reason: String,
    },
}

impl SieveError {
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub fn invalid_config(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    pub fn detector_failed(method: DetectionMethod, reason: impl Into<String>) -> Self {
        Self::DetectorFailed {
            method,
            reason: reason.into(),
        }
    }
}

pub type SieveResult<T> = Result<T, SieveError>;
