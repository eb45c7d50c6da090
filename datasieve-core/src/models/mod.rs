//! Plain structured result records exchanged with external callers.

pub mod cleansing;
pub mod detection_result;
pub mod poison;
pub mod risk_assessment;
pub mod scan_outcome;

pub use cleansing::{
    CleansingMode, CleansingResult, CleansingSummary, RelabelSuggestion, TriggerScrubResult,
};
pub use detection_result::{
    ClassDetail, DetectionMethod, DetectionResult, HarmfulSample, MethodFindings,
    MisalignedCluster, TriggerKind, TriggerPattern,
};
pub use poison::{InjectionMechanism, PoisonMetadata, PoisoningInfo};
pub use risk_assessment::{RiskAssessment, RiskDetails, RiskFactors, RiskLevel};
pub use scan_outcome::{DetectionAccuracy, DetectorDiagnostic, ScanOutcome};
