//! Deterministic, ordered guidance strings for a risk assessment.

use datasieve_core::config::RiskWarnThresholds;
use datasieve_core::models::{RiskFactors, RiskLevel};

/// Build the recommendation list: a mandatory warning for High/Critical
/// verdicts first, then one line per factor above its warning threshold
/// in fixed factor order, and a single healthy line when nothing fires.
pub fn build(level: RiskLevel, factors: &RiskFactors, warn: &RiskWarnThresholds) -> Vec<String> {
    let mut lines = Vec::new();

    if level >= RiskLevel::High {
        lines.push(
            "Do not train on this dataset until the flagged issues are resolved.".to_string(),
        );
    }

    if factors.overfit_potential > warn.overfit_potential {
        lines.push(
            "Overfit potential is high: collect more samples or reduce feature dimensionality."
                .to_string(),
        );
    }
    if factors.representation_collapse > warn.representation_collapse {
        lines.push(
            "Feature representation is collapsing: drop constant columns and decorrelate inputs."
                .to_string(),
        );
    }
    if factors.class_boundary_distortion > warn.class_boundary_distortion {
        lines.push(
            "Class boundaries are blurred: audit labels near cluster overlaps before training."
                .to_string(),
        );
    }
    if factors.poisoning_density > warn.poisoning_density {
        lines.push(
            "A substantial fraction of samples is suspected poisoned: cleanse before training."
                .to_string(),
        );
    }
    if factors.trigger_confidence > warn.trigger_confidence {
        lines.push(
            "Backdoor trigger patterns were detected: remove the implicated samples.".to_string(),
        );
    }

    if lines.is_empty() {
        lines.push("Dataset statistics look healthy; no action required.".to_string());
    }
    lines
}
