//! Trigger confidence from the trigger detector's severity.

use datasieve_core::models::PoisoningInfo;

/// The trigger detector's 0–100 severity rescaled to [0, 1]; zero
/// without detector evidence.
pub fn trigger_confidence(poisoning: Option<&PoisoningInfo>) -> f64 {
    poisoning
        .map(|info| (info.trigger_score / 100.0).clamp(0.0, 1.0))
        .unwrap_or(0.0)
}
