//! Weighted combination of the factor vector into a 0–100 score.

use datasieve_core::config::RiskWeights;
use datasieve_core::models::RiskFactors;

/// `100 · Σ wᵢ·fᵢ`, clamped to [0, 100].
pub fn collapse_risk_score(factors: &RiskFactors, weights: &RiskWeights) -> f64 {
    let weighted = weights.overfit_potential * factors.overfit_potential
        + weights.representation_collapse * factors.representation_collapse
        + weights.class_boundary_distortion * factors.class_boundary_distortion
        + weights.poisoning_density * factors.poisoning_density
        + weights.trigger_confidence * factors.trigger_confidence;
    (100.0 * weighted).clamp(0.0, 100.0)
}
