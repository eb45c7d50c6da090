use serde::{Deserialize, Serialize};

/// Categorical training-safety verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Threshold mapping over a 0–100 collapse-risk score. Boundaries are
    /// exact: 25.0 is Medium, 50.0 is High, 75.0 is Critical.
    pub fn from_score(score: f64) -> Self {
        if score >= 75.0 {
            RiskLevel::Critical
        } else if score >= 50.0 {
            RiskLevel::High
        } else if score >= 25.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// The five independently computed risk factors, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RiskFactors {
    pub overfit_potential: f64,
    pub representation_collapse: f64,
    pub class_boundary_distortion: f64,
    pub poisoning_density: f64,
    pub trigger_confidence: f64,
}

/// Dataset shape summary attached to a risk assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskDetails {
    pub n_samples: usize,
    pub n_classes: usize,
    pub dim: usize,
}

/// Derived collapse-risk verdict; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Weighted factor sum scaled to [0, 100].
    pub collapse_risk_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: RiskFactors,
    /// Ordered, deterministic guidance strings.
    pub recommendations: Vec<String>,
    pub details: RiskDetails,
}
