use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::{SieveError, SieveResult};

/// Weights combining the five risk factors; must sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub overfit_potential: f64,
    pub representation_collapse: f64,
    pub class_boundary_distortion: f64,
    pub poisoning_density: f64,
    pub trigger_confidence: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            overfit_potential: defaults::DEFAULT_WEIGHT_OVERFIT,
            representation_collapse: defaults::DEFAULT_WEIGHT_REPRESENTATION,
            class_boundary_distortion: defaults::DEFAULT_WEIGHT_BOUNDARY,
            poisoning_density: defaults::DEFAULT_WEIGHT_POISONING,
            trigger_confidence: defaults::DEFAULT_WEIGHT_TRIGGER,
        }
    }
}

impl RiskWeights {
    pub fn sum(&self) -> f64 {
        self.overfit_potential
            + self.representation_collapse
            + self.class_boundary_distortion
            + self.poisoning_density
            + self.trigger_confidence
    }

    pub fn validate(&self) -> SieveResult<()> {
        for (name, w) in [
            ("risk.weights.overfit_potential", self.overfit_potential),
            (
                "risk.weights.representation_collapse",
                self.representation_collapse,
            ),
            (
                "risk.weights.class_boundary_distortion",
                self.class_boundary_distortion,
            ),
            ("risk.weights.poisoning_density", self.poisoning_density),
            ("risk.weights.trigger_confidence", self.trigger_confidence),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(SieveError::invalid_config(
                    name,
                    "must be a non-negative finite number",
                ));
            }
        }
        if (self.sum() - 1.0).abs() > 1e-9 {
            return Err(SieveError::invalid_config(
                "risk.weights",
                format!("must sum to 1.0, got {}", self.sum()),
            ));
        }
        Ok(())
    }
}

/// Per-factor thresholds above which a recommendation is emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWarnThresholds {
    pub overfit_potential: f64,
    pub representation_collapse: f64,
    pub class_boundary_distortion: f64,
    pub poisoning_density: f64,
    pub trigger_confidence: f64,
}

impl Default for RiskWarnThresholds {
    fn default() -> Self {
        Self {
            overfit_potential: defaults::DEFAULT_WARN_OVERFIT,
            representation_collapse: defaults::DEFAULT_WARN_REPRESENTATION,
            class_boundary_distortion: defaults::DEFAULT_WARN_BOUNDARY,
            poisoning_density: defaults::DEFAULT_WARN_POISONING,
            trigger_confidence: defaults::DEFAULT_WARN_TRIGGER,
        }
    }
}

/// Risk engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    pub weights: RiskWeights,
    pub warn: RiskWarnThresholds,
}

impl RiskConfig {
    pub fn validate(&self) -> SieveResult<()> {
        self.weights.validate()?;
        for (name, t) in [
            ("risk.warn.overfit_potential", self.warn.overfit_potential),
            (
                "risk.warn.representation_collapse",
                self.warn.representation_collapse,
            ),
            (
                "risk.warn.class_boundary_distortion",
                self.warn.class_boundary_distortion,
            ),
            ("risk.warn.poisoning_density", self.warn.poisoning_density),
            ("risk.warn.trigger_confidence", self.warn.trigger_confidence),
        ] {
            if !(0.0..=1.0).contains(&t) {
                return Err(SieveError::invalid_config(name, "must be in [0, 1]"));
            }
        }
        Ok(())
    }
}
