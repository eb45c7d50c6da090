//! The risk engine: factors, score, verdict, recommendations.

use tracing::info;

use datasieve_core::config::RiskConfig;
use datasieve_core::dataset::Dataset;
use datasieve_core::errors::SieveResult;
use datasieve_core::models::{
    PoisoningInfo, RiskAssessment, RiskDetails, RiskFactors, RiskLevel,
};

use crate::factors;
use crate::formula;
use crate::recommendations;

pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Assess training risk for a dataset, folding in detector evidence
    /// when available.
    pub fn assess(
        &self,
        dataset: &Dataset,
        poisoning: Option<&PoisoningInfo>,
    ) -> SieveResult<RiskAssessment> {
        self.config.validate()?;

        let risk_factors = RiskFactors {
            overfit_potential: factors::overfit_potential(dataset),
            representation_collapse: factors::representation_collapse(dataset),
            class_boundary_distortion: factors::class_boundary_distortion(dataset),
            poisoning_density: factors::poisoning_density(dataset.n_samples(), poisoning),
            trigger_confidence: factors::trigger_confidence(poisoning),
        };

        let collapse_risk_score = formula::collapse_risk_score(&risk_factors, &self.config.weights);
        let risk_level = RiskLevel::from_score(collapse_risk_score);
        info!(
            score = collapse_risk_score,
            level = ?risk_level,
            "risk assessment complete"
        );

        Ok(RiskAssessment {
            collapse_risk_score,
            risk_level,
            risk_factors,
            recommendations: recommendations::build(risk_level, &risk_factors, &self.config.warn),
            details: RiskDetails {
                n_samples: dataset.n_samples(),
                n_classes: dataset.n_classes(),
                dim: dataset.dim(),
            },
        })
    }
}

impl Default for RiskEngine {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasieve_core::dataset::Modality;
    use std::collections::BTreeSet;

    fn separated_dataset() -> Dataset {
        let mut features = Vec::new();
        let mut labels = Vec::new();
        for i in 0..100 {
            let class = i % 2;
            let offset = class as f64 * 20.0;
            features.push(vec![
                offset + 0.5 * ((i % 7) as f64 - 3.0),
                offset + 0.5 * ((i % 5) as f64 - 2.0),
            ]);
            labels.push(class);
        }
        Dataset::new(features, labels, Modality::Tabular).unwrap()
    }

    #[test]
    fn separated_data_without_evidence_is_low_risk() {
        let assessment = RiskEngine::default().assess(&separated_dataset(), None).unwrap();
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.risk_factors.poisoning_density, 0.0);
        assert_eq!(assessment.risk_factors.trigger_confidence, 0.0);
        assert_eq!(assessment.details.n_samples, 100);
    }

    #[test]
    fn detector_evidence_raises_the_verdict() {
        let ds = separated_dataset();
        let engine = RiskEngine::default();
        let clean = engine.assess(&ds, None).unwrap();

        let info = PoisoningInfo {
            suspected_indices: (0..30).collect::<BTreeSet<_>>(),
            trigger_score: 80.0,
        };
        let poisoned = engine.assess(&ds, Some(&info)).unwrap();
        assert!(poisoned.collapse_risk_score > clean.collapse_risk_score);
        // Density saturates (30% of 100) and the trigger factor is 0.8:
        // at least 25 + 8 points above the clean baseline.
        assert!(poisoned.collapse_risk_score - clean.collapse_risk_score >= 32.9);
    }

    #[test]
    fn high_risk_assessment_warns_against_training() {
        let ds = separated_dataset();
        let info = PoisoningInfo {
            suspected_indices: (0..90).collect::<BTreeSet<_>>(),
            trigger_score: 100.0,
        };
        let assessment = RiskEngine::default().assess(&ds, Some(&info)).unwrap();
        assert!(assessment.risk_level >= RiskLevel::Medium);
        if assessment.risk_level >= RiskLevel::High {
            assert!(assessment.recommendations[0].starts_with("Do not train"));
        }
        assert!(!assessment.recommendations.is_empty());
    }

    #[test]
    fn scores_stay_in_range() {
        let assessment = RiskEngine::default().assess(&separated_dataset(), None).unwrap();
        assert!((0.0..=100.0).contains(&assessment.collapse_risk_score));
    }
}
