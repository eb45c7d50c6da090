//! Poisoning density from detector evidence.

use datasieve_core::models::PoisoningInfo;

const DENSITY_GAIN: f64 = 10.0;

/// `min(1, 10 · |suspected| / N)`; zero without detector evidence.
pub fn poisoning_density(n_samples: usize, poisoning: Option<&PoisoningInfo>) -> f64 {
    match poisoning {
        Some(info) if n_samples > 0 => {
            (DENSITY_GAIN * info.suspected_indices.len() as f64 / n_samples as f64).min(1.0)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn no_evidence_means_zero() {
        assert_eq!(poisoning_density(100, None), 0.0);
    }

    #[test]
    fn density_saturates_at_one() {
        let info = PoisoningInfo {
            suspected_indices: (0..50).collect::<BTreeSet<_>>(),
            trigger_score: 0.0,
        };
        assert_eq!(poisoning_density(100, Some(&info)), 1.0);
    }

    #[test]
    fn small_suspected_sets_scale_linearly() {
        let info = PoisoningInfo {
            suspected_indices: (0..3).collect::<BTreeSet<_>>(),
            trigger_score: 0.0,
        };
        assert!((poisoning_density(100, Some(&info)) - 0.3).abs() < 1e-12);
    }
}
