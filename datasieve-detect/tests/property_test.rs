//! Property suites over the detector contracts.

use proptest::prelude::*;

use datasieve_core::models::DetectionMethod;
use datasieve_core::traits::Detector;
use datasieve_detect::{
    ClusteringDetector, DetectionEngine, InfluenceEstimator, SpectralDetector, TriggerDetector,
};
use test_fixtures::{generate_tabular, TabularParams};

fn detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(SpectralDetector::default()),
        Box::new(ClusteringDetector::default()),
        Box::new(InfluenceEstimator::default()),
        Box::new(TriggerDetector::default()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    // ─── Score and index bounds ──────────────────────────────────────────

    #[test]
    fn scores_and_indices_stay_in_bounds(
        seed in 0u64..500,
        n_samples in 30usize..120,
        n_classes in 2usize..5,
        poison in 0.0f64..0.2,
    ) {
        let synthetic = generate_tabular(
            TabularParams {
                n_samples,
                n_features: 8,
                n_classes,
                poison_fraction: poison,
            },
            seed,
        );
        for detector in detectors() {
            let result = detector.detect(&synthetic.dataset).unwrap();
            prop_assert!(result.poisoning_score >= 0.0);
            prop_assert!(result.poisoning_score <= 100.0);
            prop_assert!(result.suspected_indices.iter().all(|&i| i < n_samples));
            prop_assert!(result
                .confidence_scores
                .values()
                .all(|&c| (0.0..=1.0).contains(&c)));
        }
    }

    // ─── Idempotence ─────────────────────────────────────────────────────

    #[test]
    fn identical_input_gives_identical_output(seed in 0u64..500) {
        let params = TabularParams {
            n_samples: 80,
            n_features: 10,
            n_classes: 3,
            poison_fraction: 0.1,
        };
        let synthetic = generate_tabular(params, seed);
        let engine = DetectionEngine::default();
        let a = engine.run(&synthetic.dataset, &DetectionMethod::ALL, None).unwrap();
        let b = engine.run(&synthetic.dataset, &DetectionMethod::ALL, None).unwrap();
        prop_assert_eq!(a.poisoning_score, b.poisoning_score);
        prop_assert_eq!(a.suspected_indices, b.suspected_indices);
        prop_assert_eq!(a.confidence_scores, b.confidence_scores);
    }

    // ─── Clean-data quietness ────────────────────────────────────────────

    #[test]
    fn clean_data_scores_below_alert_level(seed in 0u64..30) {
        let synthetic = generate_tabular(
            TabularParams {
                n_samples: 200,
                n_features: 10,
                n_classes: 4,
                poison_fraction: 0.0,
            },
            seed,
        );
        for detector in detectors() {
            let result = detector.detect(&synthetic.dataset).unwrap();
            prop_assert!(
                result.poisoning_score < 25.0,
                "method {:?} scored {}",
                result.method,
                result.poisoning_score
            );
        }
    }

    // ─── Aggregate union ─────────────────────────────────────────────────

    #[test]
    fn aggregate_suspects_are_the_union_of_methods(seed in 0u64..100) {
        let synthetic = generate_tabular(
            TabularParams {
                n_samples: 100,
                n_features: 8,
                n_classes: 4,
                poison_fraction: 0.1,
            },
            seed,
        );
        let outcome = DetectionEngine::default()
            .run(&synthetic.dataset, &DetectionMethod::ALL, None)
            .unwrap();
        let mut union = std::collections::BTreeSet::new();
        for result in &outcome.results {
            union.extend(result.suspected_indices.iter().copied());
        }
        prop_assert_eq!(outcome.suspected_indices, union);
    }
}
