// Unit tests for the casting matching engine

use casting_match::core::{
    criteria::{Bounds, Criteria},
    factors::{demographics_score, geographic_score, physical_score, professional_score, specialized_score},
    scoring::calculate_match_score,
    weights::validate_weights,
    AdminAllowList, MatchError, WeightManager,
};
use casting_match::models::{Candidate, Casting, MatchingWeights, SearchFilters};
use std::collections::BTreeSet;
use std::sync::Arc;

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn almaty_model() -> Candidate {
    Candidate {
        id: "m1".to_string(),
        display_name: "Dana".to_string(),
        gender: Some("female".to_string()),
        age: Some(25),
        city: Some("Almaty".to_string()),
        height_cm: Some(170.0),
        weight_kg: Some(55.0),
        experience_years: Some(3),
        rating: Some(4.1),
        categories: set(&["fashion"]),
        languages: BTreeSet::new(),
        is_public: true,
    }
}

fn all_factor_scores(candidate: &Candidate, criteria: &Criteria) -> [f64; 5] {
    [
        demographics_score(candidate, criteria),
        physical_score(candidate, criteria),
        professional_score(candidate, criteria),
        geographic_score(candidate, criteria),
        specialized_score(candidate, criteria),
    ]
}

#[test]
fn test_demographics_scenario_three_of_three() {
    let criteria = Criteria::from_filters(&SearchFilters {
        gender: Some("female".to_string()),
        age_min: Some(20.0),
        age_max: Some(30.0),
        city: Some("Almaty".to_string()),
        ..SearchFilters::default()
    });

    assert_eq!(demographics_score(&almaty_model(), &criteria), 100.0);
}

#[test]
fn test_specialized_scenario_one_of_two_categories() {
    let criteria = Criteria::from_filters(&SearchFilters {
        categories: vec!["fashion".to_string(), "sport".to_string()],
        languages: vec![],
        ..SearchFilters::default()
    });

    // categories counted (1/2 * 60), languages unconstrained and not added
    assert_eq!(specialized_score(&almaty_model(), &criteria), 30.0);
}

#[test]
fn test_unconstrained_criteria_every_factor_full() {
    let scores = all_factor_scores(&almaty_model(), &Criteria::default());
    assert_eq!(scores, [100.0; 5]);
}

#[test]
fn test_unconstrained_composite_full_for_valid_weights() {
    let weight_sets = [
        MatchingWeights::default(),
        MatchingWeights { demographics: 0.2, physical: 0.2, professional: 0.2, geographic: 0.2, specialized: 0.2 },
        MatchingWeights { demographics: 0.0, physical: 0.5, professional: 0.0, geographic: 0.5, specialized: 0.0 },
        MatchingWeights { demographics: 0.1, physical: 0.1, professional: 0.1, geographic: 0.1, specialized: 0.605 },
    ];

    for weights in weight_sets {
        assert!(validate_weights(&weights).is_ok());
        let breakdown = calculate_match_score(&almaty_model(), &Criteria::default(), &weights);
        assert_eq!(breakdown.total, 100.0, "weights {:?}", weights);
    }
}

#[test]
fn test_scores_bounded_across_variations() {
    let criteria_variants = vec![
        Criteria::default(),
        Criteria::from_posting(&Casting {
            id: "c1".to_string(),
            city: Some("Astana".to_string()),
            gender: Some("male".to_string()),
            age_min: Some(30),
            age_max: Some(40),
            height_min: Some(180),
            height_max: Some(195),
            weight_min: Some(70),
            weight_max: Some(90),
            categories: vec!["sport".to_string(), "fitness".to_string()],
            languages: vec!["english".to_string()],
            ..Casting::default()
        }),
        Criteria {
            categories: set(&["fashion"]),
            languages: set(&["kazakh", "russian"]),
            ..Criteria::default()
        },
    ];

    let mut sparse = almaty_model();
    sparse.age = None;
    sparse.height_cm = None;
    sparse.rating = None;
    sparse.categories.clear();

    let candidates = vec![almaty_model(), sparse, Candidate { id: "blank".to_string(), ..Candidate::default() }];

    for criteria in &criteria_variants {
        for candidate in &candidates {
            for score in all_factor_scores(candidate, criteria) {
                assert!((0.0..=100.0).contains(&score));
            }
            let total = calculate_match_score(candidate, criteria, &MatchingWeights::default()).total;
            assert!((0.0..=100.0).contains(&total));
        }
    }
}

#[test]
fn test_posting_height_units_converted() {
    let casting = Casting {
        id: "c1".to_string(),
        height_min: Some(170),
        height_max: Some(170),
        ..Casting::default()
    };

    let criteria = Criteria::from_posting(&casting);

    assert_eq!(criteria.height_cm, Bounds::new(Some(170.0), Some(170.0)));
    assert_eq!(physical_score(&almaty_model(), &criteria), 100.0);
}

#[test]
fn test_weight_update_sum_rules() {
    let manager = WeightManager::with_default_weights(Arc::new(AdminAllowList::new(["root"])));

    let short = MatchingWeights { demographics: 0.2, physical: 0.2, professional: 0.2, geographic: 0.2, specialized: 0.1 };
    assert!(matches!(manager.update_weights("root", short), Err(MatchError::InvalidArgument(_))));

    let even = MatchingWeights { demographics: 0.2, physical: 0.2, professional: 0.2, geographic: 0.2, specialized: 0.2 };
    assert!(manager.update_weights("root", even).is_ok());
    assert_eq!(manager.weights(), even);
}

#[test]
fn test_weight_update_permission_checked_before_sum() {
    let manager = WeightManager::with_default_weights(Arc::new(AdminAllowList::new(["root"])));
    let short = MatchingWeights { demographics: 0.2, physical: 0.2, professional: 0.2, geographic: 0.2, specialized: 0.1 };

    assert!(matches!(manager.update_weights("guest", short), Err(MatchError::PermissionDenied(_))));
}

#[test]
fn test_weight_snapshot_shared_across_threads() {
    let manager = Arc::new(WeightManager::with_default_weights(Arc::new(AdminAllowList::new(["root"]))));
    let even = MatchingWeights { demographics: 0.2, physical: 0.2, professional: 0.2, geographic: 0.2, specialized: 0.2 };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let manager = manager.clone();
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    let w = manager.weights();
                    // never a mix of the two snapshots
                    assert!(w == MatchingWeights::default() || w == even);
                }
            })
        })
        .collect();

    manager.update_weights("root", even).unwrap();

    for reader in readers {
        reader.join().unwrap();
    }
}
