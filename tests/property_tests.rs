//! Property-based tests for selection invariants
//!
//! - The primary outcome's name is always the control name or a registered
//!   candidate name, for any probability and candidate set.
//! - A comparative run records exactly the registered candidates.
//! - Run with ProptestConfig::with_cases(100)

use proptest::prelude::*;

use contender::{Experiment, ExperimentBuilder, CONTROL_NAME};

// ============================================================================
// Generators
// ============================================================================

/// Unique candidate names; the alphabet cannot spell the reserved name.
fn arb_candidate_names() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::hash_set("[a-d]{1,8}", 1..5).prop_map(|set| set.into_iter().collect())
}

fn builder_with_candidates(names: &[String]) -> ExperimentBuilder<usize> {
    let mut builder = Experiment::builder(|| Ok(0));
    for (index, name) in names.iter().enumerate() {
        let value = index + 1;
        builder = builder
            .candidate(name.clone(), move || Ok(value))
            .expect("generated names are unique and never reserved");
    }
    builder
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_weighted_primary_name_is_in_valid_set(
        names in arb_candidate_names(),
        control_probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let experiment = builder_with_candidates(&names)
            .random_weighted(control_probability)
            .unwrap()
            .rng_seed(seed)
            .build()
            .unwrap();

        let result = experiment.run().unwrap();
        let primary = result.behavior_name();
        prop_assert!(primary == CONTROL_NAME || names.iter().any(|name| name == primary));
    }

    #[test]
    fn prop_weighted_selects_exactly_one_value(
        names in arb_candidate_names(),
        control_probability in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let experiment = builder_with_candidates(&names)
            .random_weighted(control_probability)
            .unwrap()
            .rng_seed(seed)
            .build()
            .unwrap();

        let result = experiment.run().unwrap();
        // Control yields 0, candidate i yields i + 1; the value and the
        // name always agree.
        let value = *result.value();
        if result.behavior_name() == CONTROL_NAME {
            prop_assert_eq!(value, 0);
        } else {
            prop_assert_eq!(names[value - 1].as_str(), result.behavior_name());
        }
        prop_assert!(result.candidate_results().is_empty());
    }

    #[test]
    fn prop_comparative_records_exactly_the_registered_candidates(
        names in arb_candidate_names(),
        seed in any::<u64>(),
    ) {
        let experiment = builder_with_candidates(&names)
            .comparative()
            .unwrap()
            .rng_seed(seed)
            .build()
            .unwrap();

        let result = experiment.run().unwrap();

        prop_assert_eq!(*result.value(), 0);
        prop_assert_eq!(result.behavior_name(), CONTROL_NAME);
        prop_assert_eq!(result.candidate_results().len(), names.len());
        for (index, name) in names.iter().enumerate() {
            let outcome = &result.candidate_results()[name];
            prop_assert_eq!(outcome.value(), Some(&(index + 1)));
        }
    }

    #[test]
    fn prop_selector_choice_is_honored(
        names in arb_candidate_names(),
        pick in any::<proptest::sample::Index>(),
    ) {
        let chosen = names[pick.index(names.len())].clone();
        let selected = chosen.clone();
        let experiment = builder_with_candidates(&names)
            .custom_selector(move |_, _| selected.clone())
            .unwrap()
            .build()
            .unwrap();

        let result = experiment.run().unwrap();
        prop_assert_eq!(result.behavior_name(), chosen.as_str());
    }
}
