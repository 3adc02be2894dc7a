//! Property-based tests for the Strategy Selection Engine
//!
//! Tests invariants:
//! - Primary never appears among the backups
//! - Backups contain no duplicates
//! - Every chosen provider is available and in its family
//! - Same request yields the same strategy

use proptest::prelude::*;
use proptest::sample::subsequence;

use crate::core::request::ContentRequest;
use crate::core::strategy::{ProviderFamily, ProviderId, ProviderRegistry, StrategySelector};
use crate::tests::common::{fractions_request, parables_request};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

fn arb_subject() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Math".to_string()),
        Just("AP Calculus".to_string()),
        Just("Earth Science".to_string()),
        Just("US History".to_string()),
        Just("Civics".to_string()),
        Just("Bible Studies".to_string()),
        Just("Language Arts".to_string()),
        Just("Art".to_string()),
        "[A-Za-z ]{0,20}",
    ]
}

fn arb_topic() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Introduction to Fractions".to_string()),
        Just("The 2024 Election".to_string()),
        Just("Research Project on Volcanoes".to_string()),
        Just("Drawing Shapes".to_string()),
        Just("Budgeting Money".to_string()),
        Just("Lab Simulation".to_string()),
        "[A-Za-z0-9 ]{0,40}",
    ]
}

fn arb_style() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("engaging".to_string()),
        Just("interactive game".to_string()),
        Just("formal".to_string()),
        Just("hands-on".to_string()),
    ]
}

fn arb_request() -> impl Strategy<Value = ContentRequest> {
    (0u8..=20, arb_subject(), arb_topic(), arb_style(), 0u32..=40).prop_map(
        |(grade, subject, topic, style, count)| {
            ContentRequest::new(grade, subject, topic)
                .with_style(style)
                .with_problem_count(count)
        },
    )
}

/// Registries with at least one generation provider.
fn arb_registry() -> impl Strategy<Value = ProviderRegistry> {
    let all = ProviderId::ALL.to_vec();
    (subsequence(all.clone(), 0..=all.len()), 0usize..4).prop_map(|(mut enabled, g)| {
        let generation = ProviderRegistry::all().generation_providers();
        enabled.push(generation[g]);
        ProviderRegistry::with_enabled(enabled)
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Primary never appears among the backups, which are unique
    #[test]
    fn prop_backup_excludes_primary_without_duplicates(request in arb_request()) {
        let strategy = StrategySelector::default().select_strategy(&request).unwrap();

        prop_assert!(!strategy.backup.contains(&strategy.primary));
        let mut sorted = strategy.backup.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), strategy.backup.len());
    }

    /// Property: Every chosen provider is available and in its family
    #[test]
    fn prop_strategy_respects_registry(request in arb_request(), registry in arb_registry()) {
        let selector = StrategySelector::new(registry.clone());
        let strategy = selector.select_strategy(&request).unwrap();

        prop_assert!(strategy.validate(&registry).is_ok(), "{:?}", strategy);
        prop_assert_eq!(strategy.primary.family(), ProviderFamily::Generation);
        prop_assert_eq!(
            strategy.generation_chain().len(),
            registry.generation_providers().len()
        );
    }

    /// Property: Same request yields the same strategy
    #[test]
    fn prop_selection_is_deterministic(request in arb_request()) {
        let first = StrategySelector::default().select_strategy(&request).unwrap();
        let second = StrategySelector::default().select_strategy(&request.clone()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: Analysis ignores subject and topic case
    #[test]
    fn prop_analysis_is_case_insensitive(request in arb_request()) {
        let mut shouted = request.clone();
        shouted.subject = shouted.subject.to_uppercase();
        shouted.topic = shouted.topic.to_uppercase();
        shouted.style = shouted.style.to_uppercase();

        let selector = StrategySelector::default();
        prop_assert_eq!(selector.analyze(&request), selector.analyze(&shouted));
    }
}

#[test]
fn reference_requests_pass_validation() {
    let selector = StrategySelector::default();
    for request in [fractions_request(), parables_request()] {
        let strategy = selector.select_strategy(&request).unwrap();
        assert!(strategy.validate(selector.registry()).is_ok());
    }
}
