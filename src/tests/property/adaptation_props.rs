//! Property-based tests for the Content Adaptation Engine
//!
//! Tests invariants:
//! - Applying an exclude-only adaptation twice equals applying it once
//! - Level 0 output contains no faith terms
//! - Level 3 yields one explicit-doctrine rule per profile emphasis
//! - Unknown profile keys resolve to the neutral profile

use proptest::prelude::*;

use crate::core::adaptation::keywords::FAITH_TERM_RE;
use crate::core::adaptation::{
    apply_adaptation, AdaptationEngine, FilterKind, IntensityLevel, RuleKind,
};
use crate::core::profile::{ProfileCatalog, NEUTRAL_PROFILE_KEY};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Sentences mixing faith terms, scripture references, plain words and
/// punctuation.
fn arb_text() -> impl Strategy<Value = String> {
    let token = prop_oneof![
        Just("God".to_string()),
        Just("pray".to_string()),
        Just("Jesus".to_string()),
        Just("John 3:16".to_string()),
        Just("Psalm".to_string()),
        Just("3:16".to_string()),
        Just(".".to_string()),
        Just(",".to_string()),
        Just("  ".to_string()),
        "[a-zA-Z]{1,8}",
        "[0-9]{1,3}",
    ];
    prop::collection::vec(token, 0..30).prop_map(|tokens| tokens.join(" "))
}

fn arb_level() -> impl Strategy<Value = IntensityLevel> {
    prop_oneof![
        Just(IntensityLevel::Secular),
        Just(IntensityLevel::Values),
        Just(IntensityLevel::Integrated),
        Just(IntensityLevel::Explicit),
    ]
}

fn arb_profile_key() -> impl Strategy<Value = Option<String>> {
    let mut keys: Vec<Option<String>> = ProfileCatalog::builtin().keys().into_iter().map(Some).collect();
    keys.push(None);
    keys.push(Some("Not A Real Denomination".to_string()));
    prop::sample::select(keys)
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Exclude-only adaptations are idempotent
    #[test]
    fn prop_exclude_only_is_idempotent(text in arb_text(), key in arb_profile_key()) {
        let engine = AdaptationEngine::with_builtin_profiles();
        let adaptation = engine.generate_adaptation(IntensityLevel::Secular, key.as_deref());
        prop_assert!(adaptation.filters_of(FilterKind::Modify).next().is_none());

        let once = apply_adaptation(&text, &adaptation);
        let twice = apply_adaptation(&once, &adaptation);
        prop_assert_eq!(once, twice);
    }

    /// Property: Level 0 output contains no faith terms and validates
    #[test]
    fn prop_secular_output_has_no_faith_terms(text in arb_text()) {
        let engine = AdaptationEngine::with_builtin_profiles();
        let adaptation = engine.generate_adaptation(IntensityLevel::Secular, None);
        let output = apply_adaptation(&text, &adaptation);

        prop_assert!(!FAITH_TERM_RE.is_match(&output), "left faith term in {:?}", output);
        prop_assert!(engine.validate_content(&output, IntensityLevel::Secular, None).valid);
    }

    /// Property: Generation is deterministic
    #[test]
    fn prop_generation_is_deterministic(level in arb_level(), key in arb_profile_key()) {
        let engine = AdaptationEngine::with_builtin_profiles();
        prop_assert_eq!(
            engine.generate_adaptation(level, key.as_deref()),
            engine.generate_adaptation(level, key.as_deref())
        );
    }

    /// Property: Level 3 has one explicit-doctrine rule per emphasis
    #[test]
    fn prop_explicit_rule_per_emphasis(key in arb_profile_key()) {
        let engine = AdaptationEngine::with_builtin_profiles();
        let profile = engine.catalog().get(key.as_deref());
        let adaptation = engine.generate_adaptation(IntensityLevel::Explicit, key.as_deref());

        let explicit: Vec<_> = adaptation
            .rules
            .iter()
            .filter(|r| r.kind == RuleKind::ExplicitDoctrine)
            .collect();
        prop_assert_eq!(explicit.len(), profile.theological_emphases.len());
        prop_assert_eq!(&adaptation.profile_key, &profile.key);
    }

    /// Property: Level 0 never carries profile content
    #[test]
    fn prop_secular_ignores_profile(key in arb_profile_key()) {
        let engine = AdaptationEngine::with_builtin_profiles();
        let with_key = engine.generate_adaptation(IntensityLevel::Secular, key.as_deref());
        let without = engine.generate_adaptation(IntensityLevel::Secular, None);
        prop_assert_eq!(with_key.rules, without.rules);
        prop_assert_eq!(with_key.filters, without.filters);
        prop_assert_eq!(with_key.prompts, without.prompts);
    }

    /// Property: Unknown keys resolve to the neutral profile
    #[test]
    fn prop_unknown_key_is_neutral(key in "[a-z]{12,20}", level in arb_level()) {
        let engine = AdaptationEngine::with_builtin_profiles();
        let adaptation = engine.generate_adaptation(level, Some(&key));
        prop_assert_eq!(adaptation.profile_key, NEUTRAL_PROFILE_KEY);
    }
}
