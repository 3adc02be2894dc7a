//! Property-based tests for the Content Creation Workflow
//!
//! Tests invariants:
//! - A step is complete exactly when its stored data validates
//! - A request can be built exactly when every step is complete
//! - Navigation accepts only steps 1 through 6
//! - Transitions never change the state they were called on

use proptest::prelude::*;

use crate::core::workflow::validation::validate_step;
use crate::core::workflow::{
    BasicInfoData, CustomizationData, FaithIntegrationData, FinalReviewData, StepData,
    TemplateData, TopicData, WorkflowError, WorkflowState, WorkflowStep,
};
use crate::tests::common::{completed_workflow, valid_steps};

// ============================================================================
// Strategies for generating test inputs
// ============================================================================

/// Short strings, blank about a third of the time.
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("  ".to_string()),
        "[a-zA-Z ]{1,12}",
    ]
}

fn arb_basic_info() -> impl Strategy<Value = StepData> {
    (0u8..16, arb_text(), 0u32..240).prop_map(|(grade_level, subject, estimated_minutes)| {
        StepData::BasicInfo(BasicInfoData {
            grade_level,
            subject,
            estimated_minutes,
        })
    })
}

fn arb_topic() -> impl Strategy<Value = StepData> {
    (arb_text(), prop::collection::vec(arb_text(), 0..3)).prop_map(|(topic, objectives)| {
        StepData::Topic(TopicData {
            topic,
            learning_objectives: objectives,
            keywords: vec![],
        })
    })
}

fn arb_faith() -> impl Strategy<Value = StepData> {
    (0u8..6, prop::option::of(arb_text())).prop_map(|(level, denomination)| {
        StepData::FaithIntegration(FaithIntegrationData {
            level,
            denomination,
            scripture_translation: None,
        })
    })
}

fn arb_customization() -> impl Strategy<Value = StepData> {
    (arb_text(), arb_text(), 1u32..30, any::<bool>()).prop_map(
        |(difficulty, style, problem_count, include_answer_key)| {
            StepData::Customization(CustomizationData {
                difficulty,
                style,
                problem_count,
                include_answer_key,
            })
        },
    )
}

fn arb_template() -> impl Strategy<Value = StepData> {
    (arb_text(), arb_text(), arb_text()).prop_map(|(template_id, name, category)| {
        StepData::Template(TemplateData {
            template_id,
            name,
            category,
        })
    })
}

fn arb_final_review() -> impl Strategy<Value = StepData> {
    (arb_text(), prop::option::of(arb_text()))
        .prop_map(|(title, notes)| StepData::FinalReview(FinalReviewData { title, notes }))
}

fn arb_step_data() -> impl Strategy<Value = StepData> {
    prop_oneof![
        arb_basic_info(),
        arb_topic(),
        arb_faith(),
        arb_customization(),
        arb_template(),
        arb_final_review(),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: After any sequence of updates, completion mirrors validation
    /// of the latest payload per step
    #[test]
    fn prop_completion_matches_latest_validation(
        updates in prop::collection::vec(arb_step_data(), 0..20)
    ) {
        let mut state = WorkflowState::new();
        let mut latest: Vec<Option<StepData>> = vec![None; WorkflowStep::COUNT];

        for data in updates {
            let index = usize::from(data.step().number() - 1);
            state = state.update_step(data.clone());
            latest[index] = Some(data);
        }

        for step in WorkflowStep::ALL {
            let errors = latest[usize::from(step.number() - 1)]
                .as_ref()
                .map(validate_step);
            let valid = errors.as_ref().map_or(false, Vec::is_empty);
            prop_assert_eq!(state.is_step_completed(step), valid);

            let expected_errors = errors.unwrap_or_default();
            prop_assert_eq!(state.step_errors(step), expected_errors.as_slice());
        }
    }

    /// Property: A request builds exactly when the workflow is valid
    #[test]
    fn prop_build_iff_valid(updates in prop::collection::vec(arb_step_data(), 0..20)) {
        let state = updates
            .into_iter()
            .fold(WorkflowState::new(), |s, d| s.update_step(d));

        match state.build_generation_request() {
            Ok(_) => prop_assert!(state.is_valid()),
            Err(WorkflowError::NotReady { incomplete }) => {
                prop_assert!(!state.is_valid());
                prop_assert_eq!(incomplete, state.incomplete_steps());
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Property: Progress percent follows the completed count
    #[test]
    fn prop_progress_percent(updates in prop::collection::vec(arb_step_data(), 0..20)) {
        let state = updates
            .into_iter()
            .fold(WorkflowState::new(), |s, d| s.update_step(d));
        let progress = state.get_progress();

        prop_assert_eq!(progress.completed_steps, state.completed_steps.len());
        prop_assert_eq!(progress.completed_steps + progress.incomplete_steps.len(), 6);
        prop_assert!(progress.percent <= 100);
        prop_assert_eq!(progress.percent == 100, state.is_valid());
    }

    /// Property: Grade validity is exactly 1..=12
    #[test]
    fn prop_grade_bounds(grade in any::<u8>()) {
        let data = StepData::BasicInfo(BasicInfoData {
            grade_level: grade,
            subject: "Math".to_string(),
            estimated_minutes: 30,
        });
        prop_assert_eq!(validate_step(&data).is_empty(), (1..=12).contains(&grade));
    }

    /// Property: Navigation accepts exactly steps 1-6
    #[test]
    fn prop_navigate_bounds(n in any::<u8>()) {
        let state = completed_workflow();
        match state.navigate_to_step(n) {
            Ok(moved) => {
                prop_assert!((1..=6).contains(&n));
                prop_assert_eq!(moved.current_step.number(), n);
                prop_assert_eq!(moved.completed_steps, state.completed_steps);
            }
            Err(e) => {
                prop_assert!(!(1..=6).contains(&n));
                prop_assert_eq!(e, WorkflowError::InvalidStep(n));
            }
        }
    }

    /// Property: Transitions leave the original state untouched
    #[test]
    fn prop_transitions_are_pure(data in arb_step_data(), n in 1u8..=6) {
        let original = completed_workflow();
        let snapshot = original.clone();

        let _ = original.update_step(data);
        let _ = original.navigate_to_step(n);
        let _ = original.next_step().previous_step();

        prop_assert_eq!(original, snapshot);
    }

    /// Property: Re-submitting a valid step keeps a complete workflow valid
    #[test]
    fn prop_resubmit_valid_step(index in 0usize..6) {
        let step = valid_steps().swap_remove(index);
        let state = completed_workflow().update_step(step);
        prop_assert!(state.is_valid());
        prop_assert!(state.build_generation_request().is_ok());
    }
}
