//! Test Fixtures
//!
//! Valid step payloads and the two reference content requests.

use crate::core::adaptation::IntensityLevel;
use crate::core::request::ContentRequest;
use crate::core::workflow::{
    BasicInfoData, CustomizationData, FaithIntegrationData, FinalReviewData, StepData,
    TemplateData, TopicData, WorkflowState,
};

// =============================================================================
// Workflow Fixtures
// =============================================================================

/// One valid payload per step, in flow order.
pub fn valid_steps() -> Vec<StepData> {
    vec![
        StepData::BasicInfo(BasicInfoData {
            grade_level: 11,
            subject: "Bible Studies".to_string(),
            estimated_minutes: 50,
        }),
        StepData::Topic(TopicData {
            topic: "Modern Applications of Biblical Parables".to_string(),
            learning_objectives: vec!["Apply a parable to daily life".to_string()],
            keywords: vec!["parable".to_string(), "kingdom".to_string()],
        }),
        StepData::FaithIntegration(FaithIntegrationData {
            level: 3,
            denomination: Some("Reformed Baptist".to_string()),
            scripture_translation: Some("ESV".to_string()),
        }),
        StepData::Customization(CustomizationData {
            difficulty: "challenging".to_string(),
            style: "discussion".to_string(),
            problem_count: 4,
            include_answer_key: true,
        }),
        StepData::Template(TemplateData {
            template_id: "study-guide".to_string(),
            name: "Study Guide".to_string(),
            category: "Study Guide".to_string(),
        }),
        StepData::FinalReview(FinalReviewData {
            title: "Parables Today".to_string(),
            notes: Some("Keep questions open-ended".to_string()),
        }),
    ]
}

/// Workflow with every step completed.
pub fn completed_workflow() -> WorkflowState {
    valid_steps()
        .into_iter()
        .fold(WorkflowState::new(), |state, step| state.update_step(step))
}

// =============================================================================
// Request Fixtures
// =============================================================================

pub fn fractions_request() -> ContentRequest {
    ContentRequest::new(3, "Math", "Introduction to Fractions")
        .with_style("engaging")
        .with_problem_count(5)
        .with_intensity(IntensityLevel::Values)
}

pub fn parables_request() -> ContentRequest {
    ContentRequest::new(11, "Bible Studies", "Modern Applications of Biblical Parables")
        .with_problem_count(4)
        .with_intensity(IntensityLevel::Explicit)
        .with_profile("Reformed Baptist")
}
