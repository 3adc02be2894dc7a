//! Workflow State
//!
//! The only mutable object in the system, handled as a value: every
//! transition takes `&self` and returns the next state.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{
    BasicInfoData, CustomizationData, FaithIntegrationData, FinalReviewData, GenerationRequest,
    StepData, TemplateData, TopicData, WorkflowError, WorkflowStep,
};
use super::validation::validate_step;

/// Latest payload stored for each step, valid or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecords {
    pub basic_info: Option<BasicInfoData>,
    pub topic: Option<TopicData>,
    pub faith_integration: Option<FaithIntegrationData>,
    pub customization: Option<CustomizationData>,
    pub template: Option<TemplateData>,
    pub final_review: Option<FinalReviewData>,
}

impl StepRecords {
    fn store(&mut self, data: StepData) {
        match data {
            StepData::BasicInfo(d) => self.basic_info = Some(d),
            StepData::Topic(d) => self.topic = Some(d),
            StepData::FaithIntegration(d) => self.faith_integration = Some(d),
            StepData::Customization(d) => self.customization = Some(d),
            StepData::Template(d) => self.template = Some(d),
            StepData::FinalReview(d) => self.final_review = Some(d),
        }
    }
}

/// Progress summary for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowProgress {
    pub total_steps: usize,
    pub completed_steps: usize,
    /// Percent complete (0-100)
    pub percent: u8,
    /// Titles of steps still incomplete, in flow order
    pub incomplete_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub current_step: WorkflowStep,
    pub completed_steps: BTreeSet<WorkflowStep>,
    pub data: StepRecords,
    /// Validation messages for steps whose stored data is invalid
    pub errors: BTreeMap<WorkflowStep, Vec<String>>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowState {
    /// Fresh workflow positioned at step 1.
    pub fn new() -> Self {
        Self {
            current_step: WorkflowStep::BasicInfo,
            completed_steps: BTreeSet::new(),
            data: StepRecords::default(),
            errors: BTreeMap::new(),
        }
    }

    /// Store a step's data and re-validate that step.
    ///
    /// Data is stored either way; the step counts as complete only when
    /// validation reports no errors.
    pub fn update_step(&self, data: StepData) -> Self {
        let mut next = self.clone();
        let step = data.step();
        let errors = validate_step(&data);
        next.data.store(data);

        if errors.is_empty() {
            next.completed_steps.insert(step);
            next.errors.remove(&step);
        } else {
            tracing::debug!(step = %step, errors = errors.len(), "Step data failed validation");
            next.completed_steps.remove(&step);
            next.errors.insert(step, errors);
        }
        next
    }

    /// Move to step `n` (1-6).
    pub fn navigate_to_step(&self, n: u8) -> Result<Self, WorkflowError> {
        let step = WorkflowStep::from_number(n).ok_or(WorkflowError::InvalidStep(n))?;
        Ok(self.navigate_to(step))
    }

    pub fn navigate_to(&self, step: WorkflowStep) -> Self {
        Self {
            current_step: step,
            ..self.clone()
        }
    }

    /// Advance one step, staying put on the last.
    pub fn next_step(&self) -> Self {
        self.navigate_to(self.current_step.next().unwrap_or(self.current_step))
    }

    /// Go back one step, staying put on the first.
    pub fn previous_step(&self) -> Self {
        self.navigate_to(self.current_step.previous().unwrap_or(self.current_step))
    }

    pub fn is_step_completed(&self, step: WorkflowStep) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn step_errors(&self, step: WorkflowStep) -> &[String] {
        self.errors.get(&step).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Steps not yet complete, in flow order.
    pub fn incomplete_steps(&self) -> Vec<WorkflowStep> {
        WorkflowStep::ALL
            .into_iter()
            .filter(|s| !self.completed_steps.contains(s))
            .collect()
    }

    /// True once all six steps are complete.
    pub fn is_valid(&self) -> bool {
        self.completed_steps.len() == WorkflowStep::COUNT
    }

    pub fn get_progress(&self) -> WorkflowProgress {
        let total_steps = WorkflowStep::COUNT;
        let completed = self.completed_steps.len();
        WorkflowProgress {
            total_steps,
            completed_steps: completed,
            percent: ((completed as f32 / total_steps as f32) * 100.0) as u8,
            incomplete_steps: self
                .incomplete_steps()
                .into_iter()
                .map(|s| s.title().to_string())
                .collect(),
        }
    }

    /// Merge all step payloads into a request with a fresh id and timestamp.
    pub fn build_generation_request(&self) -> Result<GenerationRequest, WorkflowError> {
        let not_ready = || WorkflowError::NotReady {
            incomplete: self.incomplete_steps(),
        };
        if !self.is_valid() {
            return Err(not_ready());
        }

        match &self.data {
            StepRecords {
                basic_info: Some(basic_info),
                topic: Some(topic),
                faith_integration: Some(faith_integration),
                customization: Some(customization),
                template: Some(template),
                final_review: Some(final_review),
            } => Ok(GenerationRequest {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                basic_info: basic_info.clone(),
                topic: topic.clone(),
                faith_integration: faith_integration.clone(),
                customization: customization.clone(),
                template: template.clone(),
                final_review: final_review.clone(),
            }),
            _ => Err(not_ready()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::adaptation::IntensityLevel;
    use crate::core::request::ContentRequest;

    fn basic_info(grade_level: u8) -> StepData {
        StepData::BasicInfo(BasicInfoData {
            grade_level,
            subject: "Math".to_string(),
            estimated_minutes: 45,
        })
    }

    fn all_steps() -> Vec<StepData> {
        vec![
            basic_info(3),
            StepData::Topic(TopicData {
                topic: "Introduction to Fractions".to_string(),
                learning_objectives: vec!["Compare simple fractions".to_string()],
                keywords: vec!["halves".to_string()],
            }),
            StepData::FaithIntegration(FaithIntegrationData {
                level: 1,
                denomination: Some("Lutheran".to_string()),
                scripture_translation: None,
            }),
            StepData::Customization(CustomizationData {
                difficulty: "easy".to_string(),
                style: "engaging".to_string(),
                problem_count: 5,
                include_answer_key: true,
            }),
            StepData::Template(TemplateData {
                template_id: "worksheet-basic".to_string(),
                name: "Basic Worksheet".to_string(),
                category: "worksheet".to_string(),
            }),
            StepData::FinalReview(FinalReviewData {
                title: "Fraction Fun".to_string(),
                notes: None,
            }),
        ]
    }

    fn completed() -> WorkflowState {
        all_steps()
            .into_iter()
            .fold(WorkflowState::new(), |state, data| state.update_step(data))
    }

    #[test]
    fn test_new_state() {
        let state = WorkflowState::new();
        assert_eq!(state.current_step, WorkflowStep::BasicInfo);
        assert!(!state.is_valid());
        assert_eq!(state.get_progress().percent, 0);
        assert_eq!(state.get_progress().incomplete_steps.len(), 6);
    }

    #[test]
    fn test_update_valid_step() {
        let state = WorkflowState::new().update_step(basic_info(3));
        assert!(state.is_step_completed(WorkflowStep::BasicInfo));
        assert!(state.step_errors(WorkflowStep::BasicInfo).is_empty());
    }

    #[test]
    fn test_invalid_update_stores_data_and_unmarks() {
        let state = WorkflowState::new().update_step(basic_info(3));
        let state = state.update_step(basic_info(13));

        assert!(!state.is_step_completed(WorkflowStep::BasicInfo));
        assert_eq!(state.step_errors(WorkflowStep::BasicInfo).len(), 1);
        assert_eq!(state.data.basic_info.as_ref().map(|d| d.grade_level), Some(13));

        let fixed = state.update_step(basic_info(12));
        assert!(fixed.is_step_completed(WorkflowStep::BasicInfo));
        assert!(fixed.step_errors(WorkflowStep::BasicInfo).is_empty());
    }

    #[test]
    fn test_transitions_do_not_mutate() {
        let original = WorkflowState::new();
        let updated = original.update_step(basic_info(3)).next_step();
        assert_eq!(original, WorkflowState::new());
        assert_eq!(updated.current_step, WorkflowStep::Topic);
    }

    #[test]
    fn test_navigation_clamps() {
        let state = WorkflowState::new();
        assert_eq!(state.previous_step().current_step, WorkflowStep::BasicInfo);

        let last = state.navigate_to_step(6).unwrap();
        assert_eq!(last.next_step().current_step, WorkflowStep::FinalReview);
        assert_eq!(last.previous_step().current_step, WorkflowStep::Template);
    }

    #[test]
    fn test_navigate_out_of_range() {
        let state = WorkflowState::new();
        assert_eq!(state.navigate_to_step(0), Err(WorkflowError::InvalidStep(0)));
        assert_eq!(state.navigate_to_step(7), Err(WorkflowError::InvalidStep(7)));
        assert_eq!(state.navigate_to_step(4).unwrap().current_step, WorkflowStep::Customization);
    }

    #[test]
    fn test_steps_complete_in_any_order() {
        let state = all_steps()
            .into_iter()
            .rev()
            .fold(WorkflowState::new(), |state, data| state.update_step(data));
        assert!(state.is_valid());
    }

    #[test]
    fn test_build_fails_until_all_six() {
        let steps = all_steps();
        let mut state = WorkflowState::new();
        for (i, data) in steps.into_iter().enumerate() {
            match state.build_generation_request() {
                Err(WorkflowError::NotReady { incomplete }) => assert_eq!(incomplete.len(), 6 - i),
                other => panic!("expected NotReady, got {other:?}"),
            }
            state = state.update_step(data);
        }
        assert!(state.build_generation_request().is_ok());
    }

    #[test]
    fn test_build_generation_request() {
        let state = completed();
        let progress = state.get_progress();
        assert_eq!(progress.percent, 100);
        assert!(progress.incomplete_steps.is_empty());

        let first = state.build_generation_request().unwrap();
        let second = state.build_generation_request().unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.final_review.title, "Fraction Fun");

        let content = ContentRequest::from(&first);
        assert_eq!(content.grade_level, 3);
        assert_eq!(content.style, "engaging");
        assert_eq!(content.problem_count, 5);
        assert_eq!(content.intensity_level, IntensityLevel::Values);
        assert_eq!(content.profile_key.as_deref(), Some("Lutheran"));
    }

    #[test]
    fn test_progress_percent() {
        let state = WorkflowState::new()
            .update_step(basic_info(3))
            .update_step(all_steps().remove(1));
        let progress = state.get_progress();
        assert_eq!(progress.completed_steps, 2);
        assert_eq!(progress.percent, 33);
        assert_eq!(progress.incomplete_steps[0], "Faith Integration");
    }

    #[test]
    fn test_state_serde_roundtrip() {
        let state = completed().update_step(basic_info(0)).navigate_to(WorkflowStep::Template);
        let json = serde_json::to_string(&state).unwrap();
        let restored: WorkflowState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
        assert!(json.contains("\"basic_info\""));
    }

    #[test]
    fn test_step_data_tagging() {
        let json = serde_json::to_value(basic_info(4)).unwrap();
        assert_eq!(json["step"], "basic_info");
        assert_eq!(json["data"]["grade_level"], 4);
    }
}
