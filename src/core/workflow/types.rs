//! Workflow Domain Types
//!
//! - [`WorkflowStep`]: the six steps, numbered 1 to 6
//! - [`StepData`]: per-step payload variants
//! - [`GenerationRequest`]: the merged result of a completed workflow
//! - [`WorkflowError`]: configuration errors
//!
//! # Serialization
//!
//! All types implement `Serialize` and `Deserialize` for IPC with a front end
//! and for callers that snapshot workflow state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::adaptation::IntensityLevel;
use crate::core::request::ContentRequest;

// ============================================================================
// WorkflowStep
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    BasicInfo,
    Topic,
    FaithIntegration,
    Customization,
    Template,
    FinalReview,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 6] = [
        WorkflowStep::BasicInfo,
        WorkflowStep::Topic,
        WorkflowStep::FaithIntegration,
        WorkflowStep::Customization,
        WorkflowStep::Template,
        WorkflowStep::FinalReview,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// 1-based position in the flow.
    pub fn number(self) -> u8 {
        match self {
            WorkflowStep::BasicInfo => 1,
            WorkflowStep::Topic => 2,
            WorkflowStep::FaithIntegration => 3,
            WorkflowStep::Customization => 4,
            WorkflowStep::Template => 5,
            WorkflowStep::FinalReview => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::BasicInfo => "basic_info",
            WorkflowStep::Topic => "topic",
            WorkflowStep::FaithIntegration => "faith_integration",
            WorkflowStep::Customization => "customization",
            WorkflowStep::Template => "template",
            WorkflowStep::FinalReview => "final_review",
        }
    }

    /// Name shown in progress summaries.
    pub fn title(self) -> &'static str {
        match self {
            WorkflowStep::BasicInfo => "Basic Info",
            WorkflowStep::Topic => "Topic",
            WorkflowStep::FaithIntegration => "Faith Integration",
            WorkflowStep::Customization => "Customization",
            WorkflowStep::Template => "Template",
            WorkflowStep::FinalReview => "Final Review",
        }
    }

    /// Get the next step in the flow (None if at the end)
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Get the previous step in the flow (None if at the beginning)
    pub fn previous(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// StepData - Per-Step Input
// ============================================================================

/// Per-step input data. Each variant carries the fields collected at that step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "snake_case")]
pub enum StepData {
    BasicInfo(BasicInfoData),
    Topic(TopicData),
    FaithIntegration(FaithIntegrationData),
    Customization(CustomizationData),
    Template(TemplateData),
    FinalReview(FinalReviewData),
}

impl StepData {
    /// Get the workflow step this data corresponds to
    pub fn step(&self) -> WorkflowStep {
        match self {
            StepData::BasicInfo(_) => WorkflowStep::BasicInfo,
            StepData::Topic(_) => WorkflowStep::Topic,
            StepData::FaithIntegration(_) => WorkflowStep::FaithIntegration,
            StepData::Customization(_) => WorkflowStep::Customization,
            StepData::Template(_) => WorkflowStep::Template,
            StepData::FinalReview(_) => WorkflowStep::FinalReview,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfoData {
    pub grade_level: u8,
    pub subject: String,
    pub estimated_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicData {
    pub topic: String,
    pub learning_objectives: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaithIntegrationData {
    /// Intensity level, 0 to 3
    pub level: u8,
    /// Content profile key; required above level 0
    pub denomination: Option<String>,
    #[serde(default)]
    pub scripture_translation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationData {
    pub difficulty: String,
    pub style: String,
    #[serde(default = "default_problem_count")]
    pub problem_count: u32,
    #[serde(default)]
    pub include_answer_key: bool,
}

fn default_problem_count() -> u32 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    pub template_id: String,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalReviewData {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
}

// ============================================================================
// GenerationRequest
// ============================================================================

/// Merged payloads of a fully validated workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub basic_info: BasicInfoData,
    pub topic: TopicData,
    pub faith_integration: FaithIntegrationData,
    pub customization: CustomizationData,
    pub template: TemplateData,
    pub final_review: FinalReviewData,
}

impl GenerationRequest {
    pub fn intensity_level(&self) -> IntensityLevel {
        IntensityLevel::try_from(self.faith_integration.level).unwrap_or(IntensityLevel::Secular)
    }
}

impl From<&GenerationRequest> for ContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        let level = request.intensity_level();
        let profile_key = match level {
            IntensityLevel::Secular => None,
            _ => request.faith_integration.denomination.clone(),
        };

        ContentRequest {
            grade_level: request.basic_info.grade_level,
            subject: request.basic_info.subject.clone(),
            topic: request.topic.topic.clone(),
            style: request.customization.style.clone(),
            problem_count: request.customization.problem_count,
            intensity_level: level,
            profile_key,
        }
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during workflow operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkflowError {
    #[error("Invalid step: {0} (expected 1-6)")]
    InvalidStep(u8),

    #[error("Workflow incomplete: {} step(s) remaining", .incomplete.len())]
    NotReady { incomplete: Vec<WorkflowStep> },
}
