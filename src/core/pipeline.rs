//! Content Pipeline
//!
//! Ties the engines together for one request: workflow output in, adapted and
//! enriched content out, with the strategy and adaptation that produced it.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

use crate::core::adaptation::{Adaptation, AdaptationEngine, ValidationReport};
use crate::core::generation::{
    CancellationToken, EnrichmentContext, GenerateOptions, GeneratedContent, GenerationError,
    GenerationOrchestrator, GenerationProgress,
};
use crate::core::request::ContentRequest;
use crate::core::strategy::{ApiStrategy, ContentAnalysis, StrategyError, StrategySelector};
use crate::core::workflow::GenerationRequest;

/// Response format every generation provider is asked for.
const RESPONSE_FORMAT: &str = "Respond with a single JSON object of the form \
{\"title\": string, \"instructions\": string, \"items\": [{\"prompt\": string, \"answer\": string}]}.";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Strategy(#[from] StrategyError),

    #[error(transparent)]
    Generation(#[from] GenerationError),
}

impl PipelineError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Strategy(e) => format!("Content generation is not configured: {}", e),
            Self::Generation(e) => e.user_message(),
        }
    }
}

/// Decisions made for a request before anything is generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPlan {
    pub analysis: ContentAnalysis,
    pub strategy: ApiStrategy,
    pub adaptation: Adaptation,
}

/// Everything produced for one request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub content: GeneratedContent,
    pub adaptation: Adaptation,
    pub strategy: ApiStrategy,
    pub validation: ValidationReport,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub progress: Option<UnboundedSender<GenerationProgress>>,
    pub cancel: Option<CancellationToken>,
}

#[derive(Clone)]
pub struct ContentPipeline {
    adaptation: AdaptationEngine,
    selector: StrategySelector,
    orchestrator: GenerationOrchestrator,
}

impl ContentPipeline {
    pub fn new(
        adaptation: AdaptationEngine,
        selector: StrategySelector,
        orchestrator: GenerationOrchestrator,
    ) -> Self {
        Self {
            adaptation,
            selector,
            orchestrator,
        }
    }

    pub fn adaptation_engine(&self) -> &AdaptationEngine {
        &self.adaptation
    }

    pub fn selector(&self) -> &StrategySelector {
        &self.selector
    }

    pub fn orchestrator(&self) -> &GenerationOrchestrator {
        &self.orchestrator
    }

    /// Analysis, strategy and adaptation for a request.
    pub fn plan(&self, request: &ContentRequest) -> Result<ContentPlan, PipelineError> {
        let analysis = self.selector.analyze(request);
        let strategy = self.selector.select_strategy(request)?;
        let adaptation = self.adaptation.generate_adaptation_for_subject(
            request.intensity_level,
            request.profile_key.as_deref(),
            Some(&request.subject),
        );
        Ok(ContentPlan {
            analysis,
            strategy,
            adaptation,
        })
    }

    /// Generate content for a completed workflow.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        options: PipelineOptions,
    ) -> Result<PipelineOutput, PipelineError> {
        let content_request = ContentRequest::from(request);
        let plan = self.plan(&content_request)?;
        let prompt = build_prompt(request);

        tracing::info!(
            request_id = %request.id,
            primary = %plan.strategy.primary,
            level = plan.adaptation.level.as_u8(),
            "Generating content"
        );

        let mut generate_options = GenerateOptions::default()
            .with_adaptation(plan.adaptation.clone())
            .with_context(EnrichmentContext::from(&content_request));
        generate_options.progress = options.progress;
        generate_options.cancel = options.cancel;

        let content = self
            .orchestrator
            .generate_with(&prompt, &plan.strategy, generate_options)
            .await?;

        let validation = self.adaptation.validate_content(
            &content.content.plain_text(),
            content_request.intensity_level,
            content_request.profile_key.as_deref(),
        );
        if !validation.valid {
            tracing::warn!(
                request_id = %request.id,
                issues = ?validation.issues,
                "Generated content failed validation"
            );
        }

        Ok(PipelineOutput {
            content,
            adaptation: plan.adaptation,
            strategy: plan.strategy,
            validation,
        })
    }
}

/// Compose the generation prompt from a completed workflow.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let basic = &request.basic_info;
    let topic = &request.topic;
    let custom = &request.customization;

    let mut lines = vec![
        format!(
            "Create a {} titled \"{}\" for grade {} {}.",
            request.template.category.to_lowercase(),
            request.final_review.title.trim(),
            basic.grade_level,
            basic.subject
        ),
        format!("Topic: {}", topic.topic.trim()),
    ];

    let objectives: Vec<&str> = topic
        .learning_objectives
        .iter()
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .collect();
    lines.push(format!("Learning objectives: {}", objectives.join("; ")));
    if !topic.keywords.is_empty() {
        lines.push(format!("Key vocabulary: {}", topic.keywords.join(", ")));
    }

    lines.push(format!(
        "Difficulty: {}. Style: {}. Include {} problems; it should take about {} minutes.",
        custom.difficulty, custom.style, custom.problem_count, basic.estimated_minutes
    ));
    if custom.include_answer_key {
        lines.push("Provide an answer for every item.".to_string());
    }
    lines.push(format!("Layout: {}.", request.template.name));
    if let Some(translation) = &request.faith_integration.scripture_translation {
        if request.faith_integration.level > 0 {
            lines.push(format!("Quote Scripture from the {}.", translation));
        }
    }
    if let Some(notes) = request.final_review.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        lines.push(format!("Additional notes: {}", notes.trim()));
    }
    lines.push(RESPONSE_FORMAT.to_string());

    lines.join("\n")
}
