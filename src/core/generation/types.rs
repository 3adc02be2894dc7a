//! Generation Types
//!
//! Structured content parsed from provider output, and the records a
//! generation run returns alongside it.

use serde::{Deserialize, Serialize};

use super::error::ProviderError;
use crate::core::request::ContentRequest;
use crate::core::strategy::ProviderId;

// ============================================================================
// Structured Content
// ============================================================================

/// One exercise, question or activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawItem")]
pub struct ContentItem {
    pub prompt: String,
    pub answer: Option<String>,
    pub hint: Option<String>,
}

impl ContentItem {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: None,
            hint: None,
        }
    }

    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = Some(answer.into());
        self
    }
}

/// Providers return items either as bare strings or as objects, with a few
/// common spellings for the prompt field.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Text(String),
    Full {
        #[serde(alias = "question", alias = "text", alias = "problem")]
        prompt: String,
        #[serde(default)]
        answer: Option<String>,
        #[serde(default)]
        hint: Option<String>,
    },
}

impl From<RawItem> for ContentItem {
    fn from(raw: RawItem) -> Self {
        match raw {
            RawItem::Text(prompt) => Self::new(prompt),
            RawItem::Full {
                prompt,
                answer,
                hint,
            } => Self {
                prompt,
                answer,
                hint,
            },
        }
    }
}

/// Image attached by a visual provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    pub source: ProviderId,
}

/// Link attached by a research provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLink {
    pub title: String,
    pub url: String,
    pub source: ProviderId,
}

/// Content in the shape every provider must produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredContent {
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    pub items: Vec<ContentItem>,
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    #[serde(default)]
    pub resources: Vec<ResourceLink>,
}

impl StructuredContent {
    pub fn new(title: impl Into<String>, instructions: impl Into<String>, items: Vec<ContentItem>) -> Self {
        Self {
            title: title.into(),
            instructions: instructions.into(),
            items,
            images: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Parse raw provider output.
    ///
    /// The JSON object may be wrapped in prose or a fenced block; the span from
    /// the first `{` to the last `}` is parsed. A missing title or an empty item
    /// list is malformed.
    pub fn parse(raw: &str) -> Result<Self, ProviderError> {
        let span = match (raw.find('{'), raw.rfind('}')) {
            (Some(start), Some(end)) if start < end => &raw[start..=end],
            _ => {
                return Err(ProviderError::MalformedResponse(
                    "no JSON object in response".to_string(),
                ))
            }
        };

        let content: Self = serde_json::from_str(span)
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        if content.title.trim().is_empty() {
            return Err(ProviderError::MalformedResponse("missing title".to_string()));
        }
        if content.items.is_empty() {
            return Err(ProviderError::MalformedResponse("no items".to_string()));
        }
        Ok(content)
    }

    /// All text fields joined by newlines, for validation.
    pub fn plain_text(&self) -> String {
        let mut parts = vec![self.title.as_str(), self.instructions.as_str()];
        for item in &self.items {
            parts.push(&item.prompt);
            parts.extend(item.answer.as_deref());
            parts.extend(item.hint.as_deref());
        }
        parts.retain(|p| !p.is_empty());
        parts.join("\n")
    }

    /// Rewrite every text field in place.
    pub fn map_text<F>(&mut self, f: F)
    where
        F: Fn(&str) -> String,
    {
        self.title = f(&self.title);
        self.instructions = f(&self.instructions);
        for item in &mut self.items {
            item.prompt = f(&item.prompt);
            item.answer = item.answer.as_deref().map(&f);
            item.hint = item.hint.as_deref().map(&f);
        }
        for image in &mut self.images {
            image.alt_text = f(&image.alt_text);
        }
        for resource in &mut self.resources {
            resource.title = f(&resource.title);
        }
    }
}

// ============================================================================
// Enrichment
// ============================================================================

/// What enrichment providers know about the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentContext {
    pub grade_level: u8,
    pub subject: String,
    pub topic: String,
}

impl From<&ContentRequest> for EnrichmentContext {
    fn from(request: &ContentRequest) -> Self {
        Self {
            grade_level: request.grade_level,
            subject: request.subject.clone(),
            topic: request.topic.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnrichmentOutcome {
    Applied { provider: ProviderId },
    Skipped { provider: ProviderId, reason: String },
}

impl EnrichmentOutcome {
    pub fn provider(&self) -> ProviderId {
        match self {
            Self::Applied { provider } | Self::Skipped { provider, .. } => *provider,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

// ============================================================================
// Attempt Log
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AttemptOutcome {
    Succeeded,
    Failed { reason: String },
    Cancelled,
}

/// One provider call in a generation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    pub provider: ProviderId,
    pub outcome: AttemptOutcome,
    pub latency_ms: u64,
}

impl AttemptRecord {
    pub fn succeeded(provider: ProviderId, latency_ms: u64) -> Self {
        Self {
            provider,
            outcome: AttemptOutcome::Succeeded,
            latency_ms,
        }
    }

    pub fn failed(provider: ProviderId, error: &ProviderError, latency_ms: u64) -> Self {
        Self {
            provider,
            outcome: AttemptOutcome::Failed {
                reason: error.to_string(),
            },
            latency_ms,
        }
    }

    pub fn cancelled(provider: ProviderId, latency_ms: u64) -> Self {
        Self {
            provider,
            outcome: AttemptOutcome::Cancelled,
            latency_ms,
        }
    }
}

/// Successful generation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub content: StructuredContent,
    /// Provider that produced the content.
    pub provider: ProviderId,
    pub attempts: Vec<AttemptRecord>,
    pub enrichments: Vec<EnrichmentOutcome>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let content = StructuredContent::parse(
            r#"{"title": "Fractions", "instructions": "Solve.", "items": ["1/2 + 1/4"]}"#,
        )
        .unwrap();
        assert_eq!(content.title, "Fractions");
        assert_eq!(content.items, vec![ContentItem::new("1/2 + 1/4")]);
    }

    #[test]
    fn test_parse_fenced_block_with_prose() {
        let raw = "Here is your worksheet:\n```json\n{\"title\": \"Cells\", \"items\": [{\"question\": \"What is a nucleus?\", \"answer\": \"The control center\"}]}\n```\nEnjoy!";
        let content = StructuredContent::parse(raw).unwrap();
        assert_eq!(content.instructions, "");
        assert_eq!(
            content.items[0],
            ContentItem::new("What is a nucleus?").with_answer("The control center")
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "no json here",
            "} backwards {",
            r#"{"title": "Missing items"}"#,
            r#"{"title": " ", "items": ["a"]}"#,
            r#"{"title": "Empty", "items": []}"#,
        ] {
            assert!(
                matches!(StructuredContent::parse(raw), Err(ProviderError::MalformedResponse(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn test_map_text_touches_every_field() {
        let mut content = StructuredContent::new(
            "title",
            "instructions",
            vec![ContentItem::new("prompt").with_answer("answer")],
        );
        content.map_text(|t| t.to_uppercase());
        assert_eq!(content.title, "TITLE");
        assert_eq!(content.instructions, "INSTRUCTIONS");
        assert_eq!(content.items[0].answer.as_deref(), Some("ANSWER"));
    }
}
