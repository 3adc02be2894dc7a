//! Strategy Selector
//!
//! Turns a [`ContentAnalysis`] into an [`ApiStrategy`] using small ordered
//! decision tables. The first matching row wins.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::analysis::{ContentAnalysis, Rating, RequestText, ResearchDepth, SubjectFamily};
use super::registry::{NeedAffinity, ProviderFamily, ProviderId, ProviderRegistry};
use crate::core::request::ContentRequest;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyError {
    #[error("No generation provider is available")]
    NoGenerationProvider,

    #[error("Strategy references unavailable provider: {0}")]
    UnavailableProvider(ProviderId),

    #[error("Provider {provider} cannot fill the {slot} slot")]
    WrongFamily { provider: ProviderId, slot: &'static str },

    #[error("Primary provider {0} also appears in the backup chain")]
    PrimaryInBackup(ProviderId),

    #[error("Backup chain lists {0} more than once")]
    DuplicateBackup(ProviderId),
}

pub type Result<T> = std::result::Result<T, StrategyError>;

// ============================================================================
// Strategy
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
}

/// Providers chosen for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStrategy {
    pub primary: ProviderId,
    pub visual: Option<ProviderId>,
    pub research: Option<ProviderId>,
    pub social: Option<ProviderId>,
    pub backup: Vec<ProviderId>,
    pub enhancement: Vec<ProviderId>,
    pub complexity: Complexity,
}

impl ApiStrategy {
    /// Primary followed by the backups, in the order they are tried.
    pub fn generation_chain(&self) -> Vec<ProviderId> {
        std::iter::once(self.primary)
            .chain(self.backup.iter().copied())
            .collect()
    }

    /// Check the structural invariants against a registry.
    pub fn validate(&self, registry: &ProviderRegistry) -> Result<()> {
        let slots = [
            (Some(self.primary), ProviderFamily::Generation, "primary"),
            (self.visual, ProviderFamily::Visual, "visual"),
            (self.research, ProviderFamily::Research, "research"),
            (self.social, ProviderFamily::Social, "social"),
        ];
        for (provider, family, slot) in slots {
            if let Some(provider) = provider {
                if provider.family() != family {
                    return Err(StrategyError::WrongFamily { provider, slot });
                }
                if !registry.is_available(provider) {
                    return Err(StrategyError::UnavailableProvider(provider));
                }
            }
        }

        for (i, backup) in self.backup.iter().enumerate() {
            if *backup == self.primary {
                return Err(StrategyError::PrimaryInBackup(*backup));
            }
            if self.backup[..i].contains(backup) {
                return Err(StrategyError::DuplicateBackup(*backup));
            }
            if backup.family() != ProviderFamily::Generation {
                return Err(StrategyError::WrongFamily {
                    provider: *backup,
                    slot: "backup",
                });
            }
            if !registry.is_available(*backup) {
                return Err(StrategyError::UnavailableProvider(*backup));
            }
        }

        for enhancement in &self.enhancement {
            if !registry.is_available(*enhancement) {
                return Err(StrategyError::UnavailableProvider(*enhancement));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Decision Tables
// ============================================================================

/// Everything a decision row may look at.
struct Signals {
    analysis: ContentAnalysis,
    text: RequestText,
    complexity: Complexity,
}

struct Row<T> {
    when: fn(&Signals) -> bool,
    then: fn(&Signals) -> T,
}

fn first_match<T>(rows: &[Row<T>], signals: &Signals) -> Option<T> {
    rows.iter()
        .find(|row| (row.when)(signals))
        .map(|row| (row.then)(signals))
}

const ADVANCED_SUBJECTS: &[&str] = &[
    " ap ",
    "advanced",
    "honors",
    "calculus",
    "physics",
    "chemistry",
    "trigonometry",
    "statistics",
];

const ART_TOPICS: &[&str] = &[" art ", " arts ", "drawing", "painting", "coloring", "sketch"];

const PRIMARY_ROWS: &[Row<ProviderId>] = &[
    Row {
        when: |s| s.analysis.creativity == Rating::High,
        then: |_| ProviderId::OpenAi,
    },
    Row {
        when: |s| {
            s.analysis.technical_complexity == Rating::High && s.complexity == Complexity::Advanced
        },
        then: |_| ProviderId::Anthropic,
    },
    Row {
        when: |s| {
            s.analysis.technical_complexity == Rating::Medium
                && s.analysis.research_depth != ResearchDepth::None
        },
        then: |_| ProviderId::Gemini,
    },
];

const VISUAL_ROWS: &[Row<Option<ProviderId>>] = &[
    Row {
        when: |s| s.analysis.visual_need == Rating::Low,
        then: |_| None,
    },
    Row {
        when: |s| s.text.grade <= 3,
        then: |s| {
            let topic = format!(" {} ", s.text.topic);
            if ART_TOPICS.iter().any(|w| topic.contains(w)) {
                Some(ProviderId::DallE)
            } else {
                Some(ProviderId::Pixabay)
            }
        },
    },
    Row {
        when: |s| s.analysis.creativity == Rating::High,
        then: |_| Some(ProviderId::DallE),
    },
    Row {
        when: |s| s.text.family == SubjectFamily::Science,
        then: |s| Some(photo_provider(&s.text.topic, &s.text.subject)),
    },
    Row {
        when: |s| s.text.family == SubjectFamily::Math && s.text.grade >= 4,
        then: |_| Some(ProviderId::DallE),
    },
    Row {
        when: |s| matches!(s.text.family, SubjectFamily::History | SubjectFamily::SocialStudies),
        then: |_| Some(ProviderId::Wikimedia),
    },
];

const RESEARCH_ROWS: &[Row<ProviderId>] = &[
    Row {
        when: |s| {
            s.analysis.current_events == Rating::High
                || s.text.family == SubjectFamily::SocialStudies
        },
        then: |_| ProviderId::NewsApi,
    },
    Row {
        when: |s| s.analysis.interactivity == Rating::High,
        then: |_| ProviderId::YouTube,
    },
];

/// Pick between the two photo libraries by a stable hash of the request.
fn photo_provider(topic: &str, subject: &str) -> ProviderId {
    const PHOTO_PROVIDERS: [ProviderId; 2] = [ProviderId::Unsplash, ProviderId::Pexels];
    let key = format!("{}|{}", topic.trim(), subject.trim()).to_lowercase();
    let hash = blake3::hash(key.as_bytes());
    PHOTO_PROVIDERS[(hash.as_bytes()[0] % 2) as usize]
}

fn complexity(analysis: &ContentAnalysis, text: &RequestText) -> Complexity {
    let advanced_subject = ADVANCED_SUBJECTS
        .iter()
        .any(|w| format!(" {} ", text.subject).contains(w));

    if analysis.technical_complexity == Rating::High
        || analysis.research_depth == ResearchDepth::Extensive
        || text.grade >= 9
        || advanced_subject
        || text.problem_count > 15
    {
        Complexity::Advanced
    } else if analysis.technical_complexity == Rating::Medium
        || analysis.research_depth == ResearchDepth::Moderate
        || text.grade >= 6
        || text.problem_count > 8
    {
        Complexity::Intermediate
    } else {
        Complexity::Basic
    }
}

fn dominant_need(analysis: &ContentAnalysis) -> NeedAffinity {
    if analysis.creativity >= analysis.technical_complexity {
        NeedAffinity::Creative
    } else {
        NeedAffinity::Technical
    }
}

fn needs_research(s: &Signals) -> bool {
    let a = &s.analysis;
    a.research_depth == ResearchDepth::Extensive
        || (a.research_depth == ResearchDepth::Moderate && s.complexity != Complexity::Basic)
        || a.current_events == Rating::High
        || (s.text.grade >= 9 && a.real_world_relevance == Rating::High)
}

fn needs_social(s: &Signals) -> bool {
    let a = &s.analysis;
    (s.text.grade >= 9 && a.current_events == Rating::High)
        || (s.text.grade <= 8 && a.interactivity == Rating::High)
}

// ============================================================================
// Selector
// ============================================================================

/// Deterministic strategy selection over an injected registry.
#[derive(Debug, Clone, Default)]
pub struct StrategySelector {
    registry: ProviderRegistry,
}

impl StrategySelector {
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn analyze(&self, request: &ContentRequest) -> ContentAnalysis {
        ContentAnalysis::of(request)
    }

    /// The preferred provider if enabled, else the first enabled one of its family.
    fn available_in_family(&self, preferred: ProviderId) -> Option<ProviderId> {
        if self.registry.is_available(preferred) {
            return Some(preferred);
        }
        let fallback = self.registry.family(preferred.family()).first().copied();
        debug!(preferred = %preferred, fallback = ?fallback, "Preferred provider unavailable");
        fallback
    }

    /// Select providers for a request.
    pub fn select_strategy(&self, request: &ContentRequest) -> Result<ApiStrategy> {
        let text = RequestText::from_request(request);
        let analysis = ContentAnalysis::of(request);
        let complexity = complexity(&analysis, &text);
        let signals = Signals {
            analysis,
            text,
            complexity,
        };

        // Available generation providers, those matching the dominant need first.
        let need = dominant_need(&analysis);
        let mut ranked = self.registry.generation_providers();
        ranked.sort_by_key(|id| id.affinity() != Some(need));

        let preferred = first_match(PRIMARY_ROWS, &signals).unwrap_or(ProviderId::OpenAi);
        let primary = if self.registry.is_available(preferred) {
            preferred
        } else {
            let fallback = *ranked.first().ok_or(StrategyError::NoGenerationProvider)?;
            debug!(preferred = %preferred, fallback = %fallback, "Preferred primary unavailable");
            fallback
        };
        let backup: Vec<ProviderId> = ranked.into_iter().filter(|id| *id != primary).collect();

        let visual = first_match(VISUAL_ROWS, &signals)
            .unwrap_or(Some(ProviderId::Unsplash))
            .and_then(|id| self.available_in_family(id));

        let research = needs_research(&signals)
            .then(|| first_match(RESEARCH_ROWS, &signals).unwrap_or(ProviderId::Perplexity))
            .and_then(|id| self.available_in_family(id));

        let social = needs_social(&signals)
            .then(|| {
                if signals.text.grade >= 9 {
                    ProviderId::Padlet
                } else {
                    ProviderId::Kahoot
                }
            })
            .and_then(|id| self.available_in_family(id));

        let mut enhancement = Vec::new();
        let candidates = [
            (analysis.research_depth != ResearchDepth::None, ProviderId::YouTube),
            (analysis.interactivity == Rating::High, ProviderId::Giphy),
            (analysis.current_events == Rating::High, ProviderId::NewsApi),
        ];
        for (wanted, id) in candidates {
            if wanted && self.registry.is_available(id) && !enhancement.contains(&id) {
                enhancement.push(id);
            }
        }

        let strategy = ApiStrategy {
            primary,
            visual,
            research,
            social,
            backup,
            enhancement,
            complexity,
        };

        debug!(
            subject = %request.subject,
            topic = %request.topic,
            primary = %strategy.primary,
            complexity = ?strategy.complexity,
            "Selected strategy"
        );

        Ok(strategy)
    }
}
