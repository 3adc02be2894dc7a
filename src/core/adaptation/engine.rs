//! Adaptation Engine
//!
//! Pure, deterministic mapping from `(level, profile)` to an [`Adaptation`],
//! plus filter application and content validation.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::keywords::{
    contains_phrase, contexts_for_subject, FAITH_TERMS, FAITH_TERM_PATTERN, FAITH_TERM_RE,
    SCRIPTURE_REFERENCE_PATTERN, VIRTUE_KEYWORDS,
};
use super::types::{
    Adaptation, AdaptationRule, ContentFilter, FilterKind, IntensityLevel, RuleKind,
    ValidationReport,
};
use crate::core::profile::{Profile, ProfileCatalog};

/// Maximum number of emphases woven in at the integrated level.
const MAX_WOVEN_EMPHASES: usize = 3;

const SECULAR_PROMPT: &str =
    "Do not include religious references, faith language, or Scripture citations.";

static SPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("Failed to compile space run regex"));

static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t]+([.,;:!?])").expect("Failed to compile punctuation spacing regex")
});

/// Builds, applies and checks adaptations against an injected profile catalog.
#[derive(Debug, Clone)]
pub struct AdaptationEngine {
    catalog: Arc<ProfileCatalog>,
}

impl AdaptationEngine {
    pub fn new(catalog: Arc<ProfileCatalog>) -> Self {
        Self { catalog }
    }

    /// Engine over the built-in profiles.
    pub fn with_builtin_profiles() -> Self {
        Self::new(Arc::new(ProfileCatalog::builtin()))
    }

    pub fn catalog(&self) -> &ProfileCatalog {
        &self.catalog
    }

    /// Adaptation for a level and optional profile key.
    pub fn generate_adaptation(&self, level: IntensityLevel, profile_key: Option<&str>) -> Adaptation {
        self.generate_adaptation_for_subject(level, profile_key, None)
    }

    /// Like [`generate_adaptation`](Self::generate_adaptation), but the
    /// integrated level pairs emphases with the subject's own context first.
    pub fn generate_adaptation_for_subject(
        &self,
        level: IntensityLevel,
        profile_key: Option<&str>,
        subject: Option<&str>,
    ) -> Adaptation {
        let resolved = self.catalog.resolve(profile_key);
        let profile = resolved.profile.as_ref();

        let (rules, filters, prompts) = match level {
            IntensityLevel::Secular => secular_policy(),
            IntensityLevel::Values => values_policy(profile),
            IntensityLevel::Integrated => integrated_policy(profile, subject),
            IntensityLevel::Explicit => explicit_policy(profile),
        };

        tracing::debug!(
            level = level.as_u8(),
            profile = %resolved,
            rules = rules.len(),
            filters = filters.len(),
            "generated adaptation"
        );

        Adaptation {
            level,
            profile_key: profile.key.clone(),
            rules,
            filters,
            prompts,
        }
    }

    /// Apply the adaptation's filters to generated text.
    pub fn apply_adaptation(&self, text: &str, adaptation: &Adaptation) -> String {
        apply_adaptation(text, adaptation)
    }

    /// Check text against a level and profile.
    pub fn validate_content(
        &self,
        text: &str,
        level: IntensityLevel,
        profile_key: Option<&str>,
    ) -> ValidationReport {
        let profile = self.catalog.get(profile_key);
        let mut issues = Vec::new();

        match level {
            IntensityLevel::Secular => {
                let mut found: Vec<String> = FAITH_TERM_RE
                    .find_iter(text)
                    .map(|m| m.as_str().to_lowercase())
                    .collect();
                found.sort();
                found.dedup();
                if !found.is_empty() {
                    issues.push(format!(
                        "religious terms are not allowed at intensity level 0: {}",
                        found.join(", ")
                    ));
                }
            }
            IntensityLevel::Explicit => {
                let any_present = profile
                    .theological_emphases
                    .iter()
                    .any(|emphasis| contains_phrase(text, emphasis));
                if !any_present {
                    issues.push(format!(
                        "none of the {} emphases appear at intensity level 3 (expected one of: {})",
                        profile.key,
                        profile.theological_emphases.join(", ")
                    ));
                }
            }
            IntensityLevel::Values | IntensityLevel::Integrated => {}
        }

        for topic in &profile.avoided_topics {
            if contains_phrase(text, topic) {
                issues.push(format!("mentions avoided topic '{}' for profile {}", topic, profile.key));
            }
        }

        ValidationReport::from_issues(issues)
    }
}

impl Default for AdaptationEngine {
    fn default() -> Self {
        Self::with_builtin_profiles()
    }
}

// ============================================================================
// Filter Application
// ============================================================================

/// Apply exclude and modify filters in order.
///
/// Include filters only constrain the prompt and leave text untouched. When
/// anything was excluded, whitespace runs and spaces before punctuation are
/// collapsed. An exclude-only adaptation is applied until the text stops
/// changing, since a removal can bring a new match together ("John pray 3:16"
/// becomes "John 3:16"); applying it twice therefore equals applying it once.
pub fn apply_adaptation(text: &str, adaptation: &Adaptation) -> String {
    let filters: Vec<(FilterKind, Regex, &str)> = adaptation
        .filters
        .iter()
        .filter(|f| f.kind != FilterKind::Include)
        .filter_map(|f| match Regex::new(&f.pattern) {
            Ok(re) => Some((f.kind, re, f.replacement.as_deref().unwrap_or(""))),
            Err(e) => {
                tracing::warn!(pattern = %f.pattern, error = %e, "skipping invalid content filter");
                None
            }
        })
        .collect();

    let exclude_only = filters.iter().all(|(kind, _, _)| *kind == FilterKind::Exclude);
    let mut output = apply_filters(text, &filters);
    if exclude_only {
        // Each changing pass only removes characters, so this terminates.
        loop {
            let next = apply_filters(&output, &filters);
            if next == output {
                break;
            }
            output = next;
        }
    }
    output
}

fn apply_filters(text: &str, filters: &[(FilterKind, Regex, &str)]) -> String {
    let mut output = text.to_string();
    let mut excluded = false;

    for (kind, re, replacement) in filters {
        match kind {
            FilterKind::Exclude => {
                output = re.replace_all(&output, "").into_owned();
                excluded = true;
            }
            FilterKind::Modify => {
                output = re.replace_all(&output, *replacement).into_owned();
            }
            FilterKind::Include => {}
        }
    }

    if excluded {
        output = SPACE_RUN_RE.replace_all(&output, " ").into_owned();
        output = SPACE_BEFORE_PUNCT_RE.replace_all(&output, "$1").into_owned();
    }
    output
}

// ============================================================================
// Level Policies
// ============================================================================

type Policy = (Vec<AdaptationRule>, Vec<ContentFilter>, Vec<String>);

fn secular_policy() -> Policy {
    let rules = vec![AdaptationRule::new(
        RuleKind::StripFaithMarkers,
        "Remove all religious and faith-coded language from the content.",
    )
    .with_keywords(FAITH_TERMS.iter().copied())];

    let filters = vec![
        ContentFilter::exclude(SCRIPTURE_REFERENCE_PATTERN.as_str()),
        ContentFilter::exclude(FAITH_TERM_PATTERN.as_str()),
    ];

    (rules, filters, vec![SECULAR_PROMPT.to_string()])
}

fn values_policy(profile: &Profile) -> Policy {
    let rules = VIRTUE_KEYWORDS
        .iter()
        .map(|virtue| {
            AdaptationRule::new(
                RuleKind::VirtueConnection,
                format!(
                    "Where it fits, connect the material to {} as a general value, without citing any doctrinal source.",
                    virtue
                ),
            )
            .with_keywords([*virtue])
        })
        .collect();

    let filters = vec![
        ContentFilter::include(format!(r"(?i)\b(?:{})\b", VIRTUE_KEYWORDS.join("|"))),
        ContentFilter::exclude(SCRIPTURE_REFERENCE_PATTERN.as_str()),
    ];

    // Denominational positions stay out of level 1 prompts; validation still
    // reports avoided topics that show up in the output.
    let prompts = vec![profile.guidance(1).to_string()];

    (rules, filters, prompts)
}

fn integrated_policy(profile: &Profile, subject: Option<&str>) -> Policy {
    let contexts = contexts_for_subject(subject);

    let rules = profile
        .theological_emphases
        .iter()
        .take(MAX_WOVEN_EMPHASES)
        .zip(contexts.iter().cycle())
        .map(|(emphasis, context)| {
            AdaptationRule::new(
                RuleKind::ThematicWeave,
                format!("Naturally connect {} to {}.", context, emphasis),
            )
            .with_keywords([emphasis.clone()])
            .with_context(*context)
        })
        .collect();

    let filters = vec![ContentFilter::include(FAITH_TERM_PATTERN.as_str())];

    let mut prompts = vec![profile.guidance(2).to_string()];
    prompts.extend(profile_prompts(profile));

    (rules, filters, prompts)
}

fn explicit_policy(profile: &Profile) -> Policy {
    let rules = profile
        .theological_emphases
        .iter()
        .map(|emphasis| {
            AdaptationRule::new(
                RuleKind::ExplicitDoctrine,
                format!(
                    "Explicitly teach the doctrine of \"{}\" and include that phrase verbatim.",
                    emphasis
                ),
            )
            .with_keywords([emphasis.clone()])
        })
        .collect();

    let filters = vec![
        ContentFilter::include(format!("(?i){}", regex::escape(&profile.key))),
        ContentFilter::include(FAITH_TERM_PATTERN.as_str()),
    ];

    let mut prompts = vec![profile.guidance(3).to_string()];
    prompts.extend(profile_prompts(profile));

    (rules, filters, prompts)
}

fn profile_prompts(profile: &Profile) -> Vec<String> {
    let mut prompts: Vec<String> = profile
        .preferred_approaches
        .iter()
        .map(|approach| format!("Approach: {}.", approach))
        .collect();
    if !profile.preferred_sources.is_empty() {
        prompts.push(format!(
            "Prefer phrasing from: {}.",
            profile.preferred_sources.join(", ")
        ));
    }
    prompts.extend(avoided_topics_prompt(profile));
    prompts
}

fn avoided_topics_prompt(profile: &Profile) -> Option<String> {
    if profile.avoided_topics.is_empty() {
        None
    } else {
        Some(format!(
            "Avoid these topics: {}.",
            profile.avoided_topics.join(", ")
        ))
    }
}

// ============================================================================
// Tests
// ============================================================================
