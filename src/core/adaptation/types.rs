//! Adaptation Types
//!
//! Values produced by the adaptation engine. All of them are plain data and
//! serialize for the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Intensity Level
// ============================================================================

/// How strongly profile-specific themes are woven into content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IntensityLevel {
    /// Secular content, faith markers stripped.
    Secular = 0,
    /// General virtues without doctrinal sources.
    Values = 1,
    /// Profile themes woven into subject contexts.
    Integrated = 2,
    /// Explicit doctrinal content.
    Explicit = 3,
}

impl IntensityLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for IntensityLevel {
    type Error = InvalidIntensityLevel;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Secular),
            1 => Ok(Self::Values),
            2 => Ok(Self::Integrated),
            3 => Ok(Self::Explicit),
            other => Err(InvalidIntensityLevel(other)),
        }
    }
}

impl From<IntensityLevel> for u8 {
    fn from(level: IntensityLevel) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Secular => "none",
            Self::Values => "values",
            Self::Integrated => "integrated",
            Self::Explicit => "explicit",
        };
        write!(f, "{} ({})", self.as_u8(), label)
    }
}

/// Rejected intensity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("intensity level must be between 0 and 3, got {0}")]
pub struct InvalidIntensityLevel(pub u8);

// ============================================================================
// Rules and Filters
// ============================================================================

/// Kind of transformation a rule asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    StripFaithMarkers,
    VirtueConnection,
    ThematicWeave,
    ExplicitDoctrine,
}

/// A single content-transformation instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdaptationRule {
    pub kind: RuleKind,
    pub instruction: String,
    /// Terms the rule is anchored on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    /// Subject context the rule targets (level 2).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl AdaptationRule {
    pub fn new(kind: RuleKind, instruction: impl Into<String>) -> Self {
        Self {
            kind,
            instruction: instruction.into(),
            keywords: Vec::new(),
            context: None,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

/// What a filter does with matches of its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Required at prompt time; not applied to text.
    Include,
    /// Matches are removed from text.
    Exclude,
    /// Matches are replaced with `replacement`.
    Modify,
}

/// A pattern-based content filter. `pattern` is a regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentFilter {
    pub kind: FilterKind,
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
}

impl ContentFilter {
    pub fn include(pattern: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Include,
            pattern: pattern.into(),
            replacement: None,
        }
    }

    pub fn exclude(pattern: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Exclude,
            pattern: pattern.into(),
            replacement: None,
        }
    }

    pub fn modify(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            kind: FilterKind::Modify,
            pattern: pattern.into(),
            replacement: Some(replacement.into()),
        }
    }
}

// ============================================================================
// Adaptation
// ============================================================================

/// Full adaptation policy for one level/profile pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adaptation {
    pub level: IntensityLevel,
    /// Key of the profile actually used; the neutral key after a fallback.
    pub profile_key: String,
    pub rules: Vec<AdaptationRule>,
    pub filters: Vec<ContentFilter>,
    /// Strings appended to the generation prompt.
    pub prompts: Vec<String>,
}

impl Adaptation {
    pub fn filters_of(&self, kind: FilterKind) -> impl Iterator<Item = &ContentFilter> {
        self.filters.iter().filter(move |f| f.kind == kind)
    }

    /// Prompt augmentation block, or `None` when there is nothing to add.
    pub fn prompt_block(&self) -> Option<String> {
        if self.prompts.is_empty() && self.rules.is_empty() {
            return None;
        }

        let mut block = String::from("Content guidelines:\n");
        for rule in &self.rules {
            block.push_str("- ");
            block.push_str(&rule.instruction);
            block.push('\n');
        }
        for prompt in &self.prompts {
            block.push_str("- ");
            block.push_str(prompt);
            block.push('\n');
        }
        Some(block)
    }
}

/// Result of checking text against a level and profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<String>,
}

impl ValidationReport {
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
        }
    }
}
