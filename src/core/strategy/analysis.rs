//! Content Analysis
//!
//! Each dimension is an independent classifier over the request, returning an
//! ordinal rating. Classifiers only look at lowercase subject/topic/style
//! text, the grade ordinal and the problem count, so each can be tested on its
//! own.

use serde::{Deserialize, Serialize};

use super::grade::grade_ordinal;
use crate::core::request::ContentRequest;

// ============================================================================
// Ordinals
// ============================================================================

/// Three-step rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    Low,
    Medium,
    High,
}

/// How much outside research the content needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchDepth {
    None,
    Basic,
    Moderate,
    Extensive,
}

/// Broad subject grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectFamily {
    Math,
    Science,
    History,
    SocialStudies,
    LanguageArts,
    Arts,
    Bible,
    Other,
}

impl SubjectFamily {
    /// Classify a subject name.
    pub fn classify(subject: &str) -> Self {
        let subject = subject.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| subject.contains(w));

        if has(&["math", "algebra", "geometry", "calculus", "arithmetic", "statistics", "trigonometry"]) {
            Self::Math
        } else if has(&["science", "biology", "chemistry", "physics", "astronomy", "anatomy", "ecology"]) {
            Self::Science
        } else if has(&["history"]) {
            Self::History
        } else if has(&["social studies", "civics", "government", "geography", "economics"]) {
            Self::SocialStudies
        } else if has(&["bible", "theology", "religion", "scripture"]) {
            Self::Bible
        } else if has(&["english", "reading", "writing", "literature", "language", "phonics", "spelling"]) {
            Self::LanguageArts
        } else if subject.split_whitespace().any(|w| matches!(w, "art" | "arts" | "music" | "drama" | "drawing")) {
            Self::Arts
        } else {
            Self::Other
        }
    }

    pub fn is_stem(self) -> bool {
        matches!(self, Self::Math | Self::Science)
    }
}

// ============================================================================
// Analysis
// ============================================================================

/// Multi-dimensional analysis of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub grade_ordinal: u8,
    pub subject_family: SubjectFamily,
    pub creativity: Rating,
    pub technical_complexity: Rating,
    pub research_depth: ResearchDepth,
    pub visual_need: Rating,
    pub current_events: Rating,
    pub interactivity: Rating,
    pub real_world_relevance: Rating,
}

/// Lowercased request text shared by the classifiers.
#[derive(Debug, Clone)]
pub struct RequestText {
    pub subject: String,
    pub topic: String,
    pub style: String,
    pub grade: u8,
    pub problem_count: u32,
    pub family: SubjectFamily,
}

impl RequestText {
    pub fn from_request(request: &ContentRequest) -> Self {
        Self {
            subject: request.subject.to_lowercase(),
            topic: request.topic.to_lowercase(),
            style: request.style.to_lowercase(),
            grade: grade_ordinal(request.grade_level),
            problem_count: request.problem_count,
            family: SubjectFamily::classify(&request.subject),
        }
    }

    fn topic_has(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.topic.contains(w))
    }

    fn style_has(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.style.contains(w))
    }

    fn subject_has(&self, words: &[&str]) -> bool {
        words.iter().any(|w| self.subject.contains(w))
    }
}

impl ContentAnalysis {
    /// Run every classifier over a request.
    pub fn of(request: &ContentRequest) -> Self {
        let text = RequestText::from_request(request);
        Self {
            grade_ordinal: text.grade,
            subject_family: text.family,
            creativity: creativity(&text),
            technical_complexity: technical_complexity(&text),
            research_depth: research_depth(&text),
            visual_need: visual_need(&text),
            current_events: current_events(&text),
            interactivity: interactivity(&text),
            real_world_relevance: real_world_relevance(&text),
        }
    }
}

// ============================================================================
// Keyword Sets
// ============================================================================

const CREATIVE_STYLES: &[&str] = &["creative", "engaging", "fun", "playful", "story", "imaginative", "whimsical"];
const CREATIVE_TOPICS: &[&str] = &["story", "poem", "poetry", "drawing", "painting", "imagine", "creative", "design"];

/// Topic or subject words that on their own make content highly technical.
pub const ADVANCED_KEYWORDS: &[&str] = &[
    "calculus",
    "trigonometry",
    "physics",
    "chemistry",
    "programming",
    "coding",
    "algorithm",
    "quadratic",
    "derivative",
    "molecular",
    "genetics",
    "stoichiometry",
];
const TECHNICAL_TOPICS: &[&str] = &["equation", "experiment", "data", "graph", "measurement", "formula", "variable"];

const EXTENSIVE_RESEARCH_TOPICS: &[&str] = &["research", "investigation", "analysis", "thesis", "primary source", "in-depth"];
const MODERATE_RESEARCH_TOPICS: &[&str] = &["history of", "causes", "compare", "evidence", "case study"];
const BASIC_RESEARCH_TOPICS: &[&str] = &["facts", "explore", "discover"];

const VISUAL_TOPICS: &[&str] = &["diagram", "map", "chart", "shapes", "geometry", "anatomy", "life cycle", "solar system", "drawing"];

const CURRENT_EVENT_TOPICS: &[&str] = &["current events", "news", "election", "today", "this year", "recent", "climate change"];
const CONTEMPORARY_TOPICS: &[&str] = &["modern", "contemporary", "society"];

const INTERACTIVE_STYLES: &[&str] = &["interactive", "hands-on", "game", "activity", "collaborative"];
const INTERACTIVE_TOPICS: &[&str] = &["game", "activity", "experiment", "role play", "simulation"];

const REAL_WORLD_TOPICS: &[&str] = &["application", "real world", "real-world", "everyday", "career", "practical", "money", "budget"];

// ============================================================================
// Classifiers
// ============================================================================

pub fn creativity(text: &RequestText) -> Rating {
    if text.style_has(CREATIVE_STYLES)
        || text.topic_has(CREATIVE_TOPICS)
        || text.family == SubjectFamily::Arts
        || text.subject_has(&["creative writing"])
    {
        Rating::High
    } else if text.family == SubjectFamily::LanguageArts || text.style_has(&["discussion", "hands-on"]) {
        Rating::Medium
    } else {
        Rating::Low
    }
}

pub fn technical_complexity(text: &RequestText) -> Rating {
    if text.topic_has(ADVANCED_KEYWORDS)
        || text.subject_has(ADVANCED_KEYWORDS)
        || (text.family.is_stem() && text.grade >= 9)
    {
        Rating::High
    } else if (text.family.is_stem() && text.grade >= 6) || text.topic_has(TECHNICAL_TOPICS) {
        Rating::Medium
    } else {
        Rating::Low
    }
}

pub fn research_depth(text: &RequestText) -> ResearchDepth {
    let research_family = matches!(
        text.family,
        SubjectFamily::History | SubjectFamily::Science | SubjectFamily::SocialStudies | SubjectFamily::Bible
    );

    if text.topic_has(EXTENSIVE_RESEARCH_TOPICS) {
        ResearchDepth::Extensive
    } else if (research_family && text.grade >= 6) || text.topic_has(MODERATE_RESEARCH_TOPICS) {
        ResearchDepth::Moderate
    } else if research_family || text.topic_has(BASIC_RESEARCH_TOPICS) {
        ResearchDepth::Basic
    } else {
        ResearchDepth::None
    }
}

pub fn visual_need(text: &RequestText) -> Rating {
    if text.grade <= 3
        || matches!(text.family, SubjectFamily::Arts | SubjectFamily::Science)
        || text.subject_has(&["geography"])
        || text.topic_has(VISUAL_TOPICS)
    {
        Rating::High
    } else if text.grade <= 5 || matches!(text.family, SubjectFamily::Math | SubjectFamily::History) {
        Rating::Medium
    } else {
        Rating::Low
    }
}

pub fn current_events(text: &RequestText) -> Rating {
    if text.topic_has(CURRENT_EVENT_TOPICS) {
        Rating::High
    } else if text.family == SubjectFamily::SocialStudies || text.topic_has(CONTEMPORARY_TOPICS) {
        Rating::Medium
    } else {
        Rating::Low
    }
}

pub fn interactivity(text: &RequestText) -> Rating {
    if text.style_has(INTERACTIVE_STYLES) || text.topic_has(INTERACTIVE_TOPICS) {
        Rating::High
    } else if text.grade <= 5 || text.style_has(&["engaging"]) {
        Rating::Medium
    } else {
        Rating::Low
    }
}

pub fn real_world_relevance(text: &RequestText) -> Rating {
    if text.topic_has(REAL_WORLD_TOPICS) || text.subject_has(&["economics", "finance"]) {
        Rating::High
    } else if text.family.is_stem() {
        Rating::Medium
    } else {
        Rating::Low
    }
}
