//! Adaptation Keywords
//!
//! Term lists and compiled patterns shared by adaptation and validation.

use once_cell::sync::Lazy;
use regex::Regex;

// ============================================================================
// Faith Terms
// ============================================================================

/// Words treated as faith-coded. Matched case-insensitively on word boundaries.
///
/// Bare "sin" is left out because it collides with the sine function.
pub static FAITH_TERMS: &[&str] = &[
    "god",
    "gods",
    "jesus",
    "christ",
    "christian",
    "bible",
    "biblical",
    "scripture",
    "scriptures",
    "prayer",
    "pray",
    "church",
    "faith",
    "holy",
    "lord",
    "gospel",
    "salvation",
    "sins",
    "sinful",
    "sinner",
    "heaven",
    "divine",
    "psalm",
    "psalms",
    "proverbs",
    "creator",
    "amen",
    "blessing",
    "blessed",
];

/// Regex source matching any faith-coded term.
pub static FAITH_TERM_PATTERN: Lazy<String> =
    Lazy::new(|| format!(r"(?i)\b(?:{})\b", FAITH_TERMS.join("|")));

pub static FAITH_TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&FAITH_TERM_PATTERN).expect("Failed to compile faith term regex")
});

/// Bible book names and common abbreviations, as they precede a chapter:verse.
pub static BIBLE_BOOKS: &[&str] = &[
    // Old Testament
    "Genesis", "Gen", "Exodus", "Exod", "Leviticus", "Lev", "Numbers", "Num",
    "Deuteronomy", "Deut", "Joshua", "Josh", "Judges", "Judg", "Ruth", "Samuel", "Sam",
    "Kings", "Kgs", "Chronicles", "Chron", "Ezra", "Nehemiah", "Neh", "Esther", "Esth",
    "Job", "Psalms", "Psalm", "Ps", "Proverbs", "Prov", "Ecclesiastes", "Eccl",
    "Song of Solomon", "Song of Songs", "Isaiah", "Isa", "Jeremiah", "Jer",
    "Lamentations", "Lam", "Ezekiel", "Ezek", "Daniel", "Dan", "Hosea", "Hos", "Joel",
    "Amos", "Obadiah", "Obad", "Jonah", "Micah", "Mic", "Nahum", "Nah", "Habakkuk", "Hab",
    "Zephaniah", "Zeph", "Haggai", "Hag", "Zechariah", "Zech", "Malachi", "Mal",
    // New Testament
    "Matthew", "Matt", "Mark", "Luke", "John", "Acts", "Romans", "Rom", "Corinthians",
    "Cor", "Galatians", "Gal", "Ephesians", "Eph", "Philippians", "Phil", "Colossians",
    "Col", "Thessalonians", "Thess", "Timothy", "Tim", "Titus", "Philemon", "Phlm",
    "Hebrews", "Heb", "James", "Jas", "Peter", "Pet", "Jude", "Revelation", "Rev",
];

/// Scripture references such as "John 3:16" or "1 Cor 13:4-7".
///
/// Only Bible book names count, so "Ratio 6:8" or "Monday 8:30" are left alone.
pub static SCRIPTURE_REFERENCE_PATTERN: Lazy<String> = Lazy::new(|| {
    format!(
        r"\b(?:[1-3]\s?)?(?:{})\.?\s\d{{1,3}}:\d{{1,3}}(?:-\d{{1,3}})?\b",
        BIBLE_BOOKS.join("|")
    )
});

// ============================================================================
// Virtues
// ============================================================================

/// Generic virtues used at the values level.
pub static VIRTUE_KEYWORDS: &[&str] = &["kindness", "honesty", "service", "stewardship"];

// ============================================================================
// Subject Contexts
// ============================================================================

/// A subject area where profile themes can be woven in.
#[derive(Debug, Clone, Copy)]
pub struct SubjectContext {
    pub label: &'static str,
    pub subject_keywords: &'static [&'static str],
}

/// Default ordering of contexts for the integrated level.
pub static SUBJECT_CONTEXTS: &[SubjectContext] = &[
    SubjectContext {
        label: "creation and science",
        subject_keywords: &["science", "biology", "chemistry", "physics", "earth", "nature", "astronomy"],
    },
    SubjectContext {
        label: "wisdom and learning",
        subject_keywords: &["english", "reading", "language", "literature", "writing", "bible", "phonics"],
    },
    SubjectContext {
        label: "providence in history",
        subject_keywords: &["history", "social studies", "geography", "civics", "government"],
    },
    SubjectContext {
        label: "order and design",
        subject_keywords: &["math", "algebra", "geometry", "calculus", "statistics", "arithmetic"],
    },
    SubjectContext {
        label: "beauty and creativity",
        subject_keywords: &["art", "music", "drama", "drawing"],
    },
];

/// Contexts ordered so the one matching `subject` comes first.
pub fn contexts_for_subject(subject: Option<&str>) -> Vec<&'static str> {
    let subject = subject.map(str::to_lowercase).unwrap_or_default();
    let matching = SUBJECT_CONTEXTS.iter().position(|ctx| {
        ctx.subject_keywords
            .iter()
            .any(|keyword| subject.contains(keyword))
    });

    let mut labels: Vec<&'static str> = SUBJECT_CONTEXTS.iter().map(|c| c.label).collect();
    if let Some(index) = matching {
        let label = labels.remove(index);
        labels.insert(0, label);
    }
    labels
}

/// Case-insensitive substring check.
pub fn contains_phrase(text: &str, phrase: &str) -> bool {
    !phrase.is_empty() && text.to_lowercase().contains(&phrase.to_lowercase())
}
