//! Profile definitions and keyed lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Key of the profile used whenever a lookup misses.
pub const NEUTRAL_PROFILE_KEY: &str = "General Christian";

// ============================================================================
// Profile Types
// ============================================================================

/// A named bundle of emphases and phrasing guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Canonical key, also used as the display name.
    pub key: String,
    /// Distinctives that must surface at the explicit level.
    pub theological_emphases: Vec<String>,
    /// Preferred phrasing sources (translations, confessions, catechisms).
    pub preferred_sources: Vec<String>,
    /// Topics that are always flagged when they appear in generated text.
    pub avoided_topics: Vec<String>,
    /// Preferred pedagogical approaches.
    pub preferred_approaches: Vec<String>,
    /// Guidance text indexed by intensity level 0..=3.
    pub guidance_by_level: [String; 4],
}

impl Profile {
    /// Guidance for a level, clamped to the explicit level.
    pub fn guidance(&self, level: u8) -> &str {
        &self.guidance_by_level[usize::from(level.min(3))]
    }
}

/// Result of resolving a profile key against the catalog.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub profile: Arc<Profile>,
    /// True when the requested key was missing or unknown.
    pub is_fallback: bool,
}

impl fmt::Display for ResolvedProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fallback {
            write!(f, "{} (fallback)", self.profile.key)
        } else {
            write!(f, "{}", self.profile.key)
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Keyed, read-only profile table.
///
/// Keys match case-insensitively, and `-`/`_` are treated as spaces, so
/// `reformed-baptist` resolves the same profile as `Reformed Baptist`.
#[derive(Debug, Clone)]
pub struct ProfileCatalog {
    profiles: HashMap<String, Arc<Profile>>,
    neutral: Arc<Profile>,
}

impl ProfileCatalog {
    /// Catalog holding only the neutral profile.
    pub fn empty() -> Self {
        Self {
            profiles: HashMap::new(),
            neutral: Arc::new(neutral_profile()),
        }
    }

    /// Catalog with every built-in profile.
    pub fn builtin() -> Self {
        builtin_profiles()
            .into_iter()
            .fold(Self::empty(), |catalog, profile| catalog.with_profile(profile))
    }

    /// Add or replace a profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profiles
            .insert(normalize_key(&profile.key), Arc::new(profile));
        self
    }

    /// Resolve a key, falling back to the neutral profile.
    pub fn resolve(&self, key: Option<&str>) -> ResolvedProfile {
        let found = key
            .map(normalize_key)
            .filter(|k| !k.is_empty())
            .and_then(|k| {
                if k == normalize_key(NEUTRAL_PROFILE_KEY) {
                    Some(self.neutral.clone())
                } else {
                    self.profiles.get(&k).cloned()
                }
            });

        match found {
            Some(profile) => ResolvedProfile {
                profile,
                is_fallback: false,
            },
            None => {
                if let Some(requested) = key {
                    tracing::debug!(requested, "unknown content profile, using neutral profile");
                }
                ResolvedProfile {
                    profile: self.neutral.clone(),
                    is_fallback: true,
                }
            }
        }
    }

    /// Profile for a key; the neutral profile when unknown.
    pub fn get(&self, key: Option<&str>) -> Arc<Profile> {
        self.resolve(key).profile
    }

    pub fn contains(&self, key: &str) -> bool {
        !self.resolve(Some(key)).is_fallback
    }

    /// The neutral profile.
    pub fn neutral(&self) -> Arc<Profile> {
        self.neutral.clone()
    }

    /// All registered keys, sorted, excluding the neutral profile.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.profiles.values().map(|p| p.key.clone()).collect();
        keys.sort();
        keys
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ============================================================================
// Built-in Data
// ============================================================================

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn guidance(levels: [&str; 4]) -> [String; 4] {
    levels.map(str::to_string)
}

fn neutral_profile() -> Profile {
    Profile {
        key: NEUTRAL_PROFILE_KEY.to_string(),
        theological_emphases: strings(&["God's love", "grace", "creation", "loving your neighbor"]),
        preferred_sources: strings(&["widely shared Bible passages"]),
        avoided_topics: strings(&["denominational disputes"]),
        preferred_approaches: strings(&[
            "connect ideas to everyday kindness",
            "keep faith references welcoming to every tradition",
        ]),
        guidance_by_level: guidance([
            "Keep the material entirely secular.",
            "Connect the lesson to shared values such as kindness and honesty.",
            "Mention broadly shared Christian themes where they fit naturally.",
            "State core Christian beliefs plainly and reference Scripture directly.",
        ]),
    }
}

fn builtin_profiles() -> Vec<Profile> {
    vec![
        Profile {
            key: "Reformed Baptist".to_string(),
            theological_emphases: strings(&[
                "sovereignty of God",
                "doctrines of grace",
                "believer's baptism",
                "covenant theology",
                "sufficiency of Scripture",
            ]),
            preferred_sources: strings(&["ESV", "1689 London Baptist Confession"]),
            avoided_topics: strings(&["infant baptism", "purgatory"]),
            preferred_approaches: strings(&[
                "ground every point in Scripture",
                "use catechism-style questions",
            ]),
            guidance_by_level: guidance([
                "No religious content.",
                "Emphasize virtues such as diligence and integrity.",
                "Draw attention to God's sovereignty and order in the subject matter.",
                "Teach Reformed Baptist distinctives explicitly with confessional references.",
            ]),
        },
        Profile {
            key: "Catholic".to_string(),
            theological_emphases: strings(&[
                "sacraments",
                "communion of saints",
                "Catholic social teaching",
                "dignity of the human person",
            ]),
            preferred_sources: strings(&["NABRE", "Catechism of the Catholic Church"]),
            avoided_topics: strings(&["anti-Catholic polemics"]),
            preferred_approaches: strings(&[
                "draw on the lives of the saints",
                "link learning to the common good",
            ]),
            guidance_by_level: guidance([
                "No religious content.",
                "Emphasize charity, justice and care for others.",
                "Relate examples to the dignity of the human person and creation.",
                "Teach Catholic doctrine explicitly with Catechism references.",
            ]),
        },
        Profile {
            key: "Lutheran".to_string(),
            theological_emphases: strings(&[
                "justification by faith",
                "law and gospel",
                "theology of the cross",
                "vocation",
            ]),
            preferred_sources: strings(&["ESV", "Small Catechism"]),
            avoided_topics: strings(&["works righteousness"]),
            preferred_approaches: strings(&[
                "frame work and study as vocation",
                "use question-and-answer catechesis",
            ]),
            guidance_by_level: guidance([
                "No religious content.",
                "Emphasize faithfulness in ordinary work.",
                "Present learning as part of one's calling to serve the neighbor.",
                "Teach Lutheran distinctives explicitly with Small Catechism references.",
            ]),
        },
        Profile {
            key: "Methodist".to_string(),
            theological_emphases: strings(&[
                "prevenient grace",
                "sanctification",
                "social holiness",
                "means of grace",
            ]),
            preferred_sources: strings(&["NRSV", "Wesley's sermons"]),
            avoided_topics: strings(&["predestination debates"]),
            preferred_approaches: strings(&[
                "invite practical acts of service",
                "connect personal growth with community",
            ]),
            guidance_by_level: guidance([
                "No religious content.",
                "Emphasize service and growing in good habits.",
                "Show how learning can serve others as an expression of grace.",
                "Teach Wesleyan distinctives explicitly with references to Wesley.",
            ]),
        },
        Profile {
            key: "Pentecostal".to_string(),
            theological_emphases: strings(&[
                "work of the Holy Spirit",
                "spiritual gifts",
                "personal testimony",
                "evangelism",
            ]),
            preferred_sources: strings(&["NKJV"]),
            avoided_topics: strings(&["cessationism"]),
            preferred_approaches: strings(&[
                "use lively, participatory activities",
                "invite students to share experiences",
            ]),
            guidance_by_level: guidance([
                "No religious content.",
                "Emphasize courage, joy and encouragement.",
                "Point to the Spirit's gifts as reasons to use talents well.",
                "Teach Pentecostal distinctives explicitly with Scripture references.",
            ]),
        },
        Profile {
            key: "Anglican".to_string(),
            theological_emphases: strings(&[
                "common prayer",
                "liturgical year",
                "Scripture, tradition and reason",
            ]),
            preferred_sources: strings(&["NRSV", "Book of Common Prayer"]),
            avoided_topics: strings(&["sectarian polemics"]),
            preferred_approaches: strings(&[
                "follow the rhythm of the church calendar",
                "use collects as reflection prompts",
            ]),
            guidance_by_level: guidance([
                "No religious content.",
                "Emphasize reflection, gratitude and order.",
                "Tie topics to the seasons of the church year where it fits.",
                "Teach Anglican distinctives explicitly with Prayer Book references.",
            ]),
        },
    ]
}

// ============================================================================
// Tests
// ============================================================================
