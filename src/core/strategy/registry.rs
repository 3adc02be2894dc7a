//! Provider Registry
//!
//! Known provider ids grouped by family, and the set of providers enabled for
//! this process. The registry is built once from configuration and shared
//! read-only.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Capability family a provider belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    Generation,
    Visual,
    Research,
    Social,
    Animation,
}

/// Which kind of request a generation provider is strongest at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedAffinity {
    Creative,
    Technical,
}

/// Identifier of an external provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    // Generation
    OpenAi,
    Anthropic,
    Gemini,
    Mistral,
    // Visual
    DallE,
    Pixabay,
    Unsplash,
    Pexels,
    Wikimedia,
    // Research
    Perplexity,
    NewsApi,
    YouTube,
    // Social
    Padlet,
    Kahoot,
    // Animation
    Giphy,
}

impl ProviderId {
    /// Every known provider, generation providers first in default priority.
    pub const ALL: [ProviderId; 15] = [
        ProviderId::OpenAi,
        ProviderId::Anthropic,
        ProviderId::Gemini,
        ProviderId::Mistral,
        ProviderId::DallE,
        ProviderId::Pixabay,
        ProviderId::Unsplash,
        ProviderId::Pexels,
        ProviderId::Wikimedia,
        ProviderId::Perplexity,
        ProviderId::NewsApi,
        ProviderId::YouTube,
        ProviderId::Padlet,
        ProviderId::Kahoot,
        ProviderId::Giphy,
    ];

    pub fn family(self) -> ProviderFamily {
        match self {
            Self::OpenAi | Self::Anthropic | Self::Gemini | Self::Mistral => {
                ProviderFamily::Generation
            }
            Self::DallE | Self::Pixabay | Self::Unsplash | Self::Pexels | Self::Wikimedia => {
                ProviderFamily::Visual
            }
            Self::Perplexity | Self::NewsApi | Self::YouTube => ProviderFamily::Research,
            Self::Padlet | Self::Kahoot => ProviderFamily::Social,
            Self::Giphy => ProviderFamily::Animation,
        }
    }

    /// Strength of a generation provider; `None` for other families.
    pub fn affinity(self) -> Option<NeedAffinity> {
        match self {
            Self::OpenAi | Self::Mistral => Some(NeedAffinity::Creative),
            Self::Anthropic | Self::Gemini => Some(NeedAffinity::Technical),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Mistral => "mistral",
            Self::DallE => "dalle",
            Self::Pixabay => "pixabay",
            Self::Unsplash => "unsplash",
            Self::Pexels => "pexels",
            Self::Wikimedia => "wikimedia",
            Self::Perplexity => "perplexity",
            Self::NewsApi => "newsapi",
            Self::YouTube => "youtube",
            Self::Padlet => "padlet",
            Self::Kahoot => "kahoot",
            Self::Giphy => "giphy",
        }
    }

    /// Human-readable capability name for user-facing messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Anthropic => "Anthropic Claude",
            Self::Gemini => "Google Gemini",
            Self::Mistral => "Mistral",
            Self::DallE => "DALL-E illustrations",
            Self::Pixabay => "Pixabay clip art",
            Self::Unsplash => "Unsplash photos",
            Self::Pexels => "Pexels photos",
            Self::Wikimedia => "Wikimedia Commons",
            Self::Perplexity => "Perplexity search",
            Self::NewsApi => "NewsAPI",
            Self::YouTube => "YouTube",
            Self::Padlet => "Padlet",
            Self::Kahoot => "Kahoot",
            Self::Giphy => "Giphy animations",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider id string that matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(&['-', '_', ' '][..], "");
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Providers enabled for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRegistry {
    enabled: BTreeSet<ProviderId>,
}

impl ProviderRegistry {
    /// Every known provider enabled.
    pub fn all() -> Self {
        Self {
            enabled: ProviderId::ALL.into_iter().collect(),
        }
    }

    /// Only the listed providers enabled.
    pub fn with_enabled<I: IntoIterator<Item = ProviderId>>(providers: I) -> Self {
        Self {
            enabled: providers.into_iter().collect(),
        }
    }

    /// All providers except the listed ones.
    pub fn without<I: IntoIterator<Item = ProviderId>>(mut self, disabled: I) -> Self {
        for id in disabled {
            self.enabled.remove(&id);
        }
        self
    }

    pub fn is_available(&self, id: ProviderId) -> bool {
        self.enabled.contains(&id)
    }

    /// Enabled providers of a family, in default priority order.
    pub fn family(&self, family: ProviderFamily) -> Vec<ProviderId> {
        ProviderId::ALL
            .into_iter()
            .filter(|id| id.family() == family && self.is_available(*id))
            .collect()
    }

    pub fn generation_providers(&self) -> Vec<ProviderId> {
        self.family(ProviderFamily::Generation)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::all()
    }
}
