//! Generation Error Types
//!
//! Provider failures advance the fallback chain; generation errors end it.

use crate::core::strategy::ProviderId;

use super::types::AttemptRecord;

/// Failure of a single provider call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(ProviderId),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),
}

impl ProviderError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Errors that end a generation run
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    #[error("All providers failed; last tried {last_provider}: {cause}")]
    ChainExhausted {
        last_provider: ProviderId,
        attempts: Vec<AttemptRecord>,
        cause: ProviderError,
    },

    /// Attempts made before the run was cancelled, the interrupted one last.
    #[error("Generation cancelled")]
    Cancelled { attempts: Vec<AttemptRecord> },
}

impl GenerationError {
    /// Short summary suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::ChainExhausted {
                last_provider,
                attempts,
                ..
            } => format!(
                "Content generation is currently unavailable. {} provider(s) were tried, the last being {}. Please try again later.",
                attempts.len(),
                last_provider.display_name()
            ),
            Self::Cancelled { .. } => "Content generation was cancelled.".to_string(),
        }
    }
}

/// Result type for generation runs
pub type Result<T> = std::result::Result<T, GenerationError>;
