//! Provider Traits
//!
//! The orchestrator treats every external service as an opaque async call.

use async_trait::async_trait;

use super::error::ProviderError;
use super::types::{EnrichmentContext, StructuredContent};
use crate::core::strategy::ProviderId;

/// A content generation back-end: prompt in, raw text out.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn invoke(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// A visual or research service that decorates generated content.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrichmentProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    async fn enrich(
        &self,
        content: StructuredContent,
        context: &EnrichmentContext,
    ) -> Result<StructuredContent, ProviderError>;
}
