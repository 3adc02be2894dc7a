//! Orchestrator Builder

use std::sync::Arc;
use std::time::Duration;

use super::config::OrchestratorConfig;
use super::provider::{EnrichmentProvider, GenerationProvider};
use super::GenerationOrchestrator;

/// Builder for constructing a GenerationOrchestrator
pub struct GenerationOrchestratorBuilder {
    config: OrchestratorConfig,
    generation: Vec<Arc<dyn GenerationProvider>>,
    enrichment: Vec<Arc<dyn EnrichmentProvider>>,
}

impl GenerationOrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            config: OrchestratorConfig::default(),
            generation: Vec::new(),
            enrichment: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn add_generation_provider(mut self, provider: Arc<dyn GenerationProvider>) -> Self {
        self.generation.push(provider);
        self
    }

    pub fn add_enrichment_provider(mut self, provider: Arc<dyn EnrichmentProvider>) -> Self {
        self.enrichment.push(provider);
        self
    }

    pub fn with_generation_timeout(mut self, timeout: Duration) -> Self {
        self.config.generation_timeout = timeout;
        self
    }

    pub fn with_enrichment_timeout(mut self, timeout: Duration) -> Self {
        self.config.enrichment_timeout = timeout;
        self
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.config.enable_fallback = enabled;
        self
    }

    pub fn build(self) -> GenerationOrchestrator {
        let mut orchestrator = GenerationOrchestrator::new(self.config);
        for provider in self.generation {
            orchestrator.add_generation_provider(provider);
        }
        for provider in self.enrichment {
            orchestrator.add_enrichment_provider(provider);
        }
        orchestrator
    }
}

impl Default for GenerationOrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
