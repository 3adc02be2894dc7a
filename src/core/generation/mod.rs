//! Generation Orchestrator
//!
//! Executes an [`ApiStrategy`] for one prompt:
//! - tries `[primary, ..backup]` in order, one call at a time
//! - bounds every call with a per-class timeout
//! - stops at once when the caller's [`CancellationToken`] fires
//! - runs visual then research enrichment, skipping any that fail
//! - reports percent-complete progress on an optional channel

mod builder;
mod cancel;
mod config;
mod error;
mod progress;
mod provider;
mod stats;
mod types;


// Re-export public API
pub use builder::GenerationOrchestratorBuilder;
pub use cancel::CancellationToken;
pub use config::{OrchestratorConfig, DEFAULT_ENRICHMENT_TIMEOUT, DEFAULT_GENERATION_TIMEOUT};
pub use error::{GenerationError, ProviderError, Result};
pub use progress::{GenerationPhase, GenerationProgress};
pub use provider::{EnrichmentProvider, GenerationProvider};
pub use stats::ProviderStats;
pub use types::{
    AttemptOutcome, AttemptRecord, ContentItem, EnrichmentContext, EnrichmentOutcome,
    GeneratedContent, ImageAsset, ResourceLink, StructuredContent,
};

#[cfg(test)]
pub use provider::MockEnrichmentProvider;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::core::adaptation::{apply_adaptation, Adaptation};
use crate::core::strategy::{ApiStrategy, ProviderId};
use progress::ProgressReporter;

// ============================================================================
// Options
// ============================================================================

/// Per-run options for [`GenerationOrchestrator::generate_with`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Adaptation used to augment the prompt and filter the result
    pub adaptation: Option<Adaptation>,
    /// Request details passed to enrichment providers
    pub context: Option<EnrichmentContext>,
    pub progress: Option<UnboundedSender<GenerationProgress>>,
    pub cancel: Option<CancellationToken>,
}

impl GenerateOptions {
    pub fn with_adaptation(mut self, adaptation: Adaptation) -> Self {
        self.adaptation = Some(adaptation);
        self
    }

    pub fn with_context(mut self, context: EnrichmentContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_progress(mut self, tx: UnboundedSender<GenerationProgress>) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Append the adaptation's guidelines to a prompt.
pub fn augment_prompt(prompt: &str, adaptation: &Adaptation) -> String {
    match adaptation.prompt_block() {
        Some(block) => format!("{}\n\n{}", prompt.trim_end(), block),
        None => prompt.to_string(),
    }
}

/// Outcome of one bounded call.
enum Call<T> {
    Done(std::result::Result<T, ProviderError>),
    Cancelled,
}

/// Run a provider future under a timeout, dropping it if the token fires.
async fn bounded<T, F>(fut: F, limit: Duration, cancel: Option<&CancellationToken>) -> Call<T>
where
    F: Future<Output = std::result::Result<T, ProviderError>>,
{
    let timed = async {
        match timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(ProviderError::Timeout(limit.as_millis() as u64)),
        }
    };

    match cancel {
        Some(token) => tokio::select! {
            biased;
            _ = token.cancelled() => Call::Cancelled,
            result = timed => Call::Done(result),
        },
        None => Call::Done(timed.await),
    }
}

// ============================================================================
// Generation Orchestrator
// ============================================================================

/// Runs strategies against registered providers
#[derive(Clone)]
pub struct GenerationOrchestrator {
    generation: HashMap<ProviderId, Arc<dyn GenerationProvider>>,
    enrichment: HashMap<ProviderId, Arc<dyn EnrichmentProvider>>,
    stats: Arc<RwLock<HashMap<ProviderId, ProviderStats>>>,
    config: OrchestratorConfig,
}

impl GenerationOrchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self {
            generation: HashMap::new(),
            enrichment: HashMap::new(),
            stats: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(OrchestratorConfig::default())
    }

    pub fn builder() -> GenerationOrchestratorBuilder {
        GenerationOrchestratorBuilder::new()
    }

    pub fn add_generation_provider(&mut self, provider: Arc<dyn GenerationProvider>) {
        self.generation.insert(provider.id(), provider);
    }

    pub fn add_enrichment_provider(&mut self, provider: Arc<dyn EnrichmentProvider>) {
        self.enrichment.insert(provider.id(), provider);
    }

    /// Ids of registered generation providers, sorted.
    pub fn generation_provider_ids(&self) -> Vec<ProviderId> {
        let mut ids: Vec<_> = self.generation.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub async fn get_stats(&self, id: ProviderId) -> Option<ProviderStats> {
        self.stats.read().await.get(&id).cloned()
    }

    pub async fn get_all_stats(&self) -> HashMap<ProviderId, ProviderStats> {
        self.stats.read().await.clone()
    }

    async fn record_success(&self, id: ProviderId, latency_ms: u64) {
        self.stats
            .write()
            .await
            .entry(id)
            .or_default()
            .record_success(latency_ms);
    }

    async fn record_failure(&self, id: ProviderId, timed_out: bool) {
        self.stats
            .write()
            .await
            .entry(id)
            .or_default()
            .record_failure(timed_out);
    }

    /// Generate content for a prompt with default options.
    pub async fn generate(&self, prompt: &str, strategy: &ApiStrategy) -> Result<GeneratedContent> {
        self.generate_with(prompt, strategy, GenerateOptions::default())
            .await
    }

    /// Generate content, falling back through the strategy's backup chain.
    pub async fn generate_with(
        &self,
        prompt: &str,
        strategy: &ApiStrategy,
        options: GenerateOptions,
    ) -> Result<GeneratedContent> {
        let progress = ProgressReporter::new(options.progress.clone());
        let cancel = options.cancel.as_ref();
        progress.report(GenerationPhase::Starting);

        let prompt = match &options.adaptation {
            Some(adaptation) => augment_prompt(prompt, adaptation),
            None => prompt.to_string(),
        };
        let chain = strategy.generation_chain();
        progress.report_with(
            GenerationPhase::Strategy,
            format!("Using {} with {} backup(s)", strategy.primary, strategy.backup.len()),
        );

        if let Some(first) = chain.first() {
            progress.report_with(GenerationPhase::Generating, format!("Generating with {}", first));
        }
        let (mut content, provider, attempts) = self.run_chain(&prompt, &chain, cancel).await?;
        progress.report_with(GenerationPhase::Generated, format!("Generated by {}", provider));

        let context = options.context.clone().unwrap_or_default();
        let mut enrichments = Vec::new();
        let stages = [
            (strategy.visual, GenerationPhase::Visual),
            (strategy.research, GenerationPhase::Research),
        ];
        for (id, phase) in stages {
            let Some(id) = id else { continue };
            let (enriched, outcome) = self.enrich(id, content, &context, cancel).await;
            content = enriched;
            enrichments.push(outcome);
            progress.report(phase);
        }

        progress.report(GenerationPhase::Formatting);
        if let Some(adaptation) = &options.adaptation {
            content.map_text(|text| apply_adaptation(text, adaptation));
        }
        progress.report(GenerationPhase::Complete);

        Ok(GeneratedContent {
            content,
            provider,
            attempts,
            enrichments,
        })
    }

    /// Try each provider in turn until one returns well-formed content.
    async fn run_chain(
        &self,
        prompt: &str,
        chain: &[ProviderId],
        cancel: Option<&CancellationToken>,
    ) -> Result<(StructuredContent, ProviderId, Vec<AttemptRecord>)> {
        let mut attempts = Vec::new();
        let mut last_error: Option<(ProviderId, ProviderError)> = None;

        for &id in chain {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                return Err(GenerationError::Cancelled { attempts });
            }

            let Some(provider) = self.generation.get(&id) else {
                let error = ProviderError::NotConfigured(id);
                debug!(provider = %id, "Skipping unregistered provider");
                attempts.push(AttemptRecord::failed(id, &error, 0));
                last_error = Some((id, error));
                continue;
            };

            if !attempts.is_empty() {
                info!(provider = %id, "Falling back to backup provider");
            }
            let start = Instant::now();
            let call = bounded(provider.invoke(prompt), self.config.generation_timeout, cancel).await;
            let latency = start.elapsed().as_millis() as u64;

            let result = match call {
                Call::Cancelled => {
                    info!(provider = %id, latency_ms = latency, "Generation cancelled");
                    attempts.push(AttemptRecord::cancelled(id, latency));
                    return Err(GenerationError::Cancelled { attempts });
                }
                Call::Done(result) => result,
            };
            let timed_out = matches!(result, Err(ProviderError::Timeout(_)));

            match result.and_then(|raw| StructuredContent::parse(&raw)) {
                Ok(content) => {
                    self.record_success(id, latency).await;
                    info!(provider = %id, latency_ms = latency, "Generation succeeded");
                    attempts.push(AttemptRecord::succeeded(id, latency));
                    return Ok((content, id, attempts));
                }
                Err(error) => {
                    self.record_failure(id, timed_out).await;
                    warn!(provider = %id, latency_ms = latency, error = %error, "Generation failed");
                    attempts.push(AttemptRecord::failed(id, &error, latency));
                    last_error = Some((id, error));

                    if !self.config.enable_fallback {
                        break;
                    }
                }
            }
        }

        let (last_provider, cause) = last_error.unwrap_or_else(|| {
            let id = chain.first().copied().unwrap_or(ProviderId::OpenAi);
            (id, ProviderError::NotConfigured(id))
        });
        Err(GenerationError::ChainExhausted {
            last_provider,
            attempts,
            cause,
        })
    }

    /// Run one enrichment provider. Failures leave the content unchanged.
    async fn enrich(
        &self,
        id: ProviderId,
        content: StructuredContent,
        context: &EnrichmentContext,
        cancel: Option<&CancellationToken>,
    ) -> (StructuredContent, EnrichmentOutcome) {
        let skipped = |reason: String| EnrichmentOutcome::Skipped {
            provider: id,
            reason,
        };

        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return (content, skipped("cancelled".to_string()));
        }
        let Some(provider) = self.enrichment.get(&id) else {
            debug!(provider = %id, "No enrichment provider registered");
            return (content, skipped(ProviderError::NotConfigured(id).to_string()));
        };

        let start = Instant::now();
        let call = bounded(
            provider.enrich(content.clone(), context),
            self.config.enrichment_timeout,
            cancel,
        )
        .await;
        let latency = start.elapsed().as_millis() as u64;

        match call {
            Call::Done(Ok(enriched)) => {
                self.record_success(id, latency).await;
                debug!(provider = %id, latency_ms = latency, "Enrichment applied");
                (enriched, EnrichmentOutcome::Applied { provider: id })
            }
            Call::Done(Err(error)) => {
                self.record_failure(id, matches!(error, ProviderError::Timeout(_)))
                    .await;
                warn!(provider = %id, error = %error, "Enrichment failed, continuing without it");
                (content, skipped(error.to_string()))
            }
            Call::Cancelled => {
                info!(provider = %id, "Enrichment cancelled");
                (content, skipped("cancelled".to_string()))
            }
        }
    }
}
