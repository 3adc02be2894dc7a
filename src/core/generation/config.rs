//! Orchestrator Configuration

use std::time::Duration;

/// Default per-call timeout for generation providers.
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(15);

/// Default per-call timeout for enrichment providers.
pub const DEFAULT_ENRICHMENT_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Timeout for each generation provider call
    pub generation_timeout: Duration,
    /// Timeout for each visual or research enrichment call
    pub enrichment_timeout: Duration,
    /// Whether a failed provider advances to the next backup
    pub enable_fallback: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            enrichment_timeout: DEFAULT_ENRICHMENT_TIMEOUT,
            enable_fallback: true,
        }
    }
}
