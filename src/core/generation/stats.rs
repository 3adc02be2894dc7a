//! Provider Statistics
//!
//! Per-provider call counters kept by the orchestrator.

use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub timeouts: u64,
    pub total_latency_ms: u64,
    #[serde(skip)]
    pub last_used: Option<Instant>,
}

impl ProviderStats {
    pub fn avg_latency_ms(&self) -> u64 {
        if self.successful_requests == 0 {
            0
        } else {
            self.total_latency_ms / self.successful_requests
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            1.0
        } else {
            self.successful_requests as f64 / self.total_requests as f64
        }
    }

    pub fn record_success(&mut self, latency_ms: u64) {
        self.total_requests += 1;
        self.successful_requests += 1;
        self.total_latency_ms += latency_ms;
        self.last_used = Some(Instant::now());
    }

    pub fn record_failure(&mut self, timed_out: bool) {
        self.total_requests += 1;
        self.failed_requests += 1;
        if timed_out {
            self.timeouts += 1;
        }
        self.last_used = Some(Instant::now());
    }
}
