//! Generation Progress
//!
//! Percent-complete milestones emitted on an optional side channel.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    Starting,
    Strategy,
    Generating,
    Generated,
    Visual,
    Research,
    Formatting,
    Complete,
}

impl GenerationPhase {
    pub fn percent(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Strategy => 10,
            Self::Generating => 30,
            Self::Generated => 60,
            Self::Visual => 75,
            Self::Research => 85,
            Self::Formatting => 95,
            Self::Complete => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Starting => "Starting",
            Self::Strategy => "Selecting providers",
            Self::Generating => "Generating content",
            Self::Generated => "Content generated",
            Self::Visual => "Adding visuals",
            Self::Research => "Adding research",
            Self::Formatting => "Formatting",
            Self::Complete => "Complete",
        }
    }
}

/// Progress update sent to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationProgress {
    pub phase: GenerationPhase,
    pub percent: u8,
    pub message: String,
}

/// Sends progress if the caller asked for it. A dropped receiver is ignored.
#[derive(Debug, Clone, Default)]
pub(crate) struct ProgressReporter {
    tx: Option<UnboundedSender<GenerationProgress>>,
}

impl ProgressReporter {
    pub(crate) fn new(tx: Option<UnboundedSender<GenerationProgress>>) -> Self {
        Self { tx }
    }

    pub(crate) fn report(&self, phase: GenerationPhase) {
        self.report_with(phase, phase.label());
    }

    pub(crate) fn report_with(&self, phase: GenerationPhase, message: impl Into<String>) {
        if let Some(tx) = &self.tx {
            let _ = tx.send(GenerationProgress {
                phase,
                percent: phase.percent(),
                message: message.into(),
            });
        }
    }
}
