//! Pipeline stage identifiers.

use serde::Serialize;

/// One state of the orchestrator, in execution order.
///
/// `Done` and `Failed` are terminal. Every other state advances to
/// [`next`](Self::next) on success or to `Failed` on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Validating,
    RemovingBackground,
    GeneratingEffects,
    SynthesizingSpeech,
    SyncingLips,
    StoringResult,
    Done,
}

impl PipelineStage {
    /// The five stages that call an external service, in order.
    pub const EXTERNAL: [PipelineStage; 5] = [
        Self::RemovingBackground,
        Self::GeneratingEffects,
        Self::SynthesizingSpeech,
        Self::SyncingLips,
        Self::StoringResult,
    ];

    /// Successor state. `Done` is its own successor.
    pub fn next(self) -> Self {
        match self {
            Self::Validating => Self::RemovingBackground,
            Self::RemovingBackground => Self::GeneratingEffects,
            Self::GeneratingEffects => Self::SynthesizingSpeech,
            Self::SynthesizingSpeech => Self::SyncingLips,
            Self::SyncingLips => Self::StoringResult,
            Self::StoringResult | Self::Done => Self::Done,
        }
    }

    /// Stable snake_case name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::RemovingBackground => "removing_background",
            Self::GeneratingEffects => "generating_effects",
            Self::SynthesizingSpeech => "synthesizing_speech",
            Self::SyncingLips => "syncing_lips",
            Self::StoringResult => "storing_result",
            Self::Done => "done",
        }
    }

    /// Human-readable failure prefix returned to API callers.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Validating => "Invalid image URL",
            Self::RemovingBackground => "Failed to remove background",
            Self::GeneratingEffects => "Failed to generate video effects",
            Self::SynthesizingSpeech => "Failed to generate audio",
            Self::SyncingLips => "Failed to sync lips",
            Self::StoringResult => "Failed to store final video",
            Self::Done => "Pipeline already complete",
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
