use vidsync_core::error::{CoreError, StageError};
use vidsync_core::stage::PipelineStage;

/// Terminal failure of a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The image reference was rejected before any external stage ran.
    #[error("Invalid image URL: {0}")]
    InvalidReference(CoreError),

    /// An external stage failed; later stages were not invoked.
    #[error("{}: {source}", .stage.failure_message())]
    Stage {
        stage: PipelineStage,
        source: StageError,
    },
}

impl PipelineError {
    /// The state the pipeline was in when it failed.
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::InvalidReference(_) => PipelineStage::Validating,
            Self::Stage { stage, .. } => *stage,
        }
    }
}
