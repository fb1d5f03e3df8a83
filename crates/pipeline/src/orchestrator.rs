//! Sequential pipeline state machine.
//!
//! `Validating -> RemovingBackground -> GeneratingEffects ->
//! SynthesizingSpeech -> SyncingLips -> StoringResult -> Done`, with a
//! jump to failure from any state. A stage runs only after its
//! predecessor succeeded. Artifacts written by earlier stages are left in
//! place when a later one fails.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use vidsync_core::error::StageError;
use vidsync_core::request::PipelineRequest;
use vidsync_core::stage::PipelineStage;
use vidsync_core::types::MediaReference;

use crate::error::PipelineError;
use crate::stages::{
    BackgroundRemoval, FinalStore, LipSync, ReferenceValidator, SpeechSynthesis, VideoEffects,
};

/// The six collaborators a pipeline run needs.
#[derive(Clone)]
pub struct PipelineStages {
    pub validator: Arc<dyn ReferenceValidator>,
    pub background_remover: Arc<dyn BackgroundRemoval>,
    pub video_effects: Arc<dyn VideoEffects>,
    pub speech: Arc<dyn SpeechSynthesis>,
    pub lip_sync: Arc<dyn LipSync>,
    pub result_store: Arc<dyn FinalStore>,
}

/// Runs one request through every stage. Holds no per-request state, so
/// a single instance is shared by all concurrent requests.
#[derive(Clone)]
pub struct Pipeline {
    stages: PipelineStages,
}

impl Pipeline {
    pub fn new(stages: PipelineStages) -> Self {
        Self { stages }
    }

    /// Run the full pipeline and return the durable final video reference.
    pub async fn run(&self, request: &PipelineRequest) -> Result<MediaReference, PipelineError> {
        let mut cursor = StageCursor::start();

        let image = match self.stages.validator.validate(&request.image_url).await {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!(stage = %cursor.stage, error = %e, "Image reference rejected");
                return Err(PipelineError::InvalidReference(e));
            }
        };
        cursor.advance();

        let cutout = cursor
            .step(self.stages.background_remover.remove_background(&image))
            .await?;

        let effects_video = cursor
            .step(
                self.stages
                    .video_effects
                    .generate_video_effects(&cutout, &request.effects_prompt),
            )
            .await?;

        let audio = cursor
            .step(self.stages.speech.synthesize_speech(&request.message))
            .await?;

        let synced = cursor
            .step(self.stages.lip_sync.sync_lips(&effects_video, &audio))
            .await?;

        let stored = cursor
            .step(self.stages.result_store.store_final(&synced))
            .await?;

        debug_assert_eq!(cursor.stage, PipelineStage::Done);
        tracing::info!(
            video_url = %stored,
            elapsed_ms = cursor.run_started.elapsed().as_millis() as u64,
            "Pipeline complete",
        );
        Ok(stored)
    }
}

/// Tracks the current state and advances it one stage at a time.
struct StageCursor {
    stage: PipelineStage,
    run_started: Instant,
}

impl StageCursor {
    fn start() -> Self {
        Self {
            stage: PipelineStage::Validating,
            run_started: Instant::now(),
        }
    }

    fn advance(&mut self) {
        let next = self.stage.next();
        tracing::debug!(from = %self.stage, to = %next, "Pipeline transition");
        self.stage = next;
    }

    /// Await the current stage's call. On success move to the next state;
    /// on failure tag the error with the current state and stop.
    async fn step<T, F>(&mut self, call: F) -> Result<T, PipelineError>
    where
        F: Future<Output = Result<T, StageError>>,
    {
        let stage = self.stage;
        let started = Instant::now();
        tracing::info!(%stage, "Stage started");

        match call.await {
            Ok(value) => {
                tracing::info!(
                    %stage,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Stage completed",
                );
                self.advance();
                Ok(value)
            }
            Err(source) => {
                tracing::error!(
                    %stage,
                    error = %source,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Stage failed",
                );
                Err(PipelineError::Stage { stage, source })
            }
        }
    }
}
