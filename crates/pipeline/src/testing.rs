//! In-memory stage doubles for orchestrator and HTTP tests.
//!
//! One [`MockServices`] value implements every stage trait, records the
//! order in which stages were called and the inputs each one received,
//! and can be told to fail at a given stage.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use vidsync_core::error::{CoreError, StageError};
use vidsync_core::stage::PipelineStage;
use vidsync_core::types::{EffectsPrompt, ImageReference, MediaReference, Message};

use crate::orchestrator::PipelineStages;
use crate::stages::{
    BackgroundRemoval, FinalStore, LipSync, ReferenceValidator, SpeechSynthesis, VideoEffects,
};

pub const CUTOUT_URL: &str = "https://cdn.test/cutout.png";
pub const EFFECTS_URL: &str = "https://cdn.test/effects.mp4";
pub const AUDIO_URL: &str = "https://store.test/generated-audio/audio.mp3";
pub const SYNCED_URL: &str = "https://cdn.test/synced.mp4";
pub const FINAL_URL: &str = "https://store.test/final-videos/final_video.mp4";

/// Inputs observed by the stages of the last run.
#[derive(Debug, Default, Clone)]
pub struct ObservedInputs {
    pub image: Option<String>,
    pub effects_image: Option<String>,
    pub effects_prompt: Option<String>,
    pub message: Option<String>,
    pub lipsync: Option<(String, String)>,
    pub stored: Option<String>,
}

#[derive(Default)]
struct Recorded {
    calls: Vec<PipelineStage>,
    inputs: ObservedInputs,
}

/// Configurable double for all six stages.
#[derive(Clone)]
pub struct MockServices {
    recorded: Arc<Mutex<Recorded>>,
    reject_reference: bool,
    fail_at: Option<(PipelineStage, fn() -> StageError)>,
}

impl MockServices {
    /// Every stage returns a well-formed result.
    pub fn succeeding() -> Self {
        Self {
            recorded: Arc::default(),
            reject_reference: false,
            fail_at: None,
        }
    }

    /// The validator rejects every reference.
    pub fn rejecting_reference() -> Self {
        Self {
            reject_reference: true,
            ..Self::succeeding()
        }
    }

    /// `stage` returns the error built by `error`; earlier stages succeed.
    pub fn failing_at(stage: PipelineStage, error: fn() -> StageError) -> Self {
        Self {
            fail_at: Some((stage, error)),
            ..Self::succeeding()
        }
    }

    /// Wire this double into every slot of a [`PipelineStages`].
    pub fn stages(&self) -> PipelineStages {
        let shared = Arc::new(self.clone());
        PipelineStages {
            validator: shared.clone(),
            background_remover: shared.clone(),
            video_effects: shared.clone(),
            speech: shared.clone(),
            lip_sync: shared.clone(),
            result_store: shared,
        }
    }

    /// Stages invoked so far, in call order.
    pub fn calls(&self) -> Vec<PipelineStage> {
        self.lock().calls.clone()
    }

    pub fn inputs(&self) -> ObservedInputs {
        self.lock().inputs.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the call and return the configured outcome for `stage`.
    fn enter(
        &self,
        stage: PipelineStage,
        output: &str,
        record: impl FnOnce(&mut ObservedInputs),
    ) -> Result<MediaReference, StageError> {
        let mut recorded = self.lock();
        recorded.calls.push(stage);
        record(&mut recorded.inputs);
        match self.fail_at {
            Some((failing, error)) if failing == stage => Err(error()),
            _ => Ok(MediaReference::new(output)),
        }
    }
}

#[async_trait]
impl ReferenceValidator for MockServices {
    async fn validate(&self, image_url: &str) -> Result<ImageReference, CoreError> {
        let mut recorded = self.lock();
        recorded.calls.push(PipelineStage::Validating);
        recorded.inputs.image = Some(image_url.to_string());
        if self.reject_reference {
            Err(CoreError::InvalidReference("rejected by mock".into()))
        } else {
            Ok(ImageReference::new_validated(image_url))
        }
    }
}

#[async_trait]
impl BackgroundRemoval for MockServices {
    async fn remove_background(
        &self,
        _image: &ImageReference,
    ) -> Result<MediaReference, StageError> {
        self.enter(PipelineStage::RemovingBackground, CUTOUT_URL, |_| {})
    }
}

#[async_trait]
impl VideoEffects for MockServices {
    async fn generate_video_effects(
        &self,
        image: &MediaReference,
        prompt: &EffectsPrompt,
    ) -> Result<MediaReference, StageError> {
        self.enter(PipelineStage::GeneratingEffects, EFFECTS_URL, |inputs| {
            inputs.effects_image = Some(image.to_string());
            inputs.effects_prompt = Some(prompt.as_str().to_string());
        })
    }
}

#[async_trait]
impl SpeechSynthesis for MockServices {
    async fn synthesize_speech(&self, message: &Message) -> Result<MediaReference, StageError> {
        self.enter(PipelineStage::SynthesizingSpeech, AUDIO_URL, |inputs| {
            inputs.message = Some(message.as_str().to_string());
        })
    }
}

#[async_trait]
impl LipSync for MockServices {
    async fn sync_lips(
        &self,
        video: &MediaReference,
        audio: &MediaReference,
    ) -> Result<MediaReference, StageError> {
        self.enter(PipelineStage::SyncingLips, SYNCED_URL, |inputs| {
            inputs.lipsync = Some((video.to_string(), audio.to_string()));
        })
    }
}

#[async_trait]
impl FinalStore for MockServices {
    async fn store_final(&self, video: &MediaReference) -> Result<MediaReference, StageError> {
        self.enter(PipelineStage::StoringResult, FINAL_URL, |inputs| {
            inputs.stored = Some(video.to_string());
        })
    }
}
