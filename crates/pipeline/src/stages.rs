//! One trait per external contract, plus the production implementations.
//!
//! The orchestrator only sees these traits, so tests can swap any stage
//! for an in-memory double.

use async_trait::async_trait;
use vidsync_core::error::{CoreError, StageError};
use vidsync_core::types::{EffectsPrompt, ImageReference, MediaReference, Message};
use vidsync_fal::{BackgroundRemover, LipSyncer, VideoEffectsGenerator};
use vidsync_speech::SpeechSynthesizer;
use vidsync_storage::{ImageValidator, ResultStore};

#[async_trait]
pub trait ReferenceValidator: Send + Sync {
    async fn validate(&self, image_url: &str) -> Result<ImageReference, CoreError>;
}

#[async_trait]
pub trait BackgroundRemoval: Send + Sync {
    async fn remove_background(&self, image: &ImageReference)
        -> Result<MediaReference, StageError>;
}

#[async_trait]
pub trait VideoEffects: Send + Sync {
    async fn generate_video_effects(
        &self,
        image: &MediaReference,
        prompt: &EffectsPrompt,
    ) -> Result<MediaReference, StageError>;
}

#[async_trait]
pub trait SpeechSynthesis: Send + Sync {
    async fn synthesize_speech(&self, message: &Message) -> Result<MediaReference, StageError>;
}

#[async_trait]
pub trait LipSync: Send + Sync {
    async fn sync_lips(
        &self,
        video: &MediaReference,
        audio: &MediaReference,
    ) -> Result<MediaReference, StageError>;
}

#[async_trait]
pub trait FinalStore: Send + Sync {
    async fn store_final(&self, video: &MediaReference) -> Result<MediaReference, StageError>;
}

// ---------------------------------------------------------------------------
// Production adapters
// ---------------------------------------------------------------------------

#[async_trait]
impl ReferenceValidator for ImageValidator {
    async fn validate(&self, image_url: &str) -> Result<ImageReference, CoreError> {
        ImageValidator::validate(self, image_url).await
    }
}

#[async_trait]
impl BackgroundRemoval for BackgroundRemover {
    async fn remove_background(
        &self,
        image: &ImageReference,
    ) -> Result<MediaReference, StageError> {
        BackgroundRemover::remove_background(self, image).await
    }
}

#[async_trait]
impl VideoEffects for VideoEffectsGenerator {
    async fn generate_video_effects(
        &self,
        image: &MediaReference,
        prompt: &EffectsPrompt,
    ) -> Result<MediaReference, StageError> {
        VideoEffectsGenerator::generate_video_effects(self, image, prompt).await
    }
}

#[async_trait]
impl SpeechSynthesis for SpeechSynthesizer {
    async fn synthesize_speech(&self, message: &Message) -> Result<MediaReference, StageError> {
        SpeechSynthesizer::synthesize_speech(self, message).await
    }
}

#[async_trait]
impl LipSync for LipSyncer {
    async fn sync_lips(
        &self,
        video: &MediaReference,
        audio: &MediaReference,
    ) -> Result<MediaReference, StageError> {
        LipSyncer::sync_lips(self, video, audio).await
    }
}

#[async_trait]
impl FinalStore for ResultStore {
    async fn store_final(&self, video: &MediaReference) -> Result<MediaReference, StageError> {
        Ok(ResultStore::store_final(self, video).await?)
    }
}
