//! Pipeline adapters for the three hosted models.
//!
//! Each adapter knows its model's application id and argument names, runs
//! the request through [`FalQueueApi::subscribe`] and reads the result
//! through the matching typed result from `vidsync_core::results`.

use serde_json::json;
use vidsync_core::error::StageError;
use vidsync_core::results::{BackgroundRemovalResult, LipSyncResult, VideoEffectsResult};
use vidsync_core::types::{EffectsPrompt, ImageReference, MediaReference};

use crate::api::FalQueueApi;

/// Background removal model.
pub const BACKGROUND_REMOVAL_APP: &str = "fal-ai/bria/background/remove";
/// Image-to-video effects model.
pub const VIDEO_EFFECTS_APP: &str = "fal-ai/pixverse/v4.5/image-to-video/fast";
/// Lip-sync model.
pub const LIPSYNC_APP: &str = "veed/lipsync";

/// Cuts the subject out of the user's image.
#[derive(Debug, Clone)]
pub struct BackgroundRemover {
    api: FalQueueApi,
}

impl BackgroundRemover {
    pub fn new(api: FalQueueApi) -> Self {
        Self { api }
    }

    pub async fn remove_background(
        &self,
        image: &ImageReference,
    ) -> Result<MediaReference, StageError> {
        let response = self
            .api
            .subscribe(BACKGROUND_REMOVAL_APP, &json!({ "image_url": image.as_str() }))
            .await?;
        Ok(BackgroundRemovalResult::from_response(&response)?.image_url)
    }
}

/// Animates the cut-out image according to a free-text prompt.
#[derive(Debug, Clone)]
pub struct VideoEffectsGenerator {
    api: FalQueueApi,
}

impl VideoEffectsGenerator {
    pub fn new(api: FalQueueApi) -> Self {
        Self { api }
    }

    pub async fn generate_video_effects(
        &self,
        image: &MediaReference,
        prompt: &EffectsPrompt,
    ) -> Result<MediaReference, StageError> {
        let arguments = json!({
            "image_url": image.as_str(),
            "prompt": prompt.as_str(),
        });
        let response = self.api.subscribe(VIDEO_EFFECTS_APP, &arguments).await?;
        Ok(VideoEffectsResult::from_response(&response)?.video_url)
    }
}

/// Re-times the mouth movement of a video to an audio track.
#[derive(Debug, Clone)]
pub struct LipSyncer {
    api: FalQueueApi,
}

impl LipSyncer {
    pub fn new(api: FalQueueApi) -> Self {
        Self { api }
    }

    pub async fn sync_lips(
        &self,
        video: &MediaReference,
        audio: &MediaReference,
    ) -> Result<MediaReference, StageError> {
        let arguments = json!({
            "video_url": video.as_str(),
            "audio_url": audio.as_str(),
        });
        let response = self.api.subscribe(LIPSYNC_APP, &arguments).await?;
        Ok(LipSyncResult::from_response(&response)?.video_url)
    }
}
