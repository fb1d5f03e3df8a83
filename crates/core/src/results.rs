//! Typed views over generation-service result payloads.
//!
//! The services answer with loosely shaped JSON. Each type here pulls out
//! the one URL its stage needs and fails closed with
//! [`StageError::MissingField`] when that URL is absent, not a string,
//! or empty.

use serde_json::Value;

use crate::error::StageError;
use crate::types::MediaReference;

/// JSON pointer and display name for the background-removal output.
const IMAGE_URL: (&str, &str) = ("/image/url", "image.url");
/// JSON pointer and display name for video outputs.
const VIDEO_URL: (&str, &str) = ("/video/url", "video.url");

/// Output of the background-removal service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundRemovalResult {
    pub image_url: MediaReference,
}

impl BackgroundRemovalResult {
    pub fn from_response(response: &Value) -> Result<Self, StageError> {
        Ok(Self {
            image_url: required_url(response, IMAGE_URL)?,
        })
    }
}

/// Output of the image-to-video effects service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoEffectsResult {
    pub video_url: MediaReference,
}

impl VideoEffectsResult {
    pub fn from_response(response: &Value) -> Result<Self, StageError> {
        Ok(Self {
            video_url: required_url(response, VIDEO_URL)?,
        })
    }
}

/// Output of the lip-sync service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LipSyncResult {
    pub video_url: MediaReference,
}

impl LipSyncResult {
    pub fn from_response(response: &Value) -> Result<Self, StageError> {
        Ok(Self {
            video_url: required_url(response, VIDEO_URL)?,
        })
    }
}

fn required_url(
    response: &Value,
    (pointer, name): (&str, &'static str),
) -> Result<MediaReference, StageError> {
    match response.pointer(pointer).and_then(Value::as_str) {
        Some(url) if !url.trim().is_empty() => Ok(MediaReference::new(url)),
        _ => Err(StageError::MissingField(name)),
    }
}
