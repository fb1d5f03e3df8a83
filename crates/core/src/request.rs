//! Validation of the raw `/process-video` request body.
//!
//! Fields are checked in a fixed order (image, prompt, message) and the
//! first missing one is reported, matching what API clients already rely
//! on.

use serde::Deserialize;

use crate::error::CoreError;
use crate::types::{EffectsPrompt, Message};

/// Raw request body as received over HTTP. Every field is optional here
/// so that absence is reported as a validation error rather than a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct ProcessVideoRequest {
    pub image_url: Option<String>,
    pub effects_prompt: Option<String>,
    pub message: Option<String>,
}

/// A request whose three fields are present and non-empty.
///
/// The image URL is still unchecked; the validator turns it into an
/// [`ImageReference`](crate::types::ImageReference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub image_url: String,
    pub effects_prompt: EffectsPrompt,
    pub message: Message,
}

impl ProcessVideoRequest {
    /// Check field presence and convert into a [`PipelineRequest`].
    pub fn into_pipeline_request(self) -> Result<PipelineRequest, CoreError> {
        let image_url = require(self.image_url, "No image URL provided")?;
        let effects_prompt = require(self.effects_prompt, "No effects_prompt provided")?;
        let message = require(self.message, "No message provided")?;

        Ok(PipelineRequest {
            image_url,
            effects_prompt: EffectsPrompt::new(effects_prompt),
            message: Message::new(message),
        })
    }
}

fn require(value: Option<String>, error: &str) -> Result<String, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::Validation(error.to_string())),
    }
}
