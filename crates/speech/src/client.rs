//! REST client for the text-to-speech service.

use serde::Serialize;
use vidsync_core::error::StageError;

/// Default service endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";
/// Default synthesis model.
pub const DEFAULT_MODEL_ID: &str = "eleven_monolingual_v1";
/// Voice used when none is configured.
pub const DEFAULT_VOICE_ID: &str = "default_voice_id";
/// Default value for both voice-quality parameters.
pub const DEFAULT_VOICE_PARAMETER: f32 = 0.5;

/// Process-wide voice settings. Not adjustable per request.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub api_key: String,
    pub base_url: String,
    pub voice_id: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Errors from the text-to-speech REST layer.
#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Speech API error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

impl From<SpeechError> for StageError {
    fn from(err: SpeechError) -> Self {
        match err {
            SpeechError::Request(e) => StageError::Transport(e.to_string()),
            SpeechError::ApiError { status, body } => StageError::HttpStatus { status, body },
        }
    }
}

/// HTTP client for the text-to-speech endpoint. Cheap to clone.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
    config: VoiceConfig,
}

impl SpeechClient {
    pub fn new(config: VoiceConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: VoiceConfig) -> Self {
        Self { client, config }
    }

    /// Synthesize `text` with the configured voice and return MP3 bytes.
    pub async fn text_to_speech(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.voice_id
        );
        let body = SynthesisRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .header("xi-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(status = status.as_u16(), body = %body, "Speech API error");
            return Err(SpeechError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}
