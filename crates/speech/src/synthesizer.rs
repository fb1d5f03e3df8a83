//! Speech synthesis stage: text in, durable public audio URL out.

use vidsync_core::error::StageError;
use vidsync_core::naming::{unique_object_name, AUDIO_OBJECT};
use vidsync_core::types::{MediaReference, Message};
use vidsync_storage::StorageClient;

use crate::client::SpeechClient;

const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Synthesizes a message and persists the audio to the generated-audio
/// bucket so the lip-sync service can fetch it by URL.
#[derive(Debug, Clone)]
pub struct SpeechSynthesizer {
    speech: SpeechClient,
    storage: StorageClient,
}

impl SpeechSynthesizer {
    pub fn new(speech: SpeechClient, storage: StorageClient) -> Self {
        Self { speech, storage }
    }

    /// Each successful call leaves one new audio object in storage.
    pub async fn synthesize_speech(&self, message: &Message) -> Result<MediaReference, StageError> {
        let audio = self.speech.text_to_speech(message.as_str()).await?;
        tracing::debug!(size = audio.len(), "Synthesized speech");

        let bucket = &self.storage.config().generated_audio_bucket;
        let name = unique_object_name(AUDIO_OBJECT);
        let reference = self
            .storage
            .store(bucket, &name, audio, AUDIO_CONTENT_TYPE)
            .await?;

        tracing::info!(bucket, object = %name, url = %reference, "Stored synthesized audio");
        Ok(reference)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use vidsync_storage::StorageConfig;
    use wiremock::matchers::{body_bytes, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::tests::test_voice;

    fn storage(base_url: &str) -> StorageClient {
        StorageClient::new(StorageConfig {
            base_url: base_url.to_string(),
            api_key: "service-key".to_string(),
            source_images_bucket: "user-images".to_string(),
            generated_audio_bucket: "generated-audio".to_string(),
            final_videos_bucket: "final-videos".to_string(),
        })
    }

    #[tokio::test]
    async fn stores_audio_and_returns_public_url() {
        let tts = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/text-to-speech/voice-42"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
            .mount(&tts)
            .await;

        let store = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/storage/v1/object/generated-audio/audio_\d+_[0-9a-f]{32}\.mp3$"))
            .and(body_bytes(b"mp3".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&store)
            .await;

        let synthesizer =
            SpeechSynthesizer::new(SpeechClient::new(test_voice(&tts.uri())), storage(&store.uri()));
        let reference = synthesizer
            .synthesize_speech(&Message::new("hello world"))
            .await
            .unwrap();

        let prefix = format!("{}/storage/v1/object/public/generated-audio/audio_", store.uri());
        assert!(reference.as_str().starts_with(&prefix));
    }

    #[tokio::test]
    async fn speech_failure_writes_nothing() {
        let tts = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&tts)
            .await;

        let store = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&store)
            .await;

        let synthesizer =
            SpeechSynthesizer::new(SpeechClient::new(test_voice(&tts.uri())), storage(&store.uri()));
        let err = synthesizer
            .synthesize_speech(&Message::new("hello"))
            .await
            .unwrap_err();
        assert_matches!(err, StageError::HttpStatus { status: 500, .. });
    }

    #[tokio::test]
    async fn upload_failure_is_storage_error() {
        let tts = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp3".to_vec()))
            .mount(&tts)
            .await;

        let store = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("bucket policy"))
            .mount(&store)
            .await;

        let synthesizer =
            SpeechSynthesizer::new(SpeechClient::new(test_voice(&tts.uri())), storage(&store.uri()));
        let err = synthesizer
            .synthesize_speech(&Message::new("hello"))
            .await
            .unwrap_err();
        assert_matches!(err, StageError::Storage(_));
    }
}
