use std::sync::Arc;

use vidsync_fal::{BackgroundRemover, FalQueueApi, LipSyncer, VideoEffectsGenerator};
use vidsync_pipeline::{Pipeline, PipelineStages};
use vidsync_speech::{SpeechClient, SpeechSynthesizer};
use vidsync_storage::{ImageValidator, ResultStore, StorageClient};

use crate::config::{ServerConfig, ServiceConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Nothing in it is
/// mutable, so concurrent requests never contend on it.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The narrated-video pipeline with its stage adapters.
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(config: ServerConfig, pipeline: Pipeline) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Wire the production stage adapters from service configuration.
///
/// All adapters share one [`reqwest::Client`] and therefore one
/// connection pool.
pub fn build_stages(services: &ServiceConfig, http: reqwest::Client) -> PipelineStages {
    let storage = StorageClient::with_client(http.clone(), services.storage.clone());
    let fal = FalQueueApi::with_client(http.clone(), services.fal.clone());
    let speech = SpeechClient::with_client(http, services.voice.clone());

    PipelineStages {
        validator: Arc::new(ImageValidator::new(storage.clone())),
        background_remover: Arc::new(BackgroundRemover::new(fal.clone())),
        video_effects: Arc::new(VideoEffectsGenerator::new(fal.clone())),
        speech: Arc::new(SpeechSynthesizer::new(speech, storage.clone())),
        lip_sync: Arc::new(LipSyncer::new(fal)),
        result_store: Arc::new(ResultStore::new(storage)),
    }
}
