//! Persisting the finished video to durable storage.

use vidsync_core::naming::{unique_object_name, FINAL_VIDEO_OBJECT};
use vidsync_core::types::MediaReference;

use crate::client::{StorageClient, StorageError};

const VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// Downloads a transient video from the generation service and stores a
/// durable copy in the final-videos bucket.
#[derive(Debug, Clone)]
pub struct ResultStore {
    storage: StorageClient,
}

impl ResultStore {
    pub fn new(storage: StorageClient) -> Self {
        Self { storage }
    }

    /// Download `video` and return the public reference of the stored copy.
    ///
    /// Every call writes a new object; nothing is deduplicated or removed.
    pub async fn store_final(&self, video: &MediaReference) -> Result<MediaReference, StorageError> {
        let bytes = self.storage.download(video.as_str()).await?;
        tracing::debug!(url = %video, size = bytes.len(), "Downloaded final video");

        let bucket = &self.storage.config().final_videos_bucket;
        let name = unique_object_name(FINAL_VIDEO_OBJECT);
        let stored = self
            .storage
            .store(bucket, &name, bytes, VIDEO_CONTENT_TYPE)
            .await?;

        tracing::info!(bucket, object = %name, url = %stored, "Stored final video");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_bytes, header, method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::client::tests::test_config;

    #[tokio::test]
    async fn downloads_then_uploads_to_final_bucket() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/files/synced.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4data".to_vec()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path_regex(r"^/storage/v1/object/final-videos/final_video_\d+_[0-9a-f]{32}\.mp4$"))
            .and(header("content-type", "video/mp4"))
            .and(body_bytes(b"mp4data".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let store = ResultStore::new(StorageClient::new(test_config(&server.uri())));
        let source = MediaReference::new(format!("{}/files/synced.mp4", server.uri()));
        let stored = store.store_final(&source).await.unwrap();

        let prefix = format!("{}/storage/v1/object/public/final-videos/", server.uri());
        assert!(stored.as_str().starts_with(&prefix));
    }

    #[tokio::test]
    async fn failed_download_skips_upload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = ResultStore::new(StorageClient::new(test_config(&server.uri())));
        let source = MediaReference::new(format!("{}/files/gone.mp4", server.uri()));
        assert_matches!(
            store.store_final(&source).await,
            Err(StorageError::Download { status: 404, .. })
        );
    }

    #[tokio::test]
    async fn identical_inputs_produce_distinct_objects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"x".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let store = ResultStore::new(StorageClient::new(test_config(&server.uri())));
        let source = MediaReference::new(format!("{}/files/v.mp4", server.uri()));
        let first = store.store_final(&source).await.unwrap();
        let second = store.store_final(&source).await.unwrap();
        assert_ne!(first, second);
    }
}
