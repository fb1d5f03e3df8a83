//! REST client for the object storage backend.
//!
//! Wraps the storage HTTP API (object upload, public URL resolution and
//! a `HEAD` existence probe) using [`reqwest`].

use vidsync_core::error::StageError;
use vidsync_core::types::MediaReference;

/// Path segment under which every storage endpoint lives.
const OBJECT_PATH: &str = "storage/v1/object";

/// Connection settings and bucket names for the storage backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`. Also the trusted
    /// namespace incoming image references must start with.
    pub base_url: String,
    /// Service credential sent as both bearer token and `apikey` header.
    pub api_key: String,
    /// Bucket holding user-uploaded source images.
    pub source_images_bucket: String,
    /// Bucket receiving synthesized speech.
    pub generated_audio_bucket: String,
    /// Bucket receiving the finished videos.
    pub final_videos_bucket: String,
}

/// Errors from the storage REST layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The storage backend returned a non-2xx status code.
    #[error("Storage API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// Downloading a remote artifact returned a non-2xx status code.
    #[error("Download of {url} returned HTTP {status}")]
    Download { url: String, status: u16 },
}

impl From<StorageError> for StageError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Request(e) => StageError::Transport(e.to_string()),
            StorageError::Download { status, url } => StageError::HttpStatus {
                status,
                body: format!("download of {url} failed"),
            },
            e @ StorageError::ApiError { .. } => StageError::Storage(e.to_string()),
        }
    }
}

/// HTTP client for one storage project. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    config: StorageConfig,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a storage client reusing an existing [`reqwest::Client`]
    /// (shares the connection pool with the other service clients).
    pub fn with_client(client: reqwest::Client, config: StorageConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Prefix of every public object URL in `bucket`, with trailing slash.
    pub fn public_prefix(&self, bucket: &str) -> String {
        format!("{}/{OBJECT_PATH}/public/{bucket}/", self.base_url())
    }

    /// Resolve the public URL of `path` in `bucket`. Pure string work,
    /// does not check that the object exists.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}{}", self.public_prefix(bucket), path.trim_start_matches('/'))
    }

    /// Upload `bytes` as a new object. Fails if the name is already taken.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = format!("{}/{OBJECT_PATH}/{bucket}/{path}", self.base_url());

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header("apikey", &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        Self::ensure_success(response).await?;
        tracing::debug!(bucket, path, "Uploaded object");
        Ok(())
    }

    /// Upload `bytes` and return the public reference of the new object.
    pub async fn store(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<MediaReference, StorageError> {
        self.upload(bucket, path, bytes, content_type).await?;
        Ok(MediaReference::new(self.public_url(bucket, path)))
    }

    /// Probe a public object URL. `Ok(true)` only for a 2xx answer;
    /// 4xx/5xx answers are reported as `Ok(false)`.
    pub async fn exists(&self, public_url: &str) -> Result<bool, StorageError> {
        let response = self
            .client
            .head(public_url)
            .header("apikey", &self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(url = public_url, status = status.as_u16(), "Existence probe");
        Ok(status.is_success())
    }

    /// Download a remote object into memory.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code, turning anything
    /// else into a [`StorageError::ApiError`] carrying the body text.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StorageError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    pub(crate) fn test_config(base_url: &str) -> StorageConfig {
        StorageConfig {
            base_url: base_url.to_string(),
            api_key: "service-key".to_string(),
            source_images_bucket: "user-images".to_string(),
            generated_audio_bucket: "generated-audio".to_string(),
            final_videos_bucket: "final-videos".to_string(),
        }
    }

    #[test]
    fn public_url_ignores_trailing_slash_on_base() {
        let client = StorageClient::new(test_config("https://abc.supabase.co/"));
        assert_eq!(
            client.public_url("final-videos", "v.mp4"),
            "https://abc.supabase.co/storage/v1/object/public/final-videos/v.mp4"
        );
    }

    #[tokio::test]
    async fn store_uploads_with_credentials_and_returns_public_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/storage/v1/object/generated-audio/a.mp3"))
            .and(header("authorization", "Bearer service-key"))
            .and(header("apikey", "service-key"))
            .and(header("content-type", "audio/mpeg"))
            .and(body_bytes(b"ID3".to_vec()))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = StorageClient::new(test_config(&server.uri()));
        let reference = client
            .store("generated-audio", "a.mp3", b"ID3".to_vec(), "audio/mpeg")
            .await
            .unwrap();

        assert_eq!(
            reference.as_str(),
            format!(
                "{}/storage/v1/object/public/generated-audio/a.mp3",
                server.uri()
            )
        );
    }

    #[tokio::test]
    async fn upload_conflict_surfaces_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_string("Duplicate"))
            .mount(&server)
            .await;

        let client = StorageClient::new(test_config(&server.uri()));
        let err = client
            .upload("final-videos", "v.mp4", vec![1, 2, 3], "video/mp4")
            .await
            .unwrap_err();

        assert_matches!(err, StorageError::ApiError { status: 409, ref body } if body == "Duplicate");
        assert_matches!(StageError::from(err), StageError::Storage(_));
    }

    #[tokio::test]
    async fn exists_maps_404_to_false() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = StorageClient::new(test_config(&server.uri()));
        let url = client.public_url("user-images", "missing.png");
        assert!(!client.exists(&url).await.unwrap());
    }

    #[tokio::test]
    async fn download_non_success_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/out.mp4"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = StorageClient::new(test_config(&server.uri()));
        let url = format!("{}/out.mp4", server.uri());
        let err = client.download(&url).await.unwrap_err();

        assert_matches!(err, StorageError::Download { status: 503, .. });
        assert_matches!(
            StageError::from(err),
            StageError::HttpStatus { status: 503, .. }
        );
    }
}
