//! Trusted-namespace validation of incoming image references.

use vidsync_core::error::CoreError;
use vidsync_core::types::ImageReference;

use crate::client::StorageClient;

/// Confirms that a user-supplied image URL lives in the trusted storage
/// project and that the object it names actually exists.
#[derive(Debug, Clone)]
pub struct ImageValidator {
    storage: StorageClient,
}

impl ImageValidator {
    pub fn new(storage: StorageClient) -> Self {
        Self { storage }
    }

    /// Validate `image_url`, returning it unchanged on success.
    ///
    /// The namespace prefix is checked first and a failing prefix never
    /// reaches the network. Only then is the object path resolved to a
    /// public URL in the source-images bucket and probed with `HEAD`.
    pub async fn validate(&self, image_url: &str) -> Result<ImageReference, CoreError> {
        let namespace = format!("{}/", self.storage.base_url());
        if !image_url.starts_with(&namespace) {
            tracing::warn!(url = image_url, "Image URL outside trusted storage namespace");
            return Err(CoreError::InvalidReference(
                "Image URL is not in the trusted storage namespace".into(),
            ));
        }

        let bucket = &self.storage.config().source_images_bucket;
        let object_path = self.object_path(image_url, bucket);
        if object_path.is_empty() {
            tracing::warn!(url = image_url, "Image URL names no object");
            return Err(CoreError::InvalidReference("Image URL names no object".into()));
        }

        let public_url = self.storage.public_url(bucket, object_path);
        match self.storage.exists(&public_url).await {
            Ok(true) => {
                tracing::info!(url = image_url, "Valid storage URL");
                Ok(ImageReference::new_validated(image_url))
            }
            Ok(false) => {
                tracing::warn!(url = image_url, bucket, object_path, "Image object not found");
                Err(CoreError::InvalidReference("Image object does not exist".into()))
            }
            Err(e) => {
                tracing::error!(url = image_url, error = %e, "Error validating storage URL");
                Err(CoreError::InvalidReference(format!(
                    "Could not confirm image exists: {e}"
                )))
            }
        }
    }

    /// Object path inside the source bucket. Public URLs of that bucket
    /// keep their full nested path; anything else falls back to the last
    /// path segment.
    fn object_path<'a>(&self, image_url: &'a str, bucket: &str) -> &'a str {
        let without_query = image_url.split(['?', '#']).next().unwrap_or(image_url);
        let prefix = self.storage.public_prefix(bucket);
        match without_query.strip_prefix(prefix.as_str()) {
            Some(path) => path,
            None => without_query.rsplit('/').next().unwrap_or_default(),
        }
    }
}
