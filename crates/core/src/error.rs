/// Domain-level errors that are not tied to a specific pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A required request field is missing or empty.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The image reference is outside the trusted namespace or does not exist.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

/// Failure of a single external call made by one pipeline stage.
///
/// Every client adapter converts its own error type into this one so the
/// orchestrator can tag it with the failing stage without knowing which
/// service was involved.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The request never produced a response (network, DNS, TLS, decoding).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-2xx status code.
    #[error("service returned HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered successfully but the payload lacks the field
    /// this stage needs.
    #[error("response is missing required field `{0}`")]
    MissingField(&'static str),

    /// The generation service reported that the request itself failed.
    #[error("service reported failure: {0}")]
    Service(String),

    /// Persisting an artifact to the storage backend failed.
    #[error("storage error: {0}")]
    Storage(String),
}
