//! Queue API payload types.
//!
//! The queue answers a submission with the URLs to follow, then reports
//! status as `{"status": "<STATE>", ...}`. This module deserializes both
//! into typed structs.

use serde::Deserialize;

/// Response to a queue submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    /// Server-assigned identifier for the queued request.
    pub request_id: String,
    /// URL polled for [`QueueStatus`] updates.
    pub status_url: String,
    /// URL returning the result payload once completed.
    pub response_url: String,
}

/// Lifecycle state of a queued request.
///
/// Deserialized via the internally-tagged `"status"` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueStatus {
    /// Waiting for a runner.
    InQueue {
        #[serde(default)]
        queue_position: Option<u32>,
    },

    /// A runner is working on it; `logs` holds every line so far.
    InProgress {
        #[serde(default)]
        logs: Option<Vec<LogEntry>>,
    },

    /// Terminal. The result (or the failure) is at the response URL.
    Completed {
        #[serde(default)]
        logs: Option<Vec<LogEntry>>,
        /// Present when the model run itself failed.
        #[serde(default)]
        error: Option<String>,
    },
}

impl QueueStatus {
    pub fn logs(&self) -> &[LogEntry] {
        match self {
            Self::InQueue { .. } => &[],
            Self::InProgress { logs } | Self::Completed { logs, .. } => {
                logs.as_deref().unwrap_or_default()
            }
        }
    }
}

/// One progress log line emitted by the model runner.
#[derive(Debug, Clone, Deserialize)]
pub struct LogEntry {
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}
