//! Queue-based generation service client.
//!
//! [`api::FalQueueApi`] submits a request to a hosted model, follows its
//! progress until it reaches a terminal state and fetches the result.
//! The [`apps`] module builds the three pipeline adapters (background
//! removal, video effects, lip-sync) on top of it.

pub mod api;
pub mod apps;
pub mod messages;

pub use api::{FalConfig, FalError, FalQueueApi};
pub use apps::{BackgroundRemover, LipSyncer, VideoEffectsGenerator};
