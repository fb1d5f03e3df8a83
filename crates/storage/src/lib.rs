//! Storage backend client and the two pipeline components built on it.
//!
//! [`client::StorageClient`] speaks the object-storage REST dialect
//! (upload, public URL, existence probe). [`validator::ImageValidator`]
//! checks incoming image references against the trusted namespace and
//! [`result_store::ResultStore`] downloads and persists the final video.

pub mod client;
pub mod result_store;
pub mod validator;

pub use client::{StorageClient, StorageConfig, StorageError};
pub use result_store::ResultStore;
pub use validator::ImageValidator;
