//! Narrated-video pipeline orchestration.
//!
//! [`stages`] declares one trait per external contract and implements
//! each for the concrete client adapters. [`orchestrator::Pipeline`]
//! composes them in strict sequence and stops at the first failure.

pub mod error;
pub mod orchestrator;
pub mod stages;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::PipelineError;
pub use orchestrator::{Pipeline, PipelineStages};
