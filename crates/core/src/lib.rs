//! Domain types shared by every crate in the narrated-video pipeline.
//!
//! Nothing in here performs I/O: the reference newtypes, the typed
//! service results, request-field validation, stage naming and the
//! object-name helper are all pure so they can be reused by the client
//! adapters, the orchestrator and the HTTP layer alike.

pub mod error;
pub mod naming;
pub mod request;
pub mod results;
pub mod stage;
pub mod types;
