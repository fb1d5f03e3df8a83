//! Request-scoped reference and text newtypes.
//!
//! Each wrapper is a thin owned `String`. They exist so a stage signature
//! says which value it consumes: a lip-sync call cannot be handed the
//! effects prompt by mistake.

use std::fmt;

use serde::Serialize;

/// An image URI that has passed trusted-namespace and existence checks.
///
/// Only the validator in `vidsync-storage` should build one from user
/// input; everything downstream receives it already checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageReference(String);

impl ImageReference {
    /// Wrap a URI that the caller has already validated.
    pub fn new_validated(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A URI pointing at a generated or stored video/audio artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaReference(String);

impl MediaReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Free-text description of the video effects to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectsPrompt(String);

impl EffectsPrompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Free-text message to be spoken in the final video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message(String);

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for MediaReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
