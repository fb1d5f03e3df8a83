//! Text-to-speech client and the speech-synthesis pipeline adapter.

pub mod client;
pub mod synthesizer;

pub use client::{SpeechClient, SpeechError, VoiceConfig};
pub use synthesizer::SpeechSynthesizer;
