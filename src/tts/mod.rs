pub mod interface;
pub mod client;

pub use interface::{SpeechRequest, SpeechSynthesizer};
pub use client::GoogleTts;

/// MIME type of every synthesized response
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";
