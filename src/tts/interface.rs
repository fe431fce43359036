use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// JSON payload of `POST /text-to-speech/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    /// Falls back to the configured default language when omitted
    #[serde(default)]
    pub lang_code: Option<String>,
}

/// Text-to-speech provider producing a complete MP3 buffer
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize the whole text. Either every byte of audio is returned or an error.
    async fn synthesize(&self, text: &str, lang_code: &str) -> ProviderResult<Vec<u8>>;
}
