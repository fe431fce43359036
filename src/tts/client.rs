use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use super::interface::SpeechSynthesizer;
use crate::error::{ProviderError, ProviderResult};
use crate::utils::text_chunker::split_for_speech;

/// Client for the Google Translate TTS endpoint
///
/// The endpoint only accepts short fragments, so long text is split with
/// [`split_for_speech`] and the returned MP3 segments are concatenated in order.
#[derive(Debug, Clone)]
pub struct GoogleTts {
    client: Client,
    base_url: String,
    max_chunk_chars: usize,
}

impl GoogleTts {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        max_chunk_chars: usize,
    ) -> ProviderResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_chunk_chars,
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        lang_code: &str,
        idx: usize,
        total: usize,
    ) -> ProviderResult<Vec<u8>> {
        let url = format!("{}/translate_tts", self.base_url);
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang_code),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, lang_code: &str) -> ProviderResult<Vec<u8>> {
        let chunks = split_for_speech(text, self.max_chunk_chars);
        if chunks.is_empty() {
            return Err(ProviderError::EmptyInput("No text to speak"));
        }

        debug!("Synthesizing {} chunk(s) in {}", chunks.len(), lang_code);

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            match self.fetch_chunk(chunk, lang_code, idx, chunks.len()).await {
                Ok(bytes) => audio.extend_from_slice(&bytes),
                Err(e) => {
                    error!("TTS chunk {}/{} failed: {}", idx + 1, chunks.len(), e);
                    return Err(e);
                }
            }
        }

        Ok(audio)
    }
}
