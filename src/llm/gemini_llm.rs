use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

use super::interface::{GenerativeModel, ResponseMode};
use crate::error::{ProviderError, ProviderResult};

/// Gemini `generateContent` REST client
pub struct GeminiLLM {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiLLM {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> ProviderResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        let model = model.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Initialized GeminiLLM: model={}, base_url={}", model, base_url);
        Ok(Self {
            client,
            base_url,
            model,
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl GenerativeModel for GeminiLLM {
    async fn generate(&self, prompt: &str, mode: ResponseMode) -> ProviderResult<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: match mode {
                ResponseMode::Json => Some(GenerationConfig {
                    response_mime_type: "application/json",
                }),
                ResponseMode::Text => None,
            },
        };

        debug!("Sending prompt to {} ({:?} mode)", self.model, mode);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = ProviderError::from_response(response).await;
            error!("Gemini request failed: {}", err);
            return Err(err);
        }

        let body: GenerateContentResponse = response.json().await?;
        first_candidate_text(body)
    }
}

fn first_candidate_text(body: GenerateContentResponse) -> ProviderResult<String> {
    let text: Option<String> = body
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect());

    match text {
        Some(text) if !text.is_empty() => Ok(text),
        _ => {
            let reason = body
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!(" (blocked: {reason})"))
                .unwrap_or_default();
            Err(ProviderError::InvalidResponse(format!("model returned no text{reason}")))
        }
    }
}
