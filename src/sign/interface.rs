use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// JSON payload of `POST /generate-sign-language/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignLookupRequest {
    pub text: String,
    #[serde(default)]
    pub lang_code: Option<String>,
}

/// One candidate returned by the sign-video provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignCandidate {
    #[serde(default, alias = "video_url")]
    pub url: Option<String>,
}

/// Result for a single input token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignEntry {
    pub word: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignLookupResponse {
    pub signs: Vec<SignEntry>,
}

/// Sign-language video lookup provider
#[async_trait]
pub trait SignVideoSource: Send + Sync {
    /// Candidate videos for one word, in the provider's ranking order
    async fn lookup(&self, word: &str) -> ProviderResult<Vec<SignCandidate>>;
}
