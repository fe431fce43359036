use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::interface::{SignCandidate, SignVideoSource};
use crate::error::{ProviderError, ProviderResult};

/// Looks a word up with `GET {base_url}?q={word}`; the reply is a JSON array of candidates.
/// An empty `base_url` answers every word with no candidates and makes no request.
#[derive(Debug, Clone)]
pub struct HttpSignSource {
    client: Client,
    base_url: String,
}

impl HttpSignSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ProviderResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SignVideoSource for HttpSignSource {
    async fn lookup(&self, word: &str) -> ProviderResult<Vec<SignCandidate>> {
        if self.base_url.trim().is_empty() {
            return Ok(Vec::new());
        }

        debug!("Looking up sign for '{}'", word);
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", word)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProviderError::from_response(response).await);
        }

        Ok(response.json().await?)
    }
}
