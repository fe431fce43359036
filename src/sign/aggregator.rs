use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, warn};

use super::interface::{SignCandidate, SignEntry, SignVideoSource};
use crate::error::{ProviderError, ProviderResult};

/// Lowercase, drop everything that is not alphanumeric or whitespace, split on whitespace
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();

    cleaned.split_whitespace().map(str::to_string).collect()
}

/// Look the tokens up concurrently, with at most `max_in_flight` requests open at once.
///
/// The output has one entry per token, in token order. A token whose lookup
/// fails, times out, or has no usable video gets `url: None`; no failure
/// affects any other token.
pub async fn lookup_all(
    source: &dyn SignVideoSource,
    tokens: Vec<String>,
    timeout: Duration,
    max_in_flight: usize,
) -> Vec<SignEntry> {
    stream::iter(tokens)
        .map(|word| async move {
            let url = match resolve(source, &word, timeout).await {
                Ok(Some(url)) => Some(url),
                Ok(None) => {
                    debug!("No sign video for '{}'", word);
                    None
                }
                Err(e) => {
                    warn!("Sign lookup for '{}' failed: {}", word, e);
                    None
                }
            };
            SignEntry { word, url }
        })
        .buffered(max_in_flight.max(1))
        .collect::<Vec<_>>()
        .await
}

async fn resolve(
    source: &dyn SignVideoSource,
    word: &str,
    timeout: Duration,
) -> ProviderResult<Option<String>> {
    let candidates = tokio::time::timeout(timeout, source.lookup(word))
        .await
        .map_err(|_| ProviderError::Timeout(timeout))??;
    Ok(first_video_url(candidates))
}

/// The first candidate carrying a non-empty URL wins; later ones are ignored
fn first_video_url(candidates: Vec<SignCandidate>) -> Option<String> {
    candidates
        .into_iter()
        .find_map(|candidate| candidate.url.filter(|url| !url.trim().is_empty()))
}
