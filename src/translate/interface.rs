use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// Form payload of `POST /translate/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub input_lang_code: String,
    pub output_lang_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResult {
    pub original_text: String,
    pub translated_text: String,
    pub original_lang_code: String,
    pub output_lang_code: String,
}

/// Machine translation provider
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source_lang` (or `auto`) into `target_lang`
    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> ProviderResult<String>;
}
