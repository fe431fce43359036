use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::llm::{GeminiLLM, GenerativeModel};
use crate::sign::{HttpSignSource, SignVideoSource};
use crate::translate::{GoogleTranslator, Translator};
use crate::tts::{GoogleTts, SpeechSynthesizer};

/// Shared, read-only handles to every provider. Nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub translator: Arc<dyn Translator>,
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// `None` when no AI credential was configured
    pub ai: Option<Arc<dyn GenerativeModel>>,
    pub signs: Arc<dyn SignVideoSource>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = GoogleTranslator::new(
            config.translate.base_url.clone(),
            config.translate.timeout(),
        )?;
        let speech = GoogleTts::new(
            config.speech.base_url.clone(),
            config.speech.timeout(),
            config.speech.max_chunk_chars,
        )?;
        let sign_url = if config.sign.is_configured() {
            config.sign.base_url.clone()
        } else {
            warn!("sign.base_url is not set. Sign lookups will return no videos.");
            String::new()
        };
        let signs = HttpSignSource::new(sign_url, config.sign.timeout())?;

        let ai: Option<Arc<dyn GenerativeModel>> = match config.generative.api_key_from_env() {
            Some(api_key) => Some(Arc::new(GeminiLLM::new(
                config.generative.base_url.clone(),
                config.generative.model.clone(),
                api_key,
                config.generative.timeout(),
            )?)),
            None => {
                warn!(
                    "{} not found. AI features will be disabled.",
                    config.generative.api_key_env
                );
                None
            }
        };

        Ok(Self::with_providers(
            config,
            Arc::new(translator),
            Arc::new(speech),
            ai,
            Arc::new(signs),
        ))
    }

    pub fn with_providers(
        config: Config,
        translator: Arc<dyn Translator>,
        speech: Arc<dyn SpeechSynthesizer>,
        ai: Option<Arc<dyn GenerativeModel>>,
        signs: Arc<dyn SignVideoSource>,
    ) -> Self {
        info!("AI features enabled: {}", ai.is_some());
        Self {
            config: Arc::new(config),
            translator,
            speech,
            ai,
            signs,
        }
    }

    /// The AI provider, or a "not configured" error carrying `unavailable`
    pub fn ai(&self, unavailable: &'static str) -> Result<&dyn GenerativeModel, ApiError> {
        self.ai
            .as_deref()
            .ok_or(ApiError::NotConfigured(unavailable))
    }
}
