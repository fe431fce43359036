//! Prompts for the bilingual AI features.
//!
//! Each feature asks the model to answer in the target language first and to
//! translate that answer back into the user's original language, all in one
//! round trip. The reply must be a JSON object with exactly two
//! feature-specific keys, deserialized into that feature's result type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ProviderResult;

/// JSON payload shared by `/summarize/` and `/explain-medication/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BilingualRequest {
    pub text: String,
    /// Language the answer is translated back into
    pub original_lang: String,
    /// Language the model answers in first
    pub target_lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary_target_lang: String,
    pub summary_original_lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationExplanation {
    pub explanation_target_lang: String,
    pub explanation_original_lang: String,
}

/// A task run through the answer-then-translate prompt
pub trait BilingualTask {
    type Output: DeserializeOwned + Serialize + Send;

    /// Shown when the AI provider has no credential
    const UNAVAILABLE: &'static str;
    const TARGET_KEY: &'static str;
    const ORIGINAL_KEY: &'static str;

    /// Role and task instructions for the user's text
    fn instructions(text: &str) -> String;
}

pub struct Summarize;

impl BilingualTask for Summarize {
    type Output = SummaryResult;

    const UNAVAILABLE: &'static str = "AI Summarization is not configured.";
    const TARGET_KEY: &'static str = "summary_target_lang";
    const ORIGINAL_KEY: &'static str = "summary_original_lang";

    fn instructions(text: &str) -> String {
        format!(
            "You are a helpful medical assistant. Summarize the following text clearly \
             and concisely in one simple sentence: '{text}'"
        )
    }
}

pub struct ExplainMedication;

impl BilingualTask for ExplainMedication {
    type Output = MedicationExplanation;

    const UNAVAILABLE: &'static str = "AI Explainer is not configured.";
    const TARGET_KEY: &'static str = "explanation_target_lang";
    const ORIGINAL_KEY: &'static str = "explanation_original_lang";

    fn instructions(text: &str) -> String {
        format!(
            "You are a friendly pharmacist explaining things to a patient in simple, clear language.\n\
             The patient has the following text: '{text}'.\n\
             From that text, identify the primary medication mentioned.\n\
             Then, explain what it is commonly used for and one or two very common side effects.\n\
             Keep the explanation short, simple, and easy to understand."
        )
    }
}

pub fn build_prompt<T: BilingualTask>(request: &BilingualRequest) -> String {
    let target = describe_language(&request.target_lang);
    let original = describe_language(&request.original_lang);

    format!(
        "{instructions}\n\n\
         Step 1: Write your answer in {target}.\n\
         Step 2: Translate that answer into {original}.\n\n\
         Respond with only a JSON object that has exactly these two string keys:\n\
         {{\"{target_key}\": \"<your answer in {target}>\", \
         \"{original_key}\": \"<the same answer translated into {original}>\"}}",
        instructions = T::instructions(&request.text),
        target_key = T::TARGET_KEY,
        original_key = T::ORIGINAL_KEY,
    )
}

/// Parse the model's reply. Anything other than the expected object is an error.
pub fn parse_response<T: BilingualTask>(raw: &str) -> ProviderResult<T::Output> {
    Ok(serde_json::from_str(raw.trim())?)
}

/// Render a language code with its English name when known, e.g. `Spanish (es)`
pub fn describe_language(code: &str) -> String {
    let base = code.split(['-', '_']).next().unwrap_or(code).to_lowercase();
    let name = match base.as_str() {
        "ar" => "Arabic",
        "bn" => "Bengali",
        "de" => "German",
        "en" => "English",
        "es" => "Spanish",
        "fa" => "Persian",
        "fr" => "French",
        "gu" => "Gujarati",
        "hi" => "Hindi",
        "it" => "Italian",
        "ja" => "Japanese",
        "kn" => "Kannada",
        "ko" => "Korean",
        "ml" => "Malayalam",
        "mr" => "Marathi",
        "nl" => "Dutch",
        "pa" => "Punjabi",
        "pl" => "Polish",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "sw" => "Swahili",
        "ta" => "Tamil",
        "te" => "Telugu",
        "tr" => "Turkish",
        "uk" => "Ukrainian",
        "ur" => "Urdu",
        "vi" => "Vietnamese",
        "zh" => "Chinese",
        _ => return code.to_string(),
    };
    format!("{name} ({code})")
}
