use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::header,
    response::{IntoResponse, Response},
    Form, Json,
};
use tracing::{debug, error, info};

use crate::error::{ApiError, ProviderError};
use crate::llm::ResponseMode;
use crate::prompt::{
    build_prompt, parse_response, BilingualRequest, BilingualTask, ExplainMedication,
    MedicationExplanation, Summarize, SummaryResult,
};
use crate::sign::{lookup_all, tokenize, SignLookupRequest, SignLookupResponse};
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResult};
use crate::tts::{SpeechRequest, AUDIO_MIME_TYPE};

pub async fn translate(
    State(state): State<AppState>,
    payload: Result<Form<TranslateRequest>, FormRejection>,
) -> Result<Json<TranslateResult>, ApiError> {
    let Form(request) = payload?;
    require_code("input_lang_code", &request.input_lang_code)?;
    require_code("output_lang_code", &request.output_lang_code)?;

    let translated_text = state
        .translator
        .translate(&request.text, &request.input_lang_code, &request.output_lang_code)
        .await
        .map_err(|e| {
            error!("Translation failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(TranslateResult {
        original_text: request.text,
        translated_text,
        original_lang_code: request.input_lang_code,
        output_lang_code: request.output_lang_code,
    }))
}

/// Responds only once the full audio buffer exists, so a failure never leaves partial audio
pub async fn text_to_speech(
    State(state): State<AppState>,
    payload: Result<Json<SpeechRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let lang_code = request
        .lang_code
        .filter(|code| !code.trim().is_empty())
        .unwrap_or_else(|| state.config.speech.default_lang.clone());

    let audio = state
        .speech
        .synthesize(&request.text, &lang_code)
        .await
        .map_err(|e| {
            error!("Speech synthesis failed: {}", e);
            ApiError::from(e)
        })?;

    debug!("Synthesized {} bytes of audio", audio.len());
    Ok(([(header::CONTENT_TYPE, AUDIO_MIME_TYPE)], audio).into_response())
}

pub async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<BilingualRequest>, JsonRejection>,
) -> Result<Json<SummaryResult>, ApiError> {
    run_bilingual::<Summarize>(&state, payload).await.map(Json)
}

pub async fn explain_medication(
    State(state): State<AppState>,
    payload: Result<Json<BilingualRequest>, JsonRejection>,
) -> Result<Json<MedicationExplanation>, ApiError> {
    run_bilingual::<ExplainMedication>(&state, payload).await.map(Json)
}

pub async fn generate_sign_language(
    State(state): State<AppState>,
    payload: Result<Json<SignLookupRequest>, JsonRejection>,
) -> Result<Json<SignLookupResponse>, ApiError> {
    let Json(request) = payload?;
    let tokens = tokenize(&request.text);
    info!(
        "Sign lookup for {} token(s), lang_code={:?}",
        tokens.len(),
        request.lang_code
    );

    let sign_config = &state.config.sign;
    let signs = lookup_all(
        state.signs.as_ref(),
        tokens,
        sign_config.timeout(),
        sign_config.max_concurrent,
    )
    .await;
    Ok(Json(SignLookupResponse { signs }))
}

/// Answer in the target language, translated back to the original, in one model call
async fn run_bilingual<T: BilingualTask>(
    state: &AppState,
    payload: Result<Json<BilingualRequest>, JsonRejection>,
) -> Result<T::Output, ApiError> {
    let model = state.ai(T::UNAVAILABLE)?;
    let Json(request) = payload?;
    require_code("original_lang", &request.original_lang)?;
    require_code("target_lang", &request.target_lang)?;

    let prompt = build_prompt::<T>(&request);
    let raw = model
        .generate(&prompt, ResponseMode::Json)
        .await
        .map_err(ai_failure)?;

    parse_response::<T>(&raw).map_err(ai_failure)
}

fn ai_failure(err: ProviderError) -> ApiError {
    error!("AI model failed: {}", err);
    ApiError::Upstream(format!("AI model failed: {err}"))
}

fn require_code(field: &str, code: &str) -> Result<(), ApiError> {
    if code.trim().is_empty() {
        return Err(ApiError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}
