use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use medbridge_backend::config::Config;
use medbridge_backend::error::{ProviderError, ProviderResult};
use medbridge_backend::llm::{GenerativeModel, ResponseMode};
use medbridge_backend::routes;
use medbridge_backend::sign::{SignCandidate, SignVideoSource};
use medbridge_backend::state::AppState;
use medbridge_backend::translate::Translator;
use medbridge_backend::tts::SpeechSynthesizer;

struct FakeTranslator {
    calls: AtomicUsize,
}

#[async_trait]
impl Translator for FakeTranslator {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> ProviderResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if target == "xx" {
            return Err(ProviderError::InvalidResponse("invalid destination language".to_string()));
        }
        Ok(format!("[{target}] {text}"))
    }
}

#[derive(Default)]
struct FakeSpeech {
    langs: Mutex<Vec<String>>,
}

#[async_trait]
impl SpeechSynthesizer for FakeSpeech {
    async fn synthesize(&self, text: &str, lang_code: &str) -> ProviderResult<Vec<u8>> {
        self.langs.lock().unwrap().push(lang_code.to_string());
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyInput("No text to speak"));
        }
        let mut audio = b"ID3".to_vec();
        audio.extend_from_slice(lang_code.as_bytes());
        audio.extend_from_slice(text.as_bytes());
        Ok(audio)
    }
}

struct FakeModel {
    reply: String,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl FakeModel {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl GenerativeModel for FakeModel {
    async fn generate(&self, prompt: &str, mode: ResponseMode) -> ProviderResult<String> {
        assert_eq!(mode, ResponseMode::Json);
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Words map to a video URL; words not in the map fail
struct FakeSigns {
    videos: HashMap<&'static str, &'static str>,
}

#[async_trait]
impl SignVideoSource for FakeSigns {
    async fn lookup(&self, word: &str) -> ProviderResult<Vec<SignCandidate>> {
        match self.videos.get(word) {
            Some(url) => Ok(vec![
                SignCandidate { url: None },
                SignCandidate { url: Some(url.to_string()) },
            ]),
            None => Err(ProviderError::Status {
                status: 404,
                body: "no such sign".to_string(),
            }),
        }
    }
}

struct Harness {
    translator: Arc<FakeTranslator>,
    speech: Arc<FakeSpeech>,
    model: Option<Arc<FakeModel>>,
}

impl Harness {
    fn new(model: Option<Arc<FakeModel>>) -> Self {
        Self {
            translator: Arc::new(FakeTranslator { calls: AtomicUsize::new(0) }),
            speech: Arc::new(FakeSpeech::default()),
            model,
        }
    }

    fn app(&self) -> Router {
        let signs = FakeSigns {
            videos: HashMap::from([
                ("hello", "https://signs/hello.mp4"),
                ("foo", "https://signs/foo.mp4"),
                ("cat", "https://signs/cat.mp4"),
            ]),
        };
        let state = AppState::with_providers(
            Config::default(),
            self.translator.clone(),
            self.speech.clone(),
            self.model.clone().map(|m| m as Arc<dyn GenerativeModel>),
            Arc::new(signs),
        );
        routes::app(state)
    }
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_form(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn as_json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn translate_echoes_language_codes() {
    let harness = Harness::new(None);
    let (status, body) = send(
        harness.app(),
        post_form("/translate/", "text=Take+with+food&input_lang_code=en&output_lang_code=es"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({
            "original_text": "Take with food",
            "translated_text": "[es] Take with food",
            "original_lang_code": "en",
            "output_lang_code": "es"
        })
    );
}

#[tokio::test]
async fn translate_provider_failure_is_server_error() {
    let harness = Harness::new(None);
    let (status, body) = send(
        harness.app(),
        post_form("/translate/", "text=hi&input_lang_code=en&output_lang_code=xx"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        as_json(&body)["detail"],
        "unexpected provider response: invalid destination language"
    );
}

#[tokio::test]
async fn translate_missing_field_is_rejected_before_provider() {
    let harness = Harness::new(None);
    let (status, body) = send(harness.app(), post_form("/translate/", "text=hi&input_lang_code=en")).await;

    assert!(status.is_client_error());
    assert!(as_json(&body)["detail"].is_string());
    assert_eq!(harness.translator.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn translate_is_idempotent() {
    let harness = Harness::new(None);
    let form = "text=Rest&input_lang_code=en&output_lang_code=fr";
    let (_, first) = send(harness.app(), post_form("/translate/", form)).await;
    let (_, second) = send(harness.app(), post_form("/translate/", form)).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn speech_returns_mpeg_bytes() {
    let harness = Harness::new(None);
    let request = post_json("/text-to-speech/", json!({"text": "hola", "lang_code": "es"}));
    let response = harness.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"ID3eshola");
}

#[tokio::test]
async fn speech_defaults_to_english_and_is_idempotent() {
    let harness = Harness::new(None);
    let (_, first) = send(harness.app(), post_json("/text-to-speech/", json!({"text": "hello"}))).await;
    let (_, second) = send(harness.app(), post_json("/text-to-speech/", json!({"text": "hello"}))).await;

    assert_eq!(first, second);
    assert_eq!(*harness.speech.langs.lock().unwrap(), vec!["en", "en"]);
}

#[tokio::test]
async fn speech_empty_text_is_server_error_not_a_crash() {
    let harness = Harness::new(None);
    let (status, body) = send(
        harness.app(),
        post_json("/text-to-speech/", json!({"text": "", "lang_code": "en"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(as_json(&body), json!({"detail": "No text to speak"}));
}

#[tokio::test]
async fn ai_endpoints_without_credential_never_call_the_provider() {
    let mut server = mockito::Server::new_async().await;
    let gemini = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut config = Config::default();
    config.generative.base_url = server.url();
    config.generative.api_key_env = "MEDBRIDGE_TEST_KEY_THAT_IS_NEVER_SET".to_string();
    let app = routes::app(AppState::new(config).unwrap());

    let payload = json!({"text": "Amoxicillin 500mg", "original_lang": "es", "target_lang": "en"});
    let (status, body) = send(app.clone(), post_json("/summarize/", payload.clone())).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(as_json(&body)["detail"], "AI Summarization is not configured.");

    let (status, body) = send(app, post_json("/explain-medication/", payload)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(as_json(&body)["detail"], "AI Explainer is not configured.");

    gemini.assert_async().await;
}

#[tokio::test]
async fn summarize_returns_both_languages() {
    let model = FakeModel::replying(
        r#"{"summary_target_lang": "Take one pill daily.", "summary_original_lang": "Tome una pastilla al día."}"#,
    );
    let harness = Harness::new(Some(model.clone()));
    let (status, body) = send(
        harness.app(),
        post_json(
            "/summarize/",
            json!({"text": "One tablet by mouth every day", "original_lang": "es", "target_lang": "en"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({
            "summary_target_lang": "Take one pill daily.",
            "summary_original_lang": "Tome una pastilla al día."
        })
    );
    assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    let prompt = model.prompts.lock().unwrap()[0].clone();
    assert!(prompt.contains("One tablet by mouth every day"));
    assert!(prompt.contains("English (en)"));
    assert!(prompt.contains("Spanish (es)"));
}

#[tokio::test]
async fn explain_medication_uses_its_own_keys() {
    let model = FakeModel::replying(
        r#"{"explanation_target_lang": "Ibuprofen eases pain.", "explanation_original_lang": "L'ibuprofène soulage la douleur."}"#,
    );
    let harness = Harness::new(Some(model));
    let (status, body) = send(
        harness.app(),
        post_json(
            "/explain-medication/",
            json!({"text": "Ibuprofen 200mg", "original_lang": "fr", "target_lang": "en"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let body = as_json(&body);
    assert_eq!(body["explanation_target_lang"], "Ibuprofen eases pain.");
    assert_eq!(body["explanation_original_lang"], "L'ibuprofène soulage la douleur.");
}

#[tokio::test]
async fn summarize_non_json_output_is_server_error() {
    let raw = "Sure! The patient should rest.";
    let harness = Harness::new(Some(FakeModel::replying(raw)));
    let (status, body) = send(
        harness.app(),
        post_json("/summarize/", json!({"text": "x", "original_lang": "en", "target_lang": "en"})),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_ne!(body, raw.as_bytes());
    let detail = as_json(&body)["detail"].as_str().unwrap().to_string();
    assert!(detail.starts_with("AI model failed:"));
}

#[tokio::test]
async fn sign_lookup_isolates_failures_and_keeps_order() {
    let harness = Harness::new(None);
    let (status, body) = send(
        harness.app(),
        post_json("/generate-sign-language/", json!({"text": "Hello, World!  foo"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        as_json(&body),
        json!({"signs": [
            {"word": "hello", "url": "https://signs/hello.mp4"},
            {"word": "world", "url": null},
            {"word": "foo", "url": "https://signs/foo.mp4"}
        ]})
    );
}

#[tokio::test]
async fn sign_lookup_keeps_duplicates() {
    let harness = Harness::new(None);
    let (_, body) = send(
        harness.app(),
        post_json("/generate-sign-language/", json!({"text": "cat cat", "lang_code": "en"})),
    )
    .await;

    assert_eq!(
        as_json(&body),
        json!({"signs": [
            {"word": "cat", "url": "https://signs/cat.mp4"},
            {"word": "cat", "url": "https://signs/cat.mp4"}
        ]})
    );
}

#[tokio::test]
async fn sign_lookup_with_no_words_is_empty() {
    let harness = Harness::new(None);
    let (status, body) = send(
        harness.app(),
        post_json("/generate-sign-language/", json!({"text": " ?! "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"signs": []}));
}

#[tokio::test]
async fn health_reports_ai_availability() {
    let (status, body) = send(
        Harness::new(None).app(),
        Request::get("/api/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"status": "ok", "ai_enabled": false}));

    let (_, body) = send(
        Harness::new(Some(FakeModel::replying("{}"))).app(),
        Request::get("/api/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(as_json(&body)["ai_enabled"], true);
}
