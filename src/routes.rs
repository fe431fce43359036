use axum::{
    body::Body,
    extract::State,
    http::Request,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let frontend_dir = PathBuf::from(&state.config.server.frontend_dir);

    Router::new()
        // Frontend
        .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&frontend_dir))

        // Health check
        .route("/api/health", get(health_check))

        // Capabilities
        .route("/translate/", post(handlers::translate))
        .route("/text-to-speech/", post(handlers::text_to_speech))
        .route("/summarize/", post(handlers::summarize))
        .route("/explain-medication/", post(handlers::explain_medication))
        .route("/generate-sign-language/", post(handlers::generate_sign_language))
}

/// Full application: routes, request tracing and CORS
pub fn app(state: AppState) -> Router {
    create_routes(&state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "ai_enabled": state.ai.is_some()
    }))
}
