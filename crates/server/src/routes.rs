//! HTTP surface: the chat endpoint, raw resource endpoints, and health.
//!
//! Resource endpoints bypass the classifier and composer: they return the
//! raw extraction result as structured data, with failures serialized as
//! `{"error": ...}` rather than apology text.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use campus_core::{FaqTable, ResourceName};
use campus_client::{ContentService, ContentSource, Enricher};

use crate::compose;

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<ContentService>,
    pub faqs: Arc<FaqTable>,
    pub enricher: Option<Arc<Enricher>>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/chat", post(chat))
        .route("/api/placements", get(placements))
        .route("/api/admissions", get(admissions))
        .route("/api/about", get(about))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    reply: String,
}

async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Json<ChatReply> {
    let reply = compose::compose(
        state.content.as_ref(),
        &state.faqs,
        state.enricher.as_deref(),
        &request.message,
    )
    .await;
    Json(ChatReply { reply })
}

async fn resource(state: &AppState, name: ResourceName) -> Json<Value> {
    match state.content.resource(name).await {
        Ok(page) => match serde_json::to_value(page.as_ref()) {
            Ok(value) => Json(value),
            Err(e) => Json(json!({ "error": e.to_string() })),
        },
        Err(err) => Json(json!({ "error": err.to_string() })),
    }
}

async fn placements(State(state): State<AppState>) -> Json<Value> {
    resource(&state, ResourceName::Placements).await
}

async fn admissions(State(state): State<AppState>) -> Json<Value> {
    resource(&state, ResourceName::Admissions).await
}

async fn about(State(state): State<AppState>) -> Json<Value> {
    resource(&state, ResourceName::About).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
