//! Optional answer rephrasing through an OpenAI-compatible endpoint.
//!
//! Enrichment is strictly additive: the composer asks for a rephrased reply
//! and falls back to its templated text when the answer is `None`. Absence of
//! the collaborator and failure of the collaborator are indistinguishable to
//! callers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Base URL of the OpenAI-compatible API.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

pub struct Enricher {
    http: reqwest::Client,
    config: EnrichConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

const SYSTEM_PROMPT: &str = "You answer questions about the university using only the provided context. \
     Keep replies short and factual; say so when the context does not cover the question.";

impl Enricher {
    /// Build the collaborator. Returns `None` when the HTTP client cannot be
    /// constructed, which callers treat the same as enrichment being absent.
    pub fn new(config: EnrichConfig) -> Option<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls()
            .build();
        match http {
            Ok(http) => Some(Self { http, config }),
            Err(e) => {
                tracing::debug!("enrichment client unavailable: {e}");
                None
            }
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Rephrase `context` as an answer to `question`.
    ///
    /// Every failure mode (transport, status, decode, empty choice list) is
    /// logged at debug and collapsed to `None`.
    pub async fn rephrase(&self, question: &str, context: &str) -> Option<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user", content: format!("Context:\n{context}\n\nQuestion: {question}") },
            ],
            temperature: 0.2,
            max_tokens: 400,
        };

        let url = format!("{}/v1/chat/completions", self.config.endpoint.trim_end_matches('/'));
        let response = match self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("enrichment request failed: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "enrichment request rejected");
            return None;
        }

        let parsed: ChatResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("enrichment response unreadable: {e}");
                return None;
            }
        };

        let content = parsed.choices.into_iter().next()?.message.content;
        let content = content.trim();
        (!content.is_empty()).then(|| content.to_string())
    }
}
