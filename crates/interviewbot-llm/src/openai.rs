//! OpenAI Chat Completions client.
//!
//! Sends `[system, ...history, user]` to `{api_base}/chat/completions` and
//! returns the first choice's content.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    ChatTurn, CompletionConfig, CompletionError, CompletionRequest, CompletionService,
    ProviderType,
};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Completion service backed by an OpenAI-compatible HTTP API
#[derive(Debug, Clone)]
pub struct OpenAiCompletion {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

impl OpenAiCompletion {
    /// Create a client from config. Fails if no API key is configured.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let api_key = config
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CompletionError::MissingApiKey(API_KEY_ENV.to_string()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            model: config.model,
            temperature: config.temperature,
        })
    }

    fn build_body<'a>(&'a self, request: &CompletionRequest<'a>) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: request.system_prompt,
        });
        messages.extend(request.history.iter().map(|turn: &'a ChatTurn| WireMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        }));
        messages.push(WireMessage {
            role: "user",
            content: request.input,
        });

        ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionService for OpenAiCompletion {
    fn name(&self) -> &str {
        "openai"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAi
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        let body = self.build_body(&request);

        debug!(
            model = %self.model,
            messages = body.messages.len(),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let reply = extract_reply(parsed)?;
        info!(reply_len = reply.len(), "Chat completion received");
        Ok(reply)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_reply(response: ChatCompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyReply)
}

fn map_http_error(status: StatusCode, body: String) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    CompletionError::Api {
        status: status.as_u16(),
        message,
    }
}
