use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Default OpenAI-compatible endpoint
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Errors that can occur during a completion call
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("API key not configured: set {0}")]
    MissingApiKey(String),

    #[error("Completion request failed: {0}")]
    RequestFailed(String),

    #[error("Completion API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse completion response: {0}")]
    InvalidResponse(String),

    #[error("Completion API returned no content")]
    EmptyReply,
}

/// Who authored a turn of the conversation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

/// One prior message handed to the completion service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// A single completion call: `complete(system_prompt, history, input) -> reply`
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    /// Persona description, sent as the system message
    pub system_prompt: &'a str,
    /// Prior turns, oldest first
    pub history: &'a [ChatTurn],
    /// The new user input
    pub input: &'a str,
}

/// Configuration for completion services
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Base URL of an OpenAI-compatible API
    pub api_base: String,
    /// API key (None = not configured)
    pub api_key: Option<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
        }
    }
}

impl CompletionConfig {
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base;
        self
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

/// Supported completion backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    OpenAi,
    Echo,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::OpenAi => write!(f, "openai"),
            ProviderType::Echo => write!(f, "echo"),
        }
    }
}

impl std::str::FromStr for ProviderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "open-ai" => Ok(ProviderType::OpenAi),
            "echo" => Ok(ProviderType::Echo),
            _ => Err(format!("Unknown provider: {}", s)),
        }
    }
}

/// The core abstraction for text-completion backends
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Human-readable name of the service (e.g., "openai", "echo")
    fn name(&self) -> &str;

    /// The provider type
    fn provider_type(&self) -> ProviderType;

    /// Produce the next assistant reply
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError>;
}
