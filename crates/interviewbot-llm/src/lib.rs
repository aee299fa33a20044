//! # interviewbot-llm
//!
//! Completion service abstraction for interviewbot.
//!
//! A completion service maps a system prompt, the prior conversation and a new
//! user input to a single reply. The interview controller treats it as one
//! opaque, blocking operation.
//!
//! ## Key Types
//!
//! - [`CompletionService`] - The trait every backend implements
//! - [`CompletionRequest`] - System prompt, history and new input for one call
//! - [`CompletionConfig`] - Model, temperature and endpoint settings
//! - [`ProviderType`] - Which backend to construct via [`create_service`]

mod echo;
mod openai;
mod traits;

pub use echo::EchoCompletion;
pub use openai::{OpenAiCompletion, API_KEY_ENV};
pub use traits::{
    ChatTurn, CompletionConfig, CompletionError, CompletionRequest, CompletionService,
    ProviderType, TurnRole, DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
};

/// Create a completion service by provider type
pub fn create_service(
    provider: ProviderType,
    config: CompletionConfig,
) -> Result<Box<dyn CompletionService>, CompletionError> {
    match provider {
        ProviderType::OpenAi => Ok(Box::new(OpenAiCompletion::new(config)?)),
        ProviderType::Echo => Ok(Box::new(EchoCompletion::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_requires_api_key() {
        let config = CompletionConfig::default();
        let result = create_service(ProviderType::OpenAi, config);
        assert!(matches!(result, Err(CompletionError::MissingApiKey(_))));
    }

    #[test]
    fn test_create_openai_with_key() {
        let config = CompletionConfig::default().with_api_key("sk-test".to_string());
        let service = create_service(ProviderType::OpenAi, config).unwrap();
        assert_eq!(service.provider_type(), ProviderType::OpenAi);
    }

    #[test]
    fn test_create_echo_needs_nothing() {
        let service = create_service(ProviderType::Echo, CompletionConfig::default()).unwrap();
        assert_eq!(service.name(), "echo");
    }
}
