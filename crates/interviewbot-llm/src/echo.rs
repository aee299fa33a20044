use async_trait::async_trait;
use tracing::debug;

use crate::{CompletionError, CompletionRequest, CompletionService, ProviderType};

/// Offline completion service that replies with the user's input.
///
/// Useful for trying the interview flow without an API key.
#[derive(Debug, Clone, Default)]
pub struct EchoCompletion;

impl EchoCompletion {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionService for EchoCompletion {
    fn name(&self) -> &str {
        "echo"
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Echo
    }

    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, CompletionError> {
        debug!(history_len = request.history.len(), "Echoing input");
        Ok(request.input.to_string())
    }
}
