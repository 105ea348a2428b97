pub mod mock;
pub mod openai;
pub mod schema;

use async_trait::async_trait;
use drugbot_core::RawToolCall;
use thiserror::Error;

pub use mock::MockLlm;
pub use openai::{OpenAiClient, OpenAiConfig};
pub use schema::{tool_schemas, ToolSchema};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("model returned no choices")]
    NoChoices,

    #[error("no API key configured")]
    MissingApiKey,
}

/// A single-turn chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub system: Option<String>,
    pub user: String,
}

impl ChatPrompt {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            system: None,
            user: text.into(),
        }
    }

    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.system = Some(text.into());
        self
    }
}

/// Hosted model used for routing, drafting, embedding and answer formatting.
///
/// The client does not decide anything itself: routing is the model's
/// function-calling choice, returned verbatim as [`RawToolCall`]s.
#[async_trait]
pub trait LlmClient: Send + Sync {
    fn name(&self) -> &str;

    fn model_hint(&self) -> Option<&str> {
        None
    }

    /// Cheap local check that requests can be attempted at all.
    fn preflight_check(&self) -> Result<(), LlmError> {
        Ok(())
    }

    /// Offer `tools` to the model and return the calls it made, in order.
    async fn choose_tools(
        &self,
        question: &str,
        tools: &[ToolSchema],
    ) -> Result<Vec<RawToolCall>, LlmError>;

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError>;

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError>;
}
