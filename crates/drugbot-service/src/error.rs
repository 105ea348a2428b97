use drugbot_core::DrugbotError;
use drugbot_db::DbError;
use drugbot_llm::LlmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid response from chain. Please try again.")]
    NoToolCall,

    #[error("embedding has {actual} dimensions, expected {expected}")]
    EmbeddingDimension { expected: usize, actual: usize },

    #[error("no query is awaiting confirmation")]
    NothingPending,

    #[error(transparent)]
    Core(#[from] DrugbotError),

    #[error("model error: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
