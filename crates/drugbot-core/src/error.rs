use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrugbotError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("no query is awaiting confirmation")]
    NothingPending,
}
