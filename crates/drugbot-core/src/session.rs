//! Per-conversation confirmation state.
//!
//! A drafted query sits in `pending` until a human confirms or rejects it.
//! Nothing gets executed without going through [`Session::confirm`].

use serde::{Deserialize, Serialize};

use crate::error::DrugbotError;
use crate::message::{ChatMessage, Transcript};
use crate::tool::QueryTool;

/// A drafted query waiting for human review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQuery {
    pub tool: QueryTool,
    pub query: String,
    /// The question the eventual answer has to address.
    pub chain_input: String,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    transcript: Transcript,
    pending: Option<PendingQuery>,
    last_error: Option<String>,
    retry_count: u32,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn pending(&self) -> Option<&PendingQuery> {
        self.pending.as_ref()
    }

    pub fn awaiting_confirmation(&self) -> bool {
        self.pending.is_some()
    }

    /// Error from the previous execution attempt of the pending query.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn ask(&mut self, question: impl Into<String>) {
        self.transcript.push(ChatMessage::user(question));
    }

    /// Install a fresh draft. Any previous draft and its error history are dropped.
    pub fn await_confirmation(&mut self, pending: PendingQuery) {
        self.pending = Some(pending);
        self.last_error = None;
        self.retry_count = 0;
    }

    /// Human approved the draft, possibly after editing it.
    ///
    /// Returns the query to run. The session holds no draft until the outcome
    /// is recorded with [`record_answer`](Self::record_answer) or
    /// [`record_failure`](Self::record_failure).
    pub fn confirm(&mut self, edited_query: impl Into<String>) -> Result<PendingQuery, DrugbotError> {
        let mut pending = self.pending.take().ok_or(DrugbotError::NothingPending)?;
        pending.query = edited_query.into();
        Ok(pending)
    }

    pub fn record_answer(&mut self, executed: &PendingQuery, answer: impl Into<String>) {
        self.transcript.push(ChatMessage::assistant(
            answer,
            Some(executed.tool),
            Some(executed.query.clone()),
        ));
        self.clear_confirmation();
    }

    /// Put the failed query back up for review, keeping the human's edits.
    pub fn record_failure(&mut self, executed: PendingQuery, error: impl Into<String>) {
        self.pending = Some(executed);
        self.last_error = Some(error.into());
        self.retry_count += 1;
    }

    pub fn reject(&mut self) -> Result<PendingQuery, DrugbotError> {
        let pending = self.pending.take().ok_or(DrugbotError::NothingPending)?;
        self.last_error = None;
        self.retry_count = 0;
        Ok(pending)
    }

    fn clear_confirmation(&mut self) {
        self.pending = None;
        self.last_error = None;
        self.retry_count = 0;
    }
}
