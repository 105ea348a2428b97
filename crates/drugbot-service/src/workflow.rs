//! The question → draft → confirm → answer loop.
//!
//! Every query the engine runs has passed through [`ChatWorkflow::confirm`],
//! which only succeeds while the session holds a draft.

use std::sync::Arc;

use drugbot_core::catalog::Example;
use drugbot_core::{PendingQuery, Session};
use drugbot_db::QueryEngine;
use drugbot_llm::{ChatPrompt, LlmClient};
use drugbot_prompts::answer;

use crate::{GeneratedQuery, GeneratorConfig, QueryGenerator, ServiceError};

/// Reply used when a confirmed query returns no rows.
pub const NO_RESULTS: &str = "No results found.";
pub const REJECTED_MESSAGE: &str = "Query rejected. Please try a different question.";

/// Result of acting on a pending draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answered { answer: String },
    /// Execution or formatting failed. The draft is pending again.
    Failed { error: String },
    Rejected,
}

pub struct ChatWorkflow {
    session: Session,
    generator: QueryGenerator,
    engine: Arc<dyn QueryEngine>,
    llm: Arc<dyn LlmClient>,
}

impl ChatWorkflow {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        engine: Arc<dyn QueryEngine>,
        config: GeneratorConfig,
    ) -> Self {
        Self {
            session: Session::new(),
            generator: QueryGenerator::new(llm.clone(), config),
            engine,
            llm,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn engine(&self) -> &Arc<dyn QueryEngine> {
        &self.engine
    }

    pub fn llm(&self) -> &Arc<dyn LlmClient> {
        &self.llm
    }

    /// Record the question and draft a query for it.
    ///
    /// On error the question stays in the transcript and nothing is pending.
    pub async fn submit(&mut self, question: &str) -> Result<GeneratedQuery, ServiceError> {
        self.session.ask(question);
        let generated = self.generator.generate(question).await?;
        self.session.await_confirmation(PendingQuery {
            tool: generated.tool,
            query: generated.query.clone(),
            chain_input: question.to_string(),
        });
        Ok(generated)
    }

    /// Treat a catalog example as if the user had asked it and the model had
    /// drafted its query.
    pub async fn select_example(&mut self, example: &Example) -> Result<(), ServiceError> {
        self.session.ask(example.input);
        let query = self.generator.render_example(example).await?;
        self.session.await_confirmation(PendingQuery {
            tool: example.tool,
            query,
            chain_input: example.input.to_string(),
        });
        Ok(())
    }

    /// Run the human-approved query text and answer the pending question.
    pub async fn confirm(&mut self, edited_query: &str) -> Result<Outcome, ServiceError> {
        let pending = self
            .session
            .confirm(edited_query)
            .map_err(|_| ServiceError::NothingPending)?;

        tracing::info!(tool = %pending.tool, "executing confirmed query");
        match self.answer(&pending).await {
            Ok(answer) => {
                self.session.record_answer(&pending, answer.clone());
                Ok(Outcome::Answered { answer })
            }
            Err(e) => {
                let error = e.to_string();
                tracing::warn!(tool = %pending.tool, error = %error, "confirmed query failed");
                self.session.record_failure(pending, error.clone());
                Ok(Outcome::Failed { error })
            }
        }
    }

    pub fn reject(&mut self) -> Result<Outcome, ServiceError> {
        let rejected = self
            .session
            .reject()
            .map_err(|_| ServiceError::NothingPending)?;
        tracing::info!(tool = %rejected.tool, "draft rejected");
        Ok(Outcome::Rejected)
    }

    async fn answer(&self, pending: &PendingQuery) -> Result<String, ServiceError> {
        let output = self.engine.execute(&pending.query).await?;
        if output.is_empty() {
            return Ok(NO_RESULTS.to_string());
        }
        tracing::debug!(rows = output.row_count(), "formatting answer");
        let prompt = answer::prompt(&pending.chain_input, &output.render());
        Ok(self.llm.complete(&ChatPrompt::user(prompt)).await?)
    }
}
