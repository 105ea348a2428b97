use std::sync::Arc;

use drugbot_core::catalog::Example;
use drugbot_core::Session;
use drugbot_db::QueryEngine;
use drugbot_llm::LlmClient;
use tokio::runtime::Runtime;

use crate::{ChatWorkflow, GeneratedQuery, GeneratorConfig, Outcome, ServiceError};

/// Blocking wrapper around [`ChatWorkflow`].
///
/// Owns a tokio runtime and uses `block_on()` for each call, for sync
/// callers like the TUI.
pub struct BlockingWorkflow {
    inner: ChatWorkflow,
    rt: Runtime,
}

impl BlockingWorkflow {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        engine: Arc<dyn QueryEngine>,
        config: GeneratorConfig,
    ) -> Result<Self, ServiceError> {
        Ok(Self {
            inner: ChatWorkflow::new(llm, engine, config),
            rt: Runtime::new()?,
        })
    }

    pub fn session(&self) -> &Session {
        self.inner.session()
    }

    pub fn submit(&mut self, question: &str) -> Result<GeneratedQuery, ServiceError> {
        self.rt.block_on(self.inner.submit(question))
    }

    pub fn select_example(&mut self, example: &Example) -> Result<(), ServiceError> {
        self.rt.block_on(self.inner.select_example(example))
    }

    pub fn confirm(&mut self, edited_query: &str) -> Result<Outcome, ServiceError> {
        self.rt.block_on(self.inner.confirm(edited_query))
    }

    pub fn reject(&mut self) -> Result<Outcome, ServiceError> {
        self.inner.reject()
    }

    pub fn table_names(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.rt.block_on(self.inner.engine().table_names())?)
    }

    pub fn preflight_check(&self) -> Result<(), ServiceError> {
        Ok(self.inner.llm().preflight_check()?)
    }

    pub fn model_name(&self) -> String {
        let llm = self.inner.llm();
        match llm.model_hint() {
            Some(model) => format!("{} ({model})", llm.name()),
            None => llm.name().to_string(),
        }
    }
}
