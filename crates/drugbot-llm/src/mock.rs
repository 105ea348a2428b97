use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use drugbot_core::RawToolCall;

use crate::{ChatPrompt, LlmClient, LlmError, ToolSchema};

/// A scripted model for tests.
///
/// Tool-call batches and completions are served in FIFO order; every
/// completion prompt and embedded text is recorded.
pub struct MockLlm {
    tool_calls: Mutex<VecDeque<Vec<RawToolCall>>>,
    completions: Mutex<VecDeque<Result<String, String>>>,
    embedding: Vec<f32>,
    prompts: Mutex<Vec<ChatPrompt>>,
    embedded: Mutex<Vec<String>>,
}

impl MockLlm {
    pub fn new() -> Self {
        Self {
            tool_calls: Mutex::new(VecDeque::new()),
            completions: Mutex::new(VecDeque::new()),
            embedding: Vec::new(),
            prompts: Mutex::new(Vec::new()),
            embedded: Mutex::new(Vec::new()),
        }
    }

    /// Queue one routing response consisting of a single call.
    pub fn with_tool_call(self, call: RawToolCall) -> Self {
        self.with_tool_calls(vec![call])
    }

    pub fn with_tool_calls(self, calls: Vec<RawToolCall>) -> Self {
        lock(&self.tool_calls).push_back(calls);
        self
    }

    pub fn with_completion(self, text: &str) -> Self {
        lock(&self.completions).push_back(Ok(text.to_string()));
        self
    }

    /// Queue a completion that fails with an API error.
    pub fn with_completion_error(self, message: &str) -> Self {
        lock(&self.completions).push_back(Err(message.to_string()));
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn prompts(&self) -> Vec<ChatPrompt> {
        lock(&self.prompts).clone()
    }

    pub fn embedded_texts(&self) -> Vec<String> {
        lock(&self.embedded).clone()
    }

    pub fn remaining_completions(&self) -> usize {
        lock(&self.completions).len()
    }
}

impl Default for MockLlm {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl LlmClient for MockLlm {
    fn name(&self) -> &str {
        "mock"
    }

    async fn choose_tools(
        &self,
        _question: &str,
        _tools: &[ToolSchema],
    ) -> Result<Vec<RawToolCall>, LlmError> {
        Ok(lock(&self.tool_calls).pop_front().unwrap_or_default())
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError> {
        lock(&self.prompts).push(prompt.clone());
        match lock(&self.completions).pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(body)) => Err(LlmError::Api { status: 500, body }),
            None => Err(LlmError::NoChoices),
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        lock(&self.embedded).push(text.replace('\n', " "));
        Ok(self.embedding.clone())
    }
}
