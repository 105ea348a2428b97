//! Routing a question to a query tool and drafting the query text.

use std::sync::Arc;

use drugbot_core::catalog::{Example, ExampleQuery, GRAPH_EXAMPLES, SQL_EXAMPLES};
use drugbot_core::{QueryTool, ToolArgs, ToolCall, DEFAULT_LIMIT};
use drugbot_llm::{tool_schemas, ChatPrompt, LlmClient};
use drugbot_prompts::{fulltext, graph, sanitize_query, sql, vector};

use crate::ServiceError;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Width of the `definitionEmbedding` column.
    pub embedding_dim: usize,
    /// Few-shot examples included in drafting prompts.
    pub few_shot_k: usize,
    /// Row limit for tool calls that do not name one. 0 means unbounded.
    pub default_limit: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            embedding_dim: 1536,
            few_shot_k: 5,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedQuery {
    pub tool: QueryTool,
    pub args: ToolArgs,
    pub query: String,
}

pub struct QueryGenerator {
    llm: Arc<dyn LlmClient>,
    config: GeneratorConfig,
}

impl QueryGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, config: GeneratorConfig) -> Self {
        Self { llm, config }
    }

    /// Let the model pick a tool for `question` and draft its query.
    ///
    /// Only the first tool call is drafted.
    pub async fn generate(&self, question: &str) -> Result<GeneratedQuery, ServiceError> {
        let calls = self
            .llm
            .choose_tools(question, &tool_schemas(self.config.default_limit))
            .await?;
        let first = calls.first().ok_or(ServiceError::NoToolCall)?;
        if calls.len() > 1 {
            tracing::warn!(
                ignored = calls.len() - 1,
                "model returned several tool calls, drafting the first"
            );
        }

        let call = ToolCall::parse(first, self.config.default_limit)?;
        tracing::info!(tool = %call.tool, limit = ?call.args.limit, "drafting query");
        let query = self.draft(&call).await?;
        Ok(GeneratedQuery {
            tool: call.tool,
            args: call.args,
            query,
        })
    }

    pub async fn draft(&self, call: &ToolCall) -> Result<String, ServiceError> {
        let args = &call.args;
        let k = self.config.few_shot_k;
        match call.tool {
            QueryTool::Sql => {
                self.draft_with_model(
                    sql::generation_prompt(&args.my_question, args.limit, SQL_EXAMPLES, k),
                    sql::validation_prompt(args.limit),
                )
                .await
            }
            QueryTool::Graph => {
                self.draft_with_model(
                    graph::generation_prompt(&args.my_question, args.limit, GRAPH_EXAMPLES, k),
                    graph::validation_prompt(args.limit),
                )
                .await
            }
            QueryTool::Fulltext => Ok(fulltext::render(
                &args.original_query,
                fulltext::DEFAULT_FIELD,
                args.limit,
            )),
            QueryTool::Vector => {
                let embedding = self.embed(&args.my_question).await?;
                Ok(vector::render(
                    &embedding,
                    self.config.embedding_dim,
                    args.limit,
                ))
            }
        }
    }

    /// Query text for a catalog example. Vector examples embed their phrase.
    pub async fn render_example(&self, example: &Example) -> Result<String, ServiceError> {
        let dim = self.config.embedding_dim;
        match &example.query {
            ExampleQuery::Literal(query) => Ok(query.to_string()),
            ExampleQuery::VectorSearch { phrase, limit } => {
                let embedding = self.embed(phrase).await?;
                Ok(vector::render(&embedding, dim, Some(*limit)))
            }
            ExampleQuery::VectorTrials {
                phrase,
                disorders,
                limit,
            } => {
                let embedding = self.embed(phrase).await?;
                Ok(vector::render_trials(
                    &embedding,
                    dim,
                    *disorders,
                    Some(*limit),
                ))
            }
        }
    }

    /// Draft with the generation prompt, then have the model check its own draft.
    async fn draft_with_model(
        &self,
        generation: String,
        validation: String,
    ) -> Result<String, ServiceError> {
        let draft = self.llm.complete(&ChatPrompt::user(generation)).await?;
        tracing::debug!(draft = %draft, "first draft");
        let checked = self
            .llm
            .complete(&ChatPrompt::user(draft).with_system(validation))
            .await?;
        Ok(sanitize_query(&checked))
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ServiceError> {
        let embedding = self.llm.embed(text).await?;
        if embedding.len() != self.config.embedding_dim {
            return Err(ServiceError::EmbeddingDimension {
                expected: self.config.embedding_dim,
                actual: embedding.len(),
            });
        }
        Ok(embedding)
    }
}
