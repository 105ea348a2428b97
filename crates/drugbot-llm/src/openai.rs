use std::time::Duration;

use async_trait::async_trait;
use drugbot_core::RawToolCall;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ChatPrompt, LlmClient, LlmError, ToolSchema};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub chat_model: String,
    pub embedding_model: String,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Chat-completions and embeddings client for OpenAI-compatible endpoints.
pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    chat_model: String,
    embedding_model: String,
    client: Client,
}

impl OpenAiClient {
    /// A missing key is not an error here; requests fail with
    /// [`LlmError::MissingApiKey`] instead.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let api_key = config.api_key.filter(|k| !k.trim().is_empty());
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            chat_model: config.chat_model,
            embedding_model: config.embedding_model,
            client,
        })
    }

    fn with_auth(&self, builder: RequestBuilder) -> Result<RequestBuilder, LlmError> {
        let key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;
        Ok(builder.header("Authorization", format!("Bearer {key}")))
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, LlmError> {
        let builder = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body);
        let resp = self.with_auth(builder)?.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let text = resp.text().await?;
        serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))
    }

    async fn chat(&self, request: &ChatRequest<'_>) -> Result<ResponseMessage, LlmError> {
        tracing::debug!(model = request.model, "chat completion request");
        let resp: ChatResponse = self.post_json("/chat/completions", request).await?;
        resp.choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or(LlmError::NoChoices)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn model_hint(&self) -> Option<&str> {
        Some(&self.chat_model)
    }

    fn preflight_check(&self) -> Result<(), LlmError> {
        match self.api_key {
            Some(_) => Ok(()),
            None => Err(LlmError::MissingApiKey),
        }
    }

    async fn choose_tools(
        &self,
        question: &str,
        tools: &[ToolSchema],
    ) -> Result<Vec<RawToolCall>, LlmError> {
        let wire_tools: Vec<Value> = tools.iter().map(ToolSchema::to_wire).collect();
        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![WireMessage {
                role: "user",
                content: question,
            }],
            tools: Some(wire_tools.as_slice()),
            tool_choice: Some("auto"),
            temperature: 0.0,
        };
        let message = self.chat(&request).await?;
        let calls: Vec<RawToolCall> = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|c| RawToolCall {
                name: c.function.name,
                arguments: c.function.arguments,
            })
            .collect();
        tracing::info!(
            calls = calls.len(),
            first = calls.first().map(|c| c.name.as_str()).unwrap_or("-"),
            "model routed question"
        );
        Ok(calls)
    }

    async fn complete(&self, prompt: &ChatPrompt) -> Result<String, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &prompt.system {
            messages.push(WireMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &prompt.user,
        });
        let request = ChatRequest {
            model: &self.chat_model,
            messages,
            tools: None,
            tool_choice: None,
            temperature: 0.0,
        };
        let message = self.chat(&request).await?;
        Ok(message.content.unwrap_or_default())
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        let input = text.replace('\n', " ");
        let request = EmbeddingRequest {
            model: &self.embedding_model,
            input: &input,
        };
        tracing::debug!(model = %self.embedding_model, "embedding request");
        let resp: EmbeddingResponse = self.post_json("/embeddings", &request).await?;
        resp.data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(LlmError::NoChoices)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Value]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'a str>,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Deserialize)]
struct WireToolCall {
    function: WireFunction,
}

#[derive(Deserialize)]
struct WireFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_fails_before_sending() {
        let client = OpenAiClient::new(OpenAiConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        })
        .unwrap();
        assert!(matches!(
            client.preflight_check(),
            Err(LlmError::MissingApiKey)
        ));
        assert!(matches!(
            client.complete(&ChatPrompt::user("hi")).await,
            Err(LlmError::MissingApiKey)
        ));

        let blank = OpenAiClient::new(OpenAiConfig {
            api_key: Some("  ".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(blank.preflight_check().is_err());
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = OpenAiClient::new(OpenAiConfig {
            api_key: Some("sk-test".into()),
            base_url: "http://localhost:8080/v1/".into(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/v1");
        assert!(client.preflight_check().is_ok());
        assert_eq!(client.model_hint(), Some("gpt-4o-mini"));
        assert_eq!(client.name(), "openai");
    }

    #[test]
    fn tool_call_response_decodes() {
        let body = r#"{
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "SQL_QueryTool",
                            "arguments": "{\"my_question\":\"How many drugs?\"}"
                        }
                    }]
                }
            }]
        }"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        let msg = &resp.choices[0].message;
        assert!(msg.content.is_none());
        let calls = msg.tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].function.name, "SQL_QueryTool");
        assert!(calls[0].function.arguments.contains("How many drugs?"));
    }

    #[test]
    fn plain_response_has_no_tool_calls() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hi","tool_calls":null}}]}"#;
        let resp: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("hi"));
        assert!(resp.choices[0].message.tool_calls.is_none());
    }

    #[test]
    fn chat_request_omits_tools_when_absent() {
        let req = ChatRequest {
            model: "m",
            messages: vec![WireMessage {
                role: "user",
                content: "q",
            }],
            tools: None,
            tool_choice: None,
            temperature: 0.0,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("tools").is_none());
        assert!(json.get("tool_choice").is_none());
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
