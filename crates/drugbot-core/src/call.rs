use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DrugbotError;
use crate::tool::QueryTool;

/// Row limit applied when the model does not pass one.
pub const DEFAULT_LIMIT: u32 = 20;

/// A tool call exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawToolCall {
    pub name: String,
    /// JSON-encoded argument object.
    pub arguments: String,
}

impl RawToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments: arguments.to_string(),
        }
    }
}

/// Arguments every query tool receives after defaulting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolArgs {
    pub my_question: String,
    /// Search terms kept verbatim; falls back to `my_question`.
    pub original_query: String,
    /// `None` means the query carries no LIMIT clause.
    pub limit: Option<u32>,
}

impl ToolArgs {
    /// Normalize the model's raw argument object.
    pub fn from_raw(raw: &Value) -> Result<Self, DrugbotError> {
        Self::from_raw_with_limit(raw, DEFAULT_LIMIT)
    }

    /// Like [`from_raw`](Self::from_raw) with a caller-chosen limit for calls that omit one.
    pub fn from_raw_with_limit(raw: &Value, default_limit: u32) -> Result<Self, DrugbotError> {
        let obj = raw
            .as_object()
            .ok_or_else(|| DrugbotError::InvalidArguments("expected a JSON object".into()))?;

        let my_question = obj
            .get("my_question")
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| DrugbotError::InvalidArguments("missing my_question".into()))?;

        let original_query = obj
            .get("original_query")
            .and_then(Value::as_str)
            .filter(|q| !q.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| my_question.clone());

        let limit = match obj.get("limit") {
            None | Some(Value::Null) => Some(default_limit).filter(|n| *n > 0),
            Some(v) => parse_limit(v)?,
        };

        Ok(Self {
            my_question,
            original_query,
            limit,
        })
    }
}

fn parse_limit(v: &Value) -> Result<Option<u32>, DrugbotError> {
    let n = match v {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
    .ok_or_else(|| DrugbotError::InvalidArguments(format!("invalid limit: {v}")))?;

    if n == 0 {
        return Ok(None);
    }
    u32::try_from(n)
        .map(Some)
        .map_err(|_| DrugbotError::InvalidArguments(format!("limit out of range: {n}")))
}

/// A routed tool call with normalized arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: QueryTool,
    pub args: ToolArgs,
}

impl ToolCall {
    pub fn parse(raw: &RawToolCall, default_limit: u32) -> Result<Self, DrugbotError> {
        let tool = QueryTool::parse_str(&raw.name)
            .ok_or_else(|| DrugbotError::UnknownTool(raw.name.clone()))?;
        let value: Value = serde_json::from_str(&raw.arguments)
            .map_err(|e| DrugbotError::InvalidArguments(e.to_string()))?;
        let args = ToolArgs::from_raw_with_limit(&value, default_limit)?;
        Ok(Self { tool, args })
    }
}

impl TryFrom<&RawToolCall> for ToolCall {
    type Error = DrugbotError;

    fn try_from(raw: &RawToolCall) -> Result<Self, Self::Error> {
        Self::parse(raw, DEFAULT_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn defaults_original_query_and_limit() {
        let args = ToolArgs::from_raw(&json!({"my_question": "How many drugs are there"})).unwrap();
        assert_eq!(args.original_query, "How many drugs are there");
        assert_eq!(args.limit, Some(DEFAULT_LIMIT));
    }

    #[test]
    fn keeps_explicit_values() {
        let args = ToolArgs::from_raw(&json!({
            "my_question": "trials about valaciclovir",
            "original_query": "double blind & Valaciclovir",
            "limit": 3
        }))
        .unwrap();
        assert_eq!(args.original_query, "double blind & Valaciclovir");
        assert_eq!(args.limit, Some(3));
    }

    #[test]
    fn empty_original_query_falls_back() {
        let args =
            ToolArgs::from_raw(&json!({"my_question": "q", "original_query": "  "})).unwrap();
        assert_eq!(args.original_query, "q");
    }

    #[test]
    fn zero_limit_means_unbounded() {
        let args = ToolArgs::from_raw(&json!({"my_question": "q", "limit": 0})).unwrap();
        assert_eq!(args.limit, None);
    }

    #[test]
    fn string_limit_is_accepted() {
        let args = ToolArgs::from_raw(&json!({"my_question": "q", "limit": "7"})).unwrap();
        assert_eq!(args.limit, Some(7));
    }

    #[test]
    fn rejects_missing_question_and_bad_limit() {
        assert!(ToolArgs::from_raw(&json!({"limit": 3})).is_err());
        assert!(ToolArgs::from_raw(&json!({"my_question": "q", "limit": -1})).is_err());
        assert!(ToolArgs::from_raw(&json!("just a string")).is_err());
    }

    #[test]
    fn configured_default_limit() {
        let raw = RawToolCall::new("SQL_QueryTool", json!({"my_question": "q"}));
        assert_eq!(ToolCall::parse(&raw, 50).unwrap().args.limit, Some(50));
        assert_eq!(ToolCall::parse(&raw, 0).unwrap().args.limit, None);

        let explicit = RawToolCall::new("SQL_QueryTool", json!({"my_question": "q", "limit": 4}));
        assert_eq!(ToolCall::parse(&explicit, 50).unwrap().args.limit, Some(4));
    }

    #[test]
    fn raw_call_conversion() {
        let raw = RawToolCall::new("Graph_QueryTool", json!({"my_question": "MOA of aspirin"}));
        let call = ToolCall::try_from(&raw).unwrap();
        assert_eq!(call.tool, QueryTool::Graph);
        assert_eq!(call.args.my_question, "MOA of aspirin");

        let unknown = RawToolCall::new("Shell_Tool", json!({"my_question": "x"}));
        assert!(matches!(
            ToolCall::try_from(&unknown),
            Err(DrugbotError::UnknownTool(name)) if name == "Shell_Tool"
        ));

        let garbled = RawToolCall {
            name: "SQL_QueryTool".into(),
            arguments: "{not json".into(),
        };
        assert!(matches!(
            ToolCall::try_from(&garbled),
            Err(DrugbotError::InvalidArguments(_))
        ));
    }
}
