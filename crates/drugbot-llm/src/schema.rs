use drugbot_core::QueryTool;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Function definition offered to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSchema {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSchema {
    pub fn for_tool(tool: QueryTool, default_limit: u32) -> Self {
        let mut properties = json!({
            "my_question": {
                "type": "string",
                "description": "The user's question, restated as a complete question."
            },
            "limit": {
                "type": "integer",
                "description": "Maximum number of rows to return. Use 0 for no limit.",
                "default": default_limit
            }
        });
        let mut required = vec!["my_question"];

        if tool.takes_original_query() {
            properties["original_query"] = json!({
                "type": "string",
                "description": "The user's search terms exactly as typed, including operators such as &, | and !."
            });
            required.push("original_query");
        }

        Self {
            name: tool.as_str().to_string(),
            description: tool.tool_doc().to_string(),
            parameters: json!({
                "type": "object",
                "properties": properties,
                "required": required,
            }),
        }
    }

    /// Chat-completions `tools` entry.
    pub fn to_wire(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// Schemas for every query tool, in routing order.
pub fn tool_schemas(default_limit: u32) -> Vec<ToolSchema> {
    QueryTool::ALL
        .iter()
        .map(|t| ToolSchema::for_tool(*t, default_limit))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_tools_in_order() {
        let names: Vec<String> = tool_schemas(20).into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["SQL_QueryTool", "Graph_QueryTool", "Fulltext_QueryTool", "Vector_QueryTool"]
        );
    }

    #[test]
    fn only_fulltext_requires_original_query() {
        let fts = ToolSchema::for_tool(QueryTool::Fulltext, 20);
        assert_eq!(fts.parameters["required"], json!(["my_question", "original_query"]));
        assert!(fts.parameters["properties"]["original_query"].is_object());

        let sql = ToolSchema::for_tool(QueryTool::Sql, 20);
        assert_eq!(sql.parameters["required"], json!(["my_question"]));
        assert!(sql.parameters["properties"]["original_query"].is_null());
        assert_eq!(sql.parameters["properties"]["limit"]["default"], json!(20));
    }

    #[test]
    fn wire_shape() {
        let wire = ToolSchema::for_tool(QueryTool::Vector, 20).to_wire();
        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "Vector_QueryTool");
        assert!(wire["function"]["description"]
            .as_str()
            .unwrap()
            .contains("definition of disorder"));
    }
}
