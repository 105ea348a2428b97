use std::sync::LazyLock;

use regex::Regex;

use crate::tool::QueryTool;

static EMBEDDING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)array_distance\(\s*definitionEmbedding\s*,\s*\[.*?\]\s*::\s*FLOAT\[(\d+)\]")
        .expect("embedding literal pattern is valid")
});

pub fn tool_header(tool: QueryTool) -> String {
    format!("This query uses the {}", tool.display_name())
}

/// Collapse inline embedding vectors so vector queries stay readable.
pub fn abbreviate_embedding(query: &str) -> String {
    EMBEDDING_LITERAL
        .replace_all(
            query,
            "array_distance(definitionEmbedding, {...embedding...}::FLOAT[$1]",
        )
        .into_owned()
}

/// Whether [`abbreviate_embedding`] would change the query.
pub fn has_embedding_literal(query: &str) -> bool {
    EMBEDDING_LITERAL.is_match(query)
}
