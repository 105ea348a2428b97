pub mod answer;
pub mod few_shot;
pub mod fulltext;
pub mod graph;
pub mod schema;
pub mod sql;
pub mod vector;

pub use schema::{INITIALIZATION_COMMANDS, PROPERTY_GRAPH_DEFINITION};

/// Info strings a model may put after an opening code fence.
const FENCE_LANGUAGES: &[&str] = &["sql", "duckdb", "pgql", "cypher"];

/// Strip markdown fences and chain labels the model sometimes wraps queries in.
pub fn sanitize_query(raw: &str) -> String {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.trim_end();
        let body = rest.strip_suffix("```").unwrap_or(rest);
        text = strip_fence_language(body).trim();
    }

    for label in ["SQLQuery:", "SQL query:", "graph query:"] {
        if let Some(rest) = text.strip_prefix(label) {
            text = rest.trim();
        }
    }

    text.to_string()
}

/// Drop a leading info string such as `sql`, whether the query follows on
/// the next line or on the fence line itself.
fn strip_fence_language(body: &str) -> &str {
    let word_end = body.find(char::is_whitespace).unwrap_or(body.len());
    let (word, tail) = body.split_at(word_end);
    if FENCE_LANGUAGES
        .iter()
        .any(|lang| word.eq_ignore_ascii_case(lang))
    {
        tail
    } else {
        body
    }
}

/// LIMIT clause for an optional row limit, with the trailing semicolon.
pub(crate) fn limit_clause(limit: Option<u32>) -> String {
    match limit {
        Some(n) => format!("LIMIT {n};"),
        None => ";".to_string(),
    }
}
