use crate::limit_clause;

/// Column carrying the BM25 index.
pub const DEFAULT_FIELD: &str = "StudyTitle";

/// Double single quotes so the search terms survive inside a SQL literal.
pub fn escape_literal(text: &str) -> String {
    text.replace('\'', "''")
}

/// BM25 search over the trial titles, best matches first.
pub fn render(original_query: &str, field: &str, limit: Option<u32>) -> String {
    format!(
        "SELECT PostingID as trial_id, StudyTitle, score
FROM (
    SELECT *, fts_main_Trials.match_bm25(
        PostingID,
        '{terms}',
        fields := '{field}'
    ) AS score
    FROM Trials
)
WHERE score IS NOT NULL
ORDER BY score DESC {limit}",
        terms = escape_literal(original_query),
        field = escape_literal(field),
        limit = limit_clause(limit),
    )
}
