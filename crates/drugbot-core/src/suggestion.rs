use crate::tool::QueryTool;

const FALLBACK: &str = "Try rephrasing your question or using a different approach.";

/// Short hint for fixing a failed query, keyed on the error text.
pub fn suggestion_for(tool: QueryTool, error: &str) -> &'static str {
    let error = error.to_lowercase();
    let table: &[(&str, &str)] = match tool {
        QueryTool::Sql => &[
            ("syntax error", "Check the SQL syntax and ensure all columns and tables exist."),
            ("permission denied", "This query may require different permissions."),
            ("does not exist", "Verify that all table and column names are correct."),
            ("relation", "Verify that all table names are correct."),
        ],
        QueryTool::Graph => &[
            ("syntax error", "Graph queries start with FROM GRAPH_TABLE (drug_graph and bind every edge to a variable."),
            ("depth", "Try reducing the number of relationship levels."),
            ("cycle", "Check for circular relationships in the query."),
            ("timeout", "Add more specific filters to reduce the query scope."),
        ],
        QueryTool::Vector => &[
            ("dimension", "Ensure the query vector has the same width as the definitionEmbedding column."),
            ("invalid", "Check the vector format and normalization."),
        ],
        QueryTool::Fulltext => &[
            ("fts_main", "The full-text index on Trials may be missing; make sure the fts extension is loaded."),
            ("invalid", "Verify the search syntax and text formatting."),
            ("language", "Check if the text is in the expected language."),
        ],
    };

    table
        .iter()
        .find(|(needle, _)| error.contains(needle))
        .map(|(_, hint)| *hint)
        .unwrap_or(FALLBACK)
}
