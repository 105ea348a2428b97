use crate::limit_clause;

/// Render an embedding as a DuckDB list literal.
pub fn embedding_literal(embedding: &[f32]) -> String {
    let parts: Vec<String> = embedding.iter().map(|v| v.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

/// Disorders whose definitions sit closest to the embedded question.
pub fn render(embedding: &[f32], dim: usize, limit: Option<u32>) -> String {
    format!(
        "SELECT name, definition
FROM Disorder
ORDER BY array_distance(definitionEmbedding, {vector}::FLOAT[{dim}])
{limit}",
        vector = embedding_literal(embedding),
        limit = limit_clause(limit),
    )
}

/// Trials testing drugs that may treat the `disorders` nearest disorders.
pub fn render_trials(embedding: &[f32], dim: usize, disorders: u32, limit: Option<u32>) -> String {
    format!(
        "SELECT Trials.PostingID AS trial_id, Trials.StudyTitle AS StudyTitle, target_disease.name, drug_for_disorder.drug_name
FROM
Trials,
(
    SELECT disorder_cui, name
    FROM Disorder
    ORDER BY array_distance(definitionEmbedding, {vector}::FLOAT[{dim}])
    LIMIT {disorders}
) target_disease,
GRAPH_TABLE(
    drug_graph
    MATCH (i:Drug)-[m:MAY_TREAT]->(c:Disorder)
    COLUMNS (i.drug_cui AS drug_cui, i.name AS drug_name, c.disorder_cui AS disorder_cui)
) drug_for_disorder
WHERE target_disease.disorder_cui = drug_for_disorder.disorder_cui
AND list_contains(Trials.drug_cui, drug_for_disorder.drug_cui) {limit}",
        vector = embedding_literal(embedding),
        limit = limit_clause(limit),
    )
}
