//! Canned questions with known-good queries.
//!
//! They are offered to the user as shortcuts and the SQL and graph ones
//! also serve as few-shot examples when drafting queries.

use crate::tool::QueryTool;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleQuery {
    Literal(&'static str),
    /// Nearest disorder definitions to an embedded phrase.
    VectorSearch { phrase: &'static str, limit: u32 },
    /// Trials testing drugs for the disorders nearest to an embedded phrase.
    VectorTrials {
        phrase: &'static str,
        disorders: u32,
        limit: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub input: &'static str,
    pub tool: QueryTool,
    pub query: ExampleQuery,
}

impl Example {
    pub fn literal_query(&self) -> Option<&'static str> {
        match self.query {
            ExampleQuery::Literal(q) => Some(q),
            _ => None,
        }
    }
}

const fn literal(input: &'static str, tool: QueryTool, query: &'static str) -> Example {
    Example {
        input,
        tool,
        query: ExampleQuery::Literal(query),
    }
}

pub static SQL_EXAMPLES: &[Example] = &[
    literal(
        "How many drugs are there",
        QueryTool::Sql,
        r#"SELECT COUNT("drug_cui") AS "drug_count" FROM "Drug""#,
    ),
    literal(
        "What is the MOA of abiraterone",
        QueryTool::Sql,
        "SELECT MOA.name
FROM DrugMOA, Drug, MOA
WHERE DrugMOA.drug_cui = Drug.drug_cui
AND DrugMOA.moa_id = MOA.moa_id
AND LOWER(Drug.name) = LOWER('abiraterone');",
    ),
    literal(
        "What diseases can fluocinolone acetonide treat?",
        QueryTool::Sql,
        "SELECT Disorder.name
FROM DrugDisorder, Drug, Disorder
WHERE DrugDisorder.drug_cui = Drug.drug_cui
AND DrugDisorder.disorder_cui = Disorder.disorder_cui
AND LOWER(Drug.name) = LOWER('fluocinolone acetonide');",
    ),
    literal(
        "Show 5 trials and their drugs. At least one of the drugs must be used to treat against the Non-small cell lung carcinoma?",
        QueryTool::Sql,
        "SELECT Trials.StudyTitle as StudyTitle, drug_for_disease.drug_name
FROM Trials,
GRAPH_TABLE(
    drug_graph
    MATCH
    (i:Drug)-[m:MAY_TREAT]->(c:Disorder WHERE LOWER(c.name) = LOWER('Non-small cell lung carcinoma'))
    COLUMNS (i.drug_cui AS drug_cui, i.name AS drug_name)
) drug_for_disease
WHERE list_contains(Trials.drug_cui, drug_for_disease.drug_cui)
LIMIT 5;",
    ),
    literal(
        "Count all the trials with 'Fluticasone propionate' by sponsor and then by phase?",
        QueryTool::Sql,
        "SELECT Sponsor, Phase, COUNT(PostingID) AS trial_count
FROM Trials, Drug
WHERE LOWER(Drug.name) = LOWER('Fluticasone propionate') AND list_contains(Trials.drug_cui, Drug.drug_cui)
GROUP BY Sponsor, Phase
ORDER BY Sponsor, Phase;",
    ),
];

pub static GRAPH_EXAMPLES: &[Example] = &[
    literal(
        "What is the MOA of Nicotinamide? Use the graph query.",
        QueryTool::Graph,
        "FROM GRAPH_TABLE (drug_graph
    MATCH
    (d:Drug WHERE LOWER(d.name) = LOWER('Nicotinamide'))-[h:HAS_MOA]->(m:MOA)
    COLUMNS (m.name AS moa_name)
)
LIMIT 20;",
    ),
    literal(
        "Which drugs can be used to treat Alzheimer's Disease? Only give me all results without limit.",
        QueryTool::Graph,
        "FROM GRAPH_TABLE (drug_graph
    MATCH
    (i:Drug)-[m:MAY_TREAT]->(c:Disorder WHERE LOWER(c.name) = LOWER('Alzheimer''s Disease'))
    COLUMNS (i.name AS drug_name)
);",
    ),
    literal(
        "What is the mechanism of action of drugs that can treat Alzheimer's Disease? Give me 5 drugs and their MOA.",
        QueryTool::Graph,
        "FROM GRAPH_TABLE (drug_graph
    MATCH
    (mo:MOA)<-[h:HAS_MOA]-(i:Drug)-[m:MAY_TREAT]->(c:Disorder WHERE LOWER(c.name) = LOWER('Alzheimer''s Disease'))
    COLUMNS (i.name AS drug_name, mo.name AS moa_name)
)
LIMIT 5;",
    ),
    literal(
        "What is kind of disorders can a drug with the MOA of 'GABA B receptor interactions' treat? Give me 3 drugs and their targeting disorders.",
        QueryTool::Graph,
        "FROM GRAPH_TABLE (drug_graph
    MATCH
    (mo:MOA WHERE LOWER(mo.name) = LOWER('GABA B receptor interactions'))<-[h:HAS_MOA]-(i:Drug)-[m:MAY_TREAT]->(c:Disorder)
    COLUMNS (i.name AS drug_name, c.name AS disorder_name)
)
LIMIT 3;",
    ),
    literal(
        "What diseases can etoposide treat? Only give me all results without limit.",
        QueryTool::Graph,
        "FROM GRAPH_TABLE (drug_graph
    MATCH
    (i:Drug WHERE LOWER(i.name) = LOWER('etoposide'))-[m:MAY_TREAT]->(c:Disorder)
    COLUMNS (c.name AS disorder_name)
);",
    ),
];

pub static FULLTEXT_EXAMPLES: &[Example] = &[literal(
    r#"Search 3 trials with these words in their titles "double blind & Valaciclovir"."#,
    QueryTool::Fulltext,
    "SELECT PostingID as trial_id, StudyTitle, score
FROM (
    SELECT *, fts_main_Trials.match_bm25(
        PostingID,
        'double blind & Valaciclovir',
        fields := 'StudyTitle'
    ) AS score
    FROM Trials
)
WHERE score IS NOT NULL
ORDER BY score DESC LIMIT 3;",
)];

pub static VECTOR_EXAMPLES: &[Example] = &[
    Example {
        input: "Show 3 joint-related disorder?",
        tool: QueryTool::Vector,
        query: ExampleQuery::VectorSearch {
            phrase: "joint-related disorder",
            limit: 3,
        },
    },
    Example {
        input: "Show 3 trials that tested drugs against the top 10 joint-related disorders",
        tool: QueryTool::Vector,
        query: ExampleQuery::VectorTrials {
            phrase: "joint-related disorder",
            disorders: 10,
            limit: 3,
        },
    },
];

/// All examples in sidebar order.
pub fn examples() -> Vec<&'static Example> {
    SQL_EXAMPLES
        .iter()
        .chain(GRAPH_EXAMPLES)
        .chain(FULLTEXT_EXAMPLES)
        .chain(VECTOR_EXAMPLES)
        .collect()
}
