//! Static descriptions of the drug database handed to the model.

pub const PROPERTY_GRAPH_DEFINITION: &str = "CREATE PROPERTY GRAPH drug_graph
  VERTEX TABLES (
    Drug, Disorder, MOA
  )
EDGE TABLES (
  DrugDisorder SOURCE KEY (drug_cui) REFERENCES Drug (drug_cui)
               DESTINATION KEY (disorder_cui) REFERENCES Disorder (disorder_cui)
  LABEL MAY_TREAT,
  DrugMOA SOURCE KEY (drug_cui) REFERENCES Drug (drug_cui)
          DESTINATION KEY (moa_id) REFERENCES MOA (moa_id)
  LABEL HAS_MOA
);";

/// Run once against a fresh connection, in order.
pub const INITIALIZATION_COMMANDS: &[&str] = &[
    "LOAD duckpgq;",
    "LOAD fts;",
    "LOAD vss;",
    PROPERTY_GRAPH_DEFINITION,
];

const CORE_TABLES: &str = "The Drug table contains information about drugs. Each row represents a drug and has the following columns:
- drug_cui: The unique UMLS identifier for the drug.
- name: The name of the drug.

The Disorder table contains information about disorders. Each row represents a disorder and has the following columns:
- disorder_cui: The unique UMLS identifier for the disorder.
- name: The name of the disorder.
- definition: The definition of the disorder provided by UMLS.
- definitionEmbedding: The 1536 vector embedding of the definition of the disorder.

The MOA table contains information about the mechanism of action of drugs. Each row represents a mechanism of action and has the following columns:
- moa_id: The unique UMLS identifier for the mechanism of action.
- name: The name of the mechanism of action.

The DrugMOA table contains information about the relationship between drugs and their mechanisms of action. Each row represents that a drug has the mechanism of action and has the following columns:
- drug_cui: The unique UMLS identifier for the drug.
- moa_id: The unique UMLS identifier for the mechanism of action.

The DrugDisorder table contains information about the relationship between drugs and disorders. Each row represents that a drug may be used to treat a disorder and has the following columns:
- drug_cui: The unique UMLS identifier for the drug.
- disorder_cui: The unique UMLS identifier for the disorder.
";

const TRIALS_TABLE: &str = "
The Trials table contains information about 2000+ clinical trials. Each row represents a trial.
- PostingID: The unique id for the trial.
- Sponsor: The sponsor behind the trial.
- StudyTitle: The title of the trial. There is a full-text search index on this column. For example, you can use the match_bm25 function to search for relevant trials whose StudyTitle contain \"double blind & Valaciclovir\".
  SELECT PostingID as trial_id, StudyTitle, score
    FROM (
        SELECT *, fts_main_Trials.match_bm25(
            PostingID,
            'double blind & Valaciclovir',
            fields := 'StudyTitle'
        ) AS score
        FROM Trials
    )
    WHERE score IS NOT NULL
    ORDER BY score DESC LIMIT 5;
- Disorder: The disorder that the trial focuses on.
- Phase: The phase of the trial.
- LinkToSponsorStudyRegistry: The link to the sponsor's study registry.
- LinkToClinicalTrials: The link to the clinicaltrials.gov website.
- drug_cui: This column contains the drug_cui for the \"Drug\" that the trial tested. Use this column to join with the \"Drug\" table.
- drug_names: This column contains the drug names for the \"cui\" that the trial focuses on.
";

const GRAPH_SECTION: &str = "
There is a PROPERTY GRAPH called \"drug_graph\". This graph is defined as follows:
  VERTEX TABLES (
      Drug, Disorder, MOA
  )
  EDGE TABLES (
  DrugDisorder SOURCE KEY (drug_cui) REFERENCES Drug (drug_cui)
               DESTINATION KEY (disorder_cui) REFERENCES Disorder (disorder_cui)
  LABEL MAY_TREAT,
  DrugMOA SOURCE KEY (drug_cui) REFERENCES Drug (drug_cui)
          DESTINATION KEY (moa_id) REFERENCES MOA (moa_id)
  LABEL HAS_MOA
  );
";

/// Table info for relational queries.
pub fn sql_database_description() -> String {
    format!("{CORE_TABLES}{TRIALS_TABLE}")
}

/// Table info plus the property graph, for graph queries.
pub fn graph_database_description() -> String {
    format!("{CORE_TABLES}{GRAPH_SECTION}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptions_cover_their_routes() {
        let sql = sql_database_description();
        assert!(sql.contains("The Trials table"));
        assert!(sql.contains("match_bm25"));
        assert!(!sql.contains("PROPERTY GRAPH"));

        let graph = graph_database_description();
        assert!(graph.contains("PROPERTY GRAPH called \"drug_graph\""));
        assert!(!graph.contains("The Trials table"));
    }

    #[test]
    fn graph_definition_runs_last() {
        assert_eq!(INITIALIZATION_COMMANDS.len(), 4);
        assert!(INITIALIZATION_COMMANDS[3].starts_with("CREATE PROPERTY GRAPH drug_graph"));
    }
}
