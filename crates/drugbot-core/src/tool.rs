use std::fmt;

use serde::{Deserialize, Serialize};

/// The four query strategies the model can route a question to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryTool {
    #[serde(rename = "SQL_QueryTool")]
    Sql,
    #[serde(rename = "Graph_QueryTool")]
    Graph,
    #[serde(rename = "Fulltext_QueryTool")]
    Fulltext,
    #[serde(rename = "Vector_QueryTool")]
    Vector,
}

impl QueryTool {
    pub const ALL: &[QueryTool] = &[
        QueryTool::Sql,
        QueryTool::Graph,
        QueryTool::Fulltext,
        QueryTool::Vector,
    ];

    /// Function name registered with the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryTool::Sql => "SQL_QueryTool",
            QueryTool::Graph => "Graph_QueryTool",
            QueryTool::Fulltext => "Fulltext_QueryTool",
            QueryTool::Vector => "Vector_QueryTool",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "SQL_QueryTool" => Some(QueryTool::Sql),
            "Graph_QueryTool" => Some(QueryTool::Graph),
            "Fulltext_QueryTool" => Some(QueryTool::Fulltext),
            "Vector_QueryTool" => Some(QueryTool::Vector),
            _ => None,
        }
    }

    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Short label used where the web UI showed an icon.
    pub fn badge(&self) -> &'static str {
        match self {
            QueryTool::Sql => "SQL",
            QueryTool::Graph => "GRAPH",
            QueryTool::Fulltext => "FTS",
            QueryTool::Vector => "VEC",
        }
    }

    /// What the tool is for, shown to the human reviewing a query.
    pub fn description(&self) -> &'static str {
        match self {
            QueryTool::Sql => "For all tables in the DrugDB",
            QueryTool::Graph => "For the relation-rich drugs, disorders, and MOA data",
            QueryTool::Fulltext => "Only for the study titles of clinical trials",
            QueryTool::Vector => "Only for the disorder definitions",
        }
    }

    /// Function description sent to the model when it picks a route.
    pub fn tool_doc(&self) -> &'static str {
        match self {
            QueryTool::Sql => "Use the SQL route to get the answer from the database",
            QueryTool::Graph => {
                "Use the graph query language route to get the answer from the database. \
                 Only suitable for questions that involve the interrelationship between \
                 the Drugs, Disorders, and MOA tables."
            }
            QueryTool::Fulltext => {
                "Use the full text search to get the trials from the database. Only suitable \
                 for questions that involve the StudyTitle. Use this tool when users question \
                 does not read like a sentence and looks like some keywords instead. Keep the \
                 original query for the user's reference. And keep all the operators such as \
                 &, |, and ! in the query."
            }
            QueryTool::Vector => {
                "Use the vector search to get the disorder from the database. Only suitable \
                 for questions that involve the definition of disorder."
            }
        }
    }

    /// Whether the model must pass the user's search terms verbatim.
    pub fn takes_original_query(&self) -> bool {
        matches!(self, QueryTool::Fulltext)
    }
}

impl fmt::Display for QueryTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
