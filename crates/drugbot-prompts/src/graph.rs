use drugbot_core::catalog::Example;

use crate::few_shot;
use crate::schema;

pub fn generation_prompt(question: &str, limit: Option<u32>, examples: &[Example], k: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are a graph expert. Given an input question, create a syntactically correct graph query to run. ",
    );
    if let Some(n) = limit {
        prompt.push_str(&format!(
            "Unless otherwise specified, do not return more than {n} rows."
        ));
    }
    prompt.push_str("\n\nHere is the relevant table info: ");
    prompt.push_str(&schema::graph_database_description());
    prompt.push_str(
        "\n\nBelow are a number of examples of questions and their corresponding graph queries.\n\n",
    );
    few_shot::append_examples(&mut prompt, examples, "graph query", k);
    prompt.push_str(&format!("User input: {question}\ngraph query: "));
    prompt
}

/// System prompt for the self-check pass over a drafted DuckPGQ query.
pub fn validation_prompt(limit: Option<u32>) -> String {
    let limit_rule = match limit {
        Some(n) => format!("- Write a LIMIT {n} clause at the end of the query.\n"),
        None => "- Do not write a LIMIT clause, but keep the closing parenthesis of the COLUMNS () clause.\n"
            .to_string(),
    };
    format!(
        "DuckPGQ is very similar to Cypher. But there are some differences.\n\
         Double check the user's DuckPGQ graph query for common mistakes, including:\n\
         - If the search term contains a single quote, it should be escaped with another single quote. \
         For example, 'Alzheimer's Disease' should be 'Alzheimer''s Disease'.\n\
         - It must start with \"FROM GRAPH_TABLE (drug_graph\" before the MATCH clause. \
         It ends with a closing parenthesis before the LIMIT clause.\n\
         - Only return the graph query, not anything else like ```sql ... ```\n\
         - Every variable in the graph pattern has to be bound by a variable. For example, \
         (i:Drug)-[:MAY_TREAT]->(c:Disorder WHERE c.name = 'Alzheimer''s Disease') is not correct \
         because :MAY_TREAT is not bound to a variable. Instead, it should be \
         (i:Drug)-[m:MAY_TREAT]->(c:Disorder WHERE c.name = 'Alzheimer''s Disease').\n\
         - Use \"COLUMNS\" as the return statement in the graph query.\n\
         - Replace all line breaks with a space.\n\
         {limit_rule}\
         - Never write 'LIMIT 0', instead, remove the LIMIT clause entirely but not the closing \
         parenthesis before it, because that closing parenthesis belongs to the COLUMNS () clause.\n\
         - Make sure all parentheses are balanced.\n\
         - Ends with a semicolon\n\n\
         If there are any of the above mistakes, rewrite the query.\n\
         If there are no mistakes, just reproduce the original query with no further commentary.\n\n\
         Output the final graph query only."
    )
}
