use drugbot_core::catalog::Example;

use crate::few_shot;
use crate::schema;

/// Few-shot prompt asking for a DuckDB query answering `question`.
pub fn generation_prompt(question: &str, limit: Option<u32>, examples: &[Example], k: usize) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "You are a duckdb expert. Given an input question, create a syntactically correct DuckDB query to run. ",
    );
    match limit {
        Some(n) => prompt.push_str(&format!(
            "Unless otherwise specified, do not return more than {n} rows.\n\n"
        )),
        None => prompt.push_str("Return all matching rows.\n\n"),
    }
    prompt.push_str("Here is the relevant table info: ");
    prompt.push_str(&schema::sql_database_description());
    prompt.push_str(
        "\n\nBelow are a number of examples of questions and their corresponding SQL queries.\n\n",
    );
    few_shot::append_examples(&mut prompt, examples, "SQL query", k);
    prompt.push_str(&format!("User input: {question}\nSQL query: "));
    prompt
}

/// System prompt for the self-check pass over a drafted SQL query.
pub fn validation_prompt(limit: Option<u32>) -> String {
    let limit_rule = match limit {
        Some(n) => format!("- Write a LIMIT {n} clause at the end of the query.\n"),
        None => "- Do not write a LIMIT clause; return all rows.\n".to_string(),
    };
    format!(
        "Double check the user's duckdb query for common mistakes, including:\n\
         - If the search term contains a single quote, it should be escaped with another single quote. \
         For example, 'Alzheimer's Disease' should be 'Alzheimer''s Disease'.\n\
         - Only return SQL Query not anything else like ```sql ... ```\n\
         - Using NOT IN with NULL values\n\
         - Using UNION when UNION ALL should have been used\n\
         - Using BETWEEN for exclusive ranges\n\
         - Data type mismatch in predicates\n\
         - Using the correct number of arguments for functions\n\
         - Casting to the correct data type\n\
         - Using the proper columns for joins\n\
         {limit_rule}\
         - Never write 'LIMIT 0', instead, remove the LIMIT clause entirely.\n\
         - Make sure all parentheses are balanced.\n\
         - Ends with a semicolon\n\n\
         If there are any of the above mistakes, rewrite the query.\n\
         If there are no mistakes, just reproduce the original query with no further commentary.\n\n\
         Output the final SQL query only."
    )
}

#[cfg(test)]
mod tests {
    use drugbot_core::catalog::SQL_EXAMPLES;

    use super::*;

    #[test]
    fn generation_prompt_shape() {
        let p = generation_prompt("How many trials are there?", Some(20), SQL_EXAMPLES, 5);
        assert!(p.contains("do not return more than 20 rows"));
        assert!(p.contains("The Drug table"));
        assert_eq!(p.matches("User input:").count(), 6);
        assert!(p.ends_with("User input: How many trials are there?\nSQL query: "));
    }

    #[test]
    fn unbounded_prompts_never_ask_for_limit() {
        let p = generation_prompt("all drugs", None, SQL_EXAMPLES, 0);
        assert!(p.contains("Return all matching rows."));
        let v = validation_prompt(None);
        assert!(v.contains("Do not write a LIMIT clause"));
        assert!(!v.contains("Write a LIMIT"));
    }

    #[test]
    fn validation_prompt_carries_limit() {
        let v = validation_prompt(Some(7));
        assert!(v.contains("Write a LIMIT 7 clause"));
        assert!(v.contains("'Alzheimer''s Disease'"));
    }
}
