/// Prompt turning a raw query result into a reply for the user.
pub fn prompt(question: &str, query_result: &str) -> String {
    format!(
        "Given the Question {question} and the query_result {query_result}, format the results \
         into sentences or a table for the human to understand.\n\
         Don't add any data or facts outside of the query_result.\n"
    )
}
