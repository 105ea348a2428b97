use drugbot_core::catalog::Example;

/// Append up to `k` worked examples as `User input` / `{label}` pairs.
///
/// Examples without a literal query (vector templates) are skipped.
pub fn append_examples(prompt: &mut String, examples: &[Example], label: &str, k: usize) {
    for (input, query) in examples
        .iter()
        .filter_map(|e| e.literal_query().map(|q| (e.input, q)))
        .take(k)
    {
        prompt.push_str(&format!("User input: {input}\n{label}: {query}\n\n"));
    }
}

#[cfg(test)]
mod tests {
    use drugbot_core::catalog::{SQL_EXAMPLES, VECTOR_EXAMPLES};

    use super::*;

    #[test]
    fn respects_k() {
        let mut out = String::new();
        append_examples(&mut out, SQL_EXAMPLES, "SQL query", 2);
        assert_eq!(out.matches("User input:").count(), 2);
        assert!(out.contains("How many drugs are there"));
    }

    #[test]
    fn skips_templates() {
        let mut out = String::new();
        append_examples(&mut out, VECTOR_EXAMPLES, "SQL query", 5);
        assert!(out.is_empty());
    }
}
