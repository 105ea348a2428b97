//! End-to-end chat workflow with a scripted model and an in-memory database.

use std::sync::Arc;

use drugbot_core::catalog::{FULLTEXT_EXAMPLES, VECTOR_EXAMPLES};
use drugbot_core::{QueryTool, RawToolCall};
use drugbot_db::DrugDb;
use drugbot_llm::MockLlm;
use drugbot_service::{
    BlockingWorkflow, ChatWorkflow, GeneratorConfig, Outcome, ServiceError, NO_RESULTS,
};
use serde_json::json;

const SCHEMA: &str = "
CREATE TABLE Drug (drug_cui VARCHAR PRIMARY KEY, name VARCHAR);
INSERT INTO Drug VALUES ('C0000001', 'abiraterone'), ('C0000002', 'etoposide');
";

fn db() -> Arc<DrugDb> {
    let db = DrugDb::open_in_memory().unwrap();
    db.execute_batch(SCHEMA).unwrap();
    Arc::new(db)
}

fn config() -> GeneratorConfig {
    GeneratorConfig {
        embedding_dim: 2,
        ..Default::default()
    }
}

fn sql_call(question: &str) -> RawToolCall {
    RawToolCall::new("SQL_QueryTool", json!({ "my_question": question }))
}

fn workflow(mock: MockLlm) -> (ChatWorkflow, Arc<MockLlm>) {
    let mock = Arc::new(mock);
    (ChatWorkflow::new(mock.clone(), db(), config()), mock)
}

#[tokio::test]
async fn submit_confirm_answer() {
    let (mut wf, mock) = workflow(
        MockLlm::new()
            .with_tool_call(sql_call("How many drugs are there?"))
            .with_completion("SELECT count(*) FROM Drug")
            .with_completion("SELECT count(*) AS drug_count FROM Drug;")
            .with_completion("There are 2 drugs."),
    );

    let generated = wf.submit("How many drugs are there?").await.unwrap();
    assert_eq!(generated.tool, QueryTool::Sql);
    assert!(wf.session().awaiting_confirmation());
    assert_eq!(
        wf.session().pending().unwrap().query,
        "SELECT count(*) AS drug_count FROM Drug;"
    );

    let edited = "SELECT count(*) AS n FROM Drug;";
    let outcome = wf.confirm(edited).await.unwrap();
    assert_eq!(
        outcome,
        Outcome::Answered {
            answer: "There are 2 drugs.".into()
        }
    );

    let session = wf.session();
    assert!(!session.awaiting_confirmation());
    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].is_user());
    assert_eq!(messages[1].content(), "There are 2 drugs.");
    assert_eq!(messages[1].tool(), Some(QueryTool::Sql));
    assert_eq!(messages[1].executed_query(), Some(edited));

    // The answer prompt sees the original question and the edited query's result.
    let last = mock.prompts().pop().unwrap();
    assert!(last.user.contains("How many drugs are there?"));
    assert!(last.user.contains("n\n2"));
}

#[tokio::test]
async fn empty_result_skips_formatting() {
    let (mut wf, mock) = workflow(
        MockLlm::new()
            .with_tool_call(sql_call("Is there a drug called zzz?"))
            .with_completion("draft")
            .with_completion("SELECT name FROM Drug WHERE name = 'zzz';")
            .with_completion("should not be used"),
    );

    wf.submit("Is there a drug called zzz?").await.unwrap();
    let pending = wf.session().pending().unwrap().query.clone();
    let outcome = wf.confirm(&pending).await.unwrap();

    assert_eq!(
        outcome,
        Outcome::Answered {
            answer: NO_RESULTS.into()
        }
    );
    assert_eq!(mock.remaining_completions(), 1);
    assert_eq!(wf.session().transcript().len(), 2);
}

#[tokio::test]
async fn failure_keeps_draft_for_retry() {
    let (mut wf, _) = workflow(
        MockLlm::new()
            .with_tool_call(sql_call("List drugs"))
            .with_completion("draft")
            .with_completion("SELECT nme FROM Drug;")
            .with_completion("abiraterone and etoposide"),
    );

    wf.submit("List drugs").await.unwrap();
    let outcome = wf.confirm("SELECT nme FROM Drug;").await.unwrap();
    let Outcome::Failed { error } = outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(error.contains("nme"));

    let session = wf.session();
    assert!(session.awaiting_confirmation());
    assert_eq!(session.retry_count(), 1);
    assert_eq!(session.last_error(), Some(error.as_str()));
    assert_eq!(session.pending().unwrap().query, "SELECT nme FROM Drug;");
    assert_eq!(session.transcript().len(), 1);

    let again = wf.confirm("SELECT nme FROM Drug;").await.unwrap();
    assert!(matches!(again, Outcome::Failed { .. }));
    assert_eq!(wf.session().retry_count(), 2);

    let fixed = wf.confirm("SELECT name FROM Drug ORDER BY name;").await.unwrap();
    assert!(matches!(fixed, Outcome::Answered { .. }));
    assert_eq!(wf.session().retry_count(), 0);
    assert_eq!(wf.session().last_error(), None);
    assert_eq!(wf.session().transcript().len(), 2);
}

#[tokio::test]
async fn formatting_error_is_a_failure() {
    let (mut wf, _) = workflow(
        MockLlm::new()
            .with_tool_call(sql_call("List drugs"))
            .with_completion("draft")
            .with_completion("SELECT name FROM Drug;")
            .with_completion_error("rate limited"),
    );

    wf.submit("List drugs").await.unwrap();
    let outcome = wf.confirm("SELECT name FROM Drug;").await.unwrap();
    let Outcome::Failed { error } = outcome else {
        panic!("expected failure");
    };
    assert!(error.contains("rate limited"));
    assert!(wf.session().awaiting_confirmation());
}

#[tokio::test]
async fn reject_leaves_transcript_alone() {
    let (mut wf, _) = workflow(
        MockLlm::new()
            .with_tool_call(sql_call("List drugs"))
            .with_completion("draft")
            .with_completion("SELECT name FROM Drug;"),
    );

    wf.submit("List drugs").await.unwrap();
    assert_eq!(wf.reject().unwrap(), Outcome::Rejected);
    assert!(!wf.session().awaiting_confirmation());
    assert_eq!(wf.session().transcript().len(), 1);

    assert!(matches!(wf.reject(), Err(ServiceError::NothingPending)));
    assert!(matches!(
        wf.confirm("SELECT 1;").await,
        Err(ServiceError::NothingPending)
    ));
}

#[tokio::test]
async fn routing_failure_keeps_question() {
    let (mut wf, _) = workflow(MockLlm::new());

    let err = wf.submit("hello there").await.unwrap_err();
    assert!(matches!(err, ServiceError::NoToolCall));
    assert!(!wf.session().awaiting_confirmation());
    let messages = wf.session().transcript().messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content(), "hello there");
}

#[tokio::test]
async fn examples_install_their_query() {
    let (mut wf, mock) = workflow(MockLlm::new().with_embedding(vec![0.5, 0.5]));

    let fts = &FULLTEXT_EXAMPLES[0];
    wf.select_example(fts).await.unwrap();
    let pending = wf.session().pending().unwrap().clone();
    assert_eq!(pending.tool, QueryTool::Fulltext);
    assert_eq!(Some(pending.query.as_str()), fts.literal_query());
    assert_eq!(pending.chain_input, fts.input);

    let vector = &VECTOR_EXAMPLES[0];
    wf.select_example(vector).await.unwrap();
    let pending = wf.session().pending().unwrap();
    assert_eq!(pending.tool, QueryTool::Vector);
    assert!(pending.query.contains("[0.5, 0.5]::FLOAT[2]"));
    assert_eq!(mock.embedded_texts().len(), 1);
    assert_eq!(wf.session().transcript().len(), 2);
}

#[test]
fn blocking_wrapper_round_trip() {
    let mock = Arc::new(
        MockLlm::new()
            .with_tool_call(sql_call("Name the drugs"))
            .with_completion("draft")
            .with_completion("SELECT name FROM Drug ORDER BY name;")
            .with_completion("abiraterone, etoposide"),
    );
    let mut wf = BlockingWorkflow::new(mock, db(), config()).unwrap();
    assert_eq!(wf.model_name(), "mock");
    assert_eq!(wf.table_names().unwrap(), vec!["Drug"]);

    wf.submit("Name the drugs").unwrap();
    let query = wf.session().pending().unwrap().query.clone();
    let outcome = wf.confirm(&query).unwrap();
    assert_eq!(
        outcome,
        Outcome::Answered {
            answer: "abiraterone, etoposide".into()
        }
    );
}
