//! DrugDb against a small in-memory drug schema.

use drugbot_db::{DbError, DrugDb, QueryEngine};

const SCHEMA: &str = "
CREATE TABLE Drug (drug_cui VARCHAR PRIMARY KEY, name VARCHAR);
CREATE TABLE MOA (moa_id VARCHAR PRIMARY KEY, name VARCHAR);
CREATE TABLE DrugMOA (drug_cui VARCHAR, moa_id VARCHAR);
CREATE TABLE Trials (PostingID VARCHAR, Sponsor VARCHAR, Phase VARCHAR, StudyTitle VARCHAR, drug_cui VARCHAR[]);
INSERT INTO Drug VALUES ('C0000001', 'abiraterone'), ('C0000002', 'etoposide'), ('C0000003', 'Nicotinamide');
INSERT INTO MOA VALUES ('M1', 'Steroid Synthesis Inhibitors'), ('M2', 'Topoisomerase Inhibitors');
INSERT INTO DrugMOA VALUES ('C0000001', 'M1'), ('C0000002', 'M2');
INSERT INTO Trials VALUES
    ('T1', 'Acme', 'Phase 2', 'A double blind study of etoposide', ['C0000002']),
    ('T2', 'Acme', NULL, 'Open label abiraterone trial', ['C0000001', 'C0000002']);
CREATE VIEW DrugNames AS SELECT name FROM Drug;
";

fn seeded() -> DrugDb {
    let db = DrugDb::open_in_memory().unwrap();
    db.execute_batch(SCHEMA).unwrap();
    db
}

#[test]
fn count_query_returns_one_row() {
    let db = seeded();
    let out = db
        .run(r#"SELECT COUNT("drug_cui") AS "drug_count" FROM "Drug""#)
        .unwrap();
    assert_eq!(out.columns, vec!["drug_count"]);
    assert_eq!(out.rows, vec![vec!["3".to_string()]]);
}

#[test]
fn join_with_case_insensitive_match() {
    let db = seeded();
    let out = db
        .run(
            "SELECT MOA.name
             FROM DrugMOA, Drug, MOA
             WHERE DrugMOA.drug_cui = Drug.drug_cui
             AND DrugMOA.moa_id = MOA.moa_id
             AND LOWER(Drug.name) = LOWER('Abiraterone');",
        )
        .unwrap();
    assert_eq!(out.render(), "name\nSteroid Synthesis Inhibitors");
}

#[test]
fn nulls_and_lists_render_as_text() {
    let db = seeded();
    let out = db
        .run("SELECT Phase, drug_cui FROM Trials WHERE PostingID = 'T2'")
        .unwrap();
    assert_eq!(out.rows[0][0], "NULL");
    assert_eq!(out.rows[0][1], "[C0000001, C0000002]");
}

#[test]
fn empty_result_keeps_columns() {
    let db = seeded();
    let out = db.run("SELECT name FROM Drug WHERE name = 'nope'").unwrap();
    assert!(out.is_empty());
    assert_eq!(out.columns, vec!["name"]);
}

#[test]
fn bad_sql_is_a_query_error() {
    let db = seeded();
    let err = db.run("SELEC name FROM Drug").unwrap_err();
    assert!(matches!(err, DbError::Query(_)), "got {err:?}");
}

#[test]
fn init_failure_names_the_command() {
    let db = seeded();
    let err = db
        .initialize(&["SELECT 1;", "CREATE TABLE Drug (x INT);\n-- duplicate"])
        .unwrap_err();
    match err {
        DbError::Init { command, .. } => assert_eq!(command, "CREATE TABLE Drug (x INT);"),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn table_names_include_views() {
    let db = seeded();
    let names = db.usable_table_names().unwrap();
    assert_eq!(names, vec!["Drug", "DrugMOA", "DrugNames", "MOA", "Trials"]);
}

#[test]
fn opens_database_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("drugs.duckdb");
    {
        let db = DrugDb::open_path(&path).unwrap();
        db.execute_batch("CREATE TABLE Drug (drug_cui VARCHAR, name VARCHAR); INSERT INTO Drug VALUES ('C1', 'aspirin');")
            .unwrap();
    }
    assert!(path.exists());
    let reopened = DrugDb::open_path(&path).unwrap();
    let out = reopened.run("SELECT name FROM Drug").unwrap();
    assert_eq!(out.rows, vec![vec!["aspirin".to_string()]]);
}

#[test]
fn executes_sql_file() {
    let tmp = tempfile::tempdir().unwrap();
    let script = tmp.path().join("setup.sql");
    std::fs::write(&script, "CREATE TABLE Disorder (disorder_cui VARCHAR, name VARCHAR);").unwrap();
    let db = DrugDb::open_in_memory().unwrap();
    db.execute_file(&script).unwrap();
    assert_eq!(db.usable_table_names().unwrap(), vec!["Disorder"]);
}

#[tokio::test]
async fn query_engine_runs_off_thread() {
    let db = seeded();
    let out = db.execute("SELECT name FROM Drug ORDER BY name").await.unwrap();
    assert_eq!(out.row_count(), 3);
    assert_eq!(out.rows[0][0], "Nicotinamide");
    assert_eq!(db.table_names().await.unwrap().len(), 5);
}
