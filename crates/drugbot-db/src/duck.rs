use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use duckdb::types::Value;
use duckdb::Connection;
use tracing::{debug, info};

use crate::{DbConfig, DbError, QueryEngine, QueryOutput};

#[derive(Clone)]
pub struct DrugDb {
    conn: Arc<Mutex<Connection>>,
}

impl DrugDb {
    pub fn open(config: &DbConfig) -> Result<Self, DbError> {
        let path = config
            .path
            .clone()
            .unwrap_or_else(|| crate::data_dir().join("drugdb.duckdb"));
        std::fs::create_dir_all(path.parent().unwrap_or(Path::new(".")))?;
        Self::open_path(&path)
    }

    pub fn open_path(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path).map_err(|e| DbError::Internal(e.to_string()))?;
        info!("opened drug database at {}", path.display());
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory().map_err(|e| DbError::Internal(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Connection) -> Result<T, DbError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DbError::Internal("lock poisoned".into()))?;
        f(&conn)
    }

    /// Run setup commands in order, stopping at the first failure.
    pub fn initialize<S: AsRef<str>>(&self, commands: &[S]) -> Result<(), DbError> {
        self.with_conn(|conn| {
            for command in commands {
                let command = command.as_ref();
                conn.execute_batch(command).map_err(|e| DbError::Init {
                    command: first_line(command),
                    message: e.to_string(),
                })?;
                debug!("init: {}", first_line(command));
            }
            Ok(())
        })
    }

    /// Execute statements that return no rows (DDL, inserts, index builds).
    pub fn execute_batch(&self, sql: &str) -> Result<(), DbError> {
        self.with_conn(|conn| Ok(conn.execute_batch(sql)?))
    }

    /// Run one query and collect every row.
    pub fn run(&self, query: &str) -> Result<QueryOutput, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(query)?;
            let mut rows = stmt.query([])?;
            let columns = rows
                .as_ref()
                .map(|s| s.column_names())
                .ok_or_else(|| DbError::Internal("statement missing after execution".into()))?;

            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                let mut cells = Vec::with_capacity(columns.len());
                for i in 0..columns.len() {
                    let value: Value = row.get(i)?;
                    cells.push(render_value(&value));
                }
                out.push(cells);
            }
            debug!(rows = out.len(), "query finished");
            Ok(QueryOutput { columns, rows: out })
        })
    }

    /// Base tables and views visible to queries.
    pub fn usable_table_names(&self) -> Result<Vec<String>, DbError> {
        let output = self.run(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' ORDER BY table_name",
        )?;
        Ok(output.rows.into_iter().filter_map(|r| r.into_iter().next()).collect())
    }

    /// Run the statements in a `.sql` file, e.g. to build indexes on startup.
    pub fn execute_file(&self, path: &Path) -> Result<(), DbError> {
        let sql = std::fs::read_to_string(path)?;
        self.execute_batch(&sql)
    }
}

#[async_trait]
impl QueryEngine for DrugDb {
    async fn execute(&self, query: &str) -> Result<QueryOutput, DbError> {
        let db = self.clone();
        let query = query.to_string();
        tokio::task::spawn_blocking(move || db.run(&query))
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }

    async fn table_names(&self) -> Result<Vec<String>, DbError> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || db.usable_table_names())
            .await
            .map_err(|e| DbError::Internal(e.to_string()))?
    }
}

fn first_line(command: &str) -> String {
    command.lines().next().unwrap_or("").trim().to_string()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::TinyInt(n) => n.to_string(),
        Value::SmallInt(n) => n.to_string(),
        Value::Int(n) => n.to_string(),
        Value::BigInt(n) => n.to_string(),
        Value::HugeInt(n) => n.to_string(),
        Value::UTinyInt(n) => n.to_string(),
        Value::USmallInt(n) => n.to_string(),
        Value::UInt(n) => n.to_string(),
        Value::UBigInt(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Double(n) => n.to_string(),
        Value::Decimal(d) => d.to_string(),
        Value::Text(s) => s.clone(),
        Value::Enum(s) => s.clone(),
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", parts.join(", "))
        }
        other => format!("{other:?}"),
    }
}
