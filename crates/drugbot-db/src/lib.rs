mod duck;
mod output;

use std::ffi::OsString;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use duck::DrugDb;
pub use output::QueryOutput;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("initialization command failed ({command}): {message}")]
    Init { command: String, message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<duckdb::Error> for DbError {
    fn from(e: duckdb::Error) -> Self {
        DbError::Query(e.to_string())
    }
}

/// Where the drug database lives.
#[derive(Debug, Clone, Default)]
pub struct DbConfig {
    /// Defaults to `drugdb.duckdb` in the data directory.
    pub path: Option<PathBuf>,
}

/// Executes confirmed queries.
///
/// `DrugDb` is the real implementation; the chat workflow only sees this trait.
#[async_trait]
pub trait QueryEngine: Send + Sync {
    async fn execute(&self, query: &str) -> Result<QueryOutput, DbError>;
    async fn table_names(&self) -> Result<Vec<String>, DbError>;
}

/// `$XDG_DATA_HOME/drugbot`, falling back to `~/.local/share/drugbot`.
pub fn data_dir() -> PathBuf {
    data_dir_from(std::env::var_os("XDG_DATA_HOME"), std::env::var_os("HOME"))
}

/// Empty variables count as unset.
fn data_dir_from(xdg_data_home: Option<OsString>, home: Option<OsString>) -> PathBuf {
    let xdg_data_home = xdg_data_home.filter(|v| !v.is_empty());
    let home = home.filter(|v| !v.is_empty());
    let base = if let Some(xdg) = xdg_data_home {
        PathBuf::from(xdg)
    } else if let Some(home) = home {
        PathBuf::from(home).join(".local/share")
    } else {
        PathBuf::from(".")
    };
    base.join("drugbot")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_prefers_xdg_data_home() {
        assert_eq!(
            data_dir_from(Some("/data".into()), Some("/home/me".into())),
            PathBuf::from("/data/drugbot")
        );
    }

    #[test]
    fn empty_xdg_data_home_falls_back_to_home() {
        assert_eq!(
            data_dir_from(Some(OsString::new()), Some("/home/me".into())),
            PathBuf::from("/home/me/.local/share/drugbot")
        );
        assert_eq!(
            data_dir_from(Some(OsString::new()), None),
            PathBuf::from("./drugbot")
        );
    }
}
