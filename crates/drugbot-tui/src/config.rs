use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use drugbot_db::DbConfig;
use drugbot_llm::OpenAiConfig;
use drugbot_service::GeneratorConfig;

#[derive(Debug, Parser)]
#[command(name = "drugbot", about = "Ask questions about the drug database")]
pub struct AppConfig {
    /// DuckDB database file
    #[arg(long, env = "DRUGBOT_DB_PATH")]
    pub db_path: Option<PathBuf>,

    /// API key for the chat and embedding endpoints
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "DRUGBOT_CHAT_MODEL", default_value = "gpt-4o-mini")]
    pub chat_model: String,

    #[arg(long, env = "DRUGBOT_EMBEDDING_MODEL", default_value = "text-embedding-3-small")]
    pub embedding_model: String,

    /// Width of the disorder definition embeddings stored in the database
    #[arg(long, env = "DRUGBOT_EMBEDDING_DIM", default_value = "1536")]
    pub embedding_dim: usize,

    /// Number of example queries shown to the model when drafting
    #[arg(long, default_value = "5")]
    pub few_shot_k: usize,

    /// Row limit when the question does not name one (0 = no limit)
    #[arg(long, env = "DRUGBOT_DEFAULT_LIMIT", default_value = "20")]
    pub default_limit: u32,

    /// Timeout for model requests (seconds)
    #[arg(long, default_value = "60")]
    pub request_timeout: u64,

    /// Do not load the DuckDB extensions or create the property graph on startup
    #[arg(long)]
    pub skip_init: bool,

    /// SQL script to run after opening the database
    #[arg(long)]
    pub init_sql: Option<PathBuf>,

    /// Log file (the terminal belongs to the UI)
    #[arg(long, env = "DRUGBOT_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn db(&self) -> DbConfig {
        DbConfig {
            path: self.db_path.clone(),
        }
    }

    pub fn openai(&self) -> OpenAiConfig {
        OpenAiConfig {
            base_url: self.openai_base_url.clone(),
            api_key: self.openai_api_key.clone(),
            chat_model: self.chat_model.clone(),
            embedding_model: self.embedding_model.clone(),
            timeout: Duration::from_secs(self.request_timeout),
        }
    }

    pub fn generator(&self) -> GeneratorConfig {
        GeneratorConfig {
            embedding_dim: self.embedding_dim,
            few_shot_k: self.few_shot_k,
            default_limit: self.default_limit,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| drugbot_db::data_dir().join("drugbot.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AppConfig::try_parse_from(["drugbot", "--openai-api-key", "sk-test"]).unwrap();
        assert_eq!(config.chat_model, "gpt-4o-mini");
        assert_eq!(config.embedding_model, "text-embedding-3-small");
        assert!(!config.skip_init);

        let generator = config.generator();
        assert_eq!(generator.embedding_dim, 1536);
        assert_eq!(generator.few_shot_k, 5);
        assert_eq!(generator.default_limit, 20);

        let openai = config.openai();
        assert_eq!(openai.api_key.as_deref(), Some("sk-test"));
        assert_eq!(openai.timeout, Duration::from_secs(60));
    }

    #[test]
    fn explicit_flags() {
        let config = AppConfig::try_parse_from([
            "drugbot",
            "--db-path",
            "/tmp/drugs.duckdb",
            "--default-limit",
            "0",
            "--skip-init",
            "--log-file",
            "/tmp/drugbot.log",
        ])
        .unwrap();
        assert_eq!(config.db().path, Some(PathBuf::from("/tmp/drugs.duckdb")));
        assert_eq!(config.generator().default_limit, 0);
        assert!(config.skip_init);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/drugbot.log"));
    }
}
