//! Process configuration
//!
//! Secrets and tunables come from the environment. A `.env` file in the
//! working directory is honoured for local development.

use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HISTORY_WINDOW: usize = 40;
const DEFAULT_CURRENCY: &str = "₹";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// Runtime configuration for the concierge service
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Overrides the public generation API host (proxies, tests)
    pub gemini_base_url: Option<String>,
    /// SQLite path of the knowledge store, or `:memory:`
    pub knowledge_db_path: String,
    pub knowledge_seed_path: Option<PathBuf>,
    pub port: u16,
    /// Maximum turns submitted per request; 0 submits the whole transcript
    pub history_window: usize,
    pub currency: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(e) = env_file_problem(dotenvy::dotenv()) {
            tracing::warn!(error = %e, "Ignoring unreadable .env file");
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let gemini_api_key =
            non_empty("GEMINI_API_KEY").ok_or(ConfigError::MissingVar("GEMINI_API_KEY"))?;

        let knowledge_db_path = non_empty("KNOWLEDGE_DB_PATH").unwrap_or_else(|| {
            let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
            format!("{home}/.resort-concierge/knowledge.db")
        });

        let port = match non_empty("CONCIERGE_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "CONCIERGE_PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let history_window = match non_empty("CONCIERGE_HISTORY_WINDOW") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: "CONCIERGE_HISTORY_WINDOW",
                value: raw,
            })?,
            None => DEFAULT_HISTORY_WINDOW,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url: non_empty("GEMINI_BASE_URL"),
            knowledge_db_path,
            knowledge_seed_path: non_empty("KNOWLEDGE_SEED_PATH").map(PathBuf::from),
            port,
            history_window,
            currency: non_empty("CONCIERGE_CURRENCY")
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        })
    }
}

/// A `.env` load failure worth reporting; a missing file is the normal case
/// in production
fn env_file_problem(result: dotenvy::Result<PathBuf>) -> Option<dotenvy::Error> {
    match result {
        Err(e) if !e.not_found() => Some(e),
        _ => None,
    }
}
