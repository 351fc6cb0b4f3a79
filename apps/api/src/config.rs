use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed numeric values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub ollama_host: String,
    pub ollama_model: String,
    pub llm_timeout: Duration,
    pub candidates_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ollama_host: env_or("OLLAMA_HOST", "http://localhost:11434"),
            ollama_model: env_or("OLLAMA_MODEL", "llama3.2"),
            llm_timeout: Duration::from_secs(
                env_or("LLM_TIMEOUT_SECS", "60")
                    .parse::<u64>()
                    .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            candidates_path: PathBuf::from(env_or("CANDIDATES_PATH", "data/candidates.jsonl")),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
