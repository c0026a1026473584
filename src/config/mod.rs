//! Configuration module for the Promptify backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Default bounded timeout for a single analysis call, in seconds.
const DEFAULT_ANALYZE_TIMEOUT_SECS: u64 = 60;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// API key for the analysis service (required for /api/analyze)
    pub openai_api_key: Option<String>,
    /// Base URL of the analysis service
    pub openai_base_url: String,
    /// Model requested from the analysis service
    pub model: String,
    /// Timeout applied to a single analysis call, in seconds
    pub analyze_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("PROMPTIFY_DB_PATH")
            .unwrap_or_else(|_| "./data/promptify.sqlite".to_string())
            .into();

        let bind_addr = env::var("PROMPTIFY_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid PROMPTIFY_BIND_ADDR format");

        let log_level = env::var("PROMPTIFY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let openai_api_key = env::var("OPENAI_API_KEY").ok();

        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let model = env::var("PROMPTIFY_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let analyze_timeout_secs = env::var("PROMPTIFY_ANALYZE_TIMEOUT_SECS")
            .map(|v| {
                v.parse()
                    .expect("Invalid PROMPTIFY_ANALYZE_TIMEOUT_SECS format")
            })
            .unwrap_or(DEFAULT_ANALYZE_TIMEOUT_SECS);

        Self {
            db_path,
            bind_addr,
            log_level,
            openai_api_key,
            openai_base_url,
            model,
            analyze_timeout_secs,
        }
    }
}
