use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

fn default_backend_name() -> String {
    "Lightning Insights API".to_string()
}

fn default_llm_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_name: String,
    pub llm_api_key: Option<String>,
    pub llm_model: String,
    pub llm_base_url: Option<String>,
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_name: default_backend_name(),
            llm_api_key: None,
            llm_model: default_llm_model(),
            llm_base_url: None,
            bind_addr: default_bind_addr(),
            max_file_size: default_max_file_size(),
            cors_origins: default_cors_origins(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset or blank keys
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => raw
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid BIND_ADDR: {}", raw))?,
            None => default_bind_addr(),
        };

        let max_file_size = match get("MAX_FILE_SIZE") {
            Some(raw) => raw
                .parse::<usize>()
                .with_context(|| format!("Invalid MAX_FILE_SIZE: {}", raw))?,
            None => default_max_file_size(),
        };

        let cors_origins = get("CORS_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(default_cors_origins);

        Ok(Config {
            backend_name: get("BACKEND_NAME").unwrap_or_else(default_backend_name),
            llm_api_key: get("LLM_API_KEY"),
            llm_model: get("LLM_MODEL").unwrap_or_else(default_llm_model),
            llm_base_url: get("LLM_BASE_URL"),
            bind_addr,
            max_file_size,
            cors_origins,
        })
    }
}

pub fn load_config() -> Result<Config> {
    Config::new()
}
