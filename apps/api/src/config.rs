use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::backoff_delay;

/// Application configuration loaded from environment variables.
/// Every key has a default; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub llm: LlmSettings,
    pub skills_path: PathBuf,
    pub jobs_path: PathBuf,
    /// How many of the most frequent job-posting skills form the market list.
    pub top_market_skills: usize,
    pub max_upload_bytes: usize,
}

/// Connection settings for the OpenAI-compatible completion endpoint.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub temperature: f32,
    pub timeout: Duration,
    /// 1 means a single attempt with no retry.
    pub max_attempts: u32,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434/v1".to_string(),
            model: "gemma:2b".to_string(),
            api_key: "ollama".to_string(),
            temperature: 0.3,
            timeout: Duration::from_secs(120),
            max_attempts: 1,
        }
    }
}

impl LlmSettings {
    /// Upper bound on one logical completion: every attempt running to its
    /// per-request timeout, plus the backoff pauses between attempts.
    pub fn call_budget(&self) -> Duration {
        let attempts = self.max_attempts.max(1);
        let backoff: Duration = (1..attempts).map(backoff_delay).sum();
        self.timeout * attempts + backoff
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = LlmSettings::default();
        let max_attempts: u32 = parse_env("LLM_MAX_ATTEMPTS", defaults.max_attempts)?;
        if max_attempts == 0 {
            anyhow::bail!("LLM_MAX_ATTEMPTS must be at least 1");
        }

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
            llm: LlmSettings {
                base_url: env_or("LLM_BASE_URL", &defaults.base_url),
                model: env_or("LLM_MODEL", &defaults.model),
                api_key: env_or("LLM_API_KEY", &defaults.api_key),
                temperature: parse_env("LLM_TEMPERATURE", defaults.temperature)?,
                timeout: Duration::from_secs(parse_env(
                    "LLM_TIMEOUT_SECS",
                    defaults.timeout.as_secs(),
                )?),
                max_attempts,
            },
            skills_path: PathBuf::from(env_or("SKILLS_PATH", "data/skills_list.json")),
            jobs_path: PathBuf::from(env_or("JOBS_PATH", "data/jobs_clean.json")),
            top_market_skills: parse_env("TOP_MARKET_SKILLS", 20)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
