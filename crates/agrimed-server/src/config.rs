//! Server configuration
//!
//! Read once at start-up from the process environment (after an optional `.env`).

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// In-memory store when absent
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    /// Advisor is disabled when absent
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub ai_timeout: Duration,
    pub development: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };
        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw.parse().with_context(|| {
                format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {:?}", raw)
            })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        let ai_timeout_secs: u64 = match get("AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("AI_TIMEOUT_SECS must be whole seconds, got {:?}", raw))?,
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: get("DATABASE_URL"),
            database_max_connections,
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL"),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            development: get("APP_ENV")
                .map(|env| env.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }
}
