use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_COMPLETION_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_REFERER: &str = "http://localhost:3000";
pub const API_KEY_VAR: &str = "OPENROUTER_API_KEY";

/// Deployment environment. Selects bind address, `.env` loading and diagnostics defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn bind_host(&self) -> &'static str {
        match self {
            Environment::Development => "127.0.0.1",
            Environment::Production => "0.0.0.0",
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// The completion credential is not stored here: it is read per request
/// through a [`CredentialProvider`] so it can be injected after startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub port: u16,
    pub rust_log: String,
    pub completion_url: String,
    /// Sent as `HTTP-Referer` on every completion call.
    pub referer_url: String,
    pub static_dir: PathBuf,
    pub expose_env_diagnostics: bool,
    pub max_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let environment = Environment::from_env();
        if environment == Environment::Development {
            dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        }

        let expose_env_diagnostics = match std::env::var("ENABLE_ENV_DIAGNOSTICS") {
            Ok(raw) => raw
                .parse::<bool>()
                .context("ENABLE_ENV_DIAGNOSTICS must be 'true' or 'false'")?,
            Err(_) => environment == Environment::Development,
        };

        Ok(Config {
            environment,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            completion_url: std::env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_URL.to_string()),
            referer_url: resolve_referer(
                std::env::var("VERCEL_URL").ok(),
                std::env::var("FRONTEND_URL").ok(),
            ),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "client/build".to_string())
                .into(),
            expose_env_diagnostics,
            max_retries: std::env::var("LLM_MAX_RETRIES")
                .unwrap_or_else(|_| "0".to_string())
                .parse::<u32>()
                .context("LLM_MAX_RETRIES must be a non-negative integer")?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.environment.bind_host(), self.port)
    }
}

fn resolve_referer(vercel_url: Option<String>, frontend_url: Option<String>) -> String {
    match (vercel_url, frontend_url) {
        (Some(host), _) if !host.is_empty() => format!("https://{host}"),
        (_, Some(url)) if !url.is_empty() => url,
        _ => DEFAULT_REFERER.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Credential lookup
// ────────────────────────────────────────────────────────────────────────────

/// Source of the completion API credential. Queried on every request, never cached.
pub trait CredentialProvider: Send + Sync {
    /// Returns the trimmed credential, or `None` when absent or blank.
    fn api_key(&self) -> Option<String>;
}

/// Reads one environment variable (`OPENROUTER_API_KEY` by default) on each call.
pub struct EnvCredentialProvider {
    var: &'static str,
}

impl EnvCredentialProvider {
    pub fn from_var(var: &'static str) -> Self {
        Self { var }
    }
}

impl Default for EnvCredentialProvider {
    fn default() -> Self {
        Self::from_var(API_KEY_VAR)
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn api_key(&self) -> Option<String> {
        normalize_key(std::env::var(self.var).ok())
    }
}

/// Fixed credential for tests.
#[cfg(test)]
pub struct StaticCredentials(pub Option<String>);

#[cfg(test)]
impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        normalize_key(self.0.clone())
    }
}

fn normalize_key(raw: Option<String>) -> Option<String> {
    raw.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

/// Human-readable credential status for startup logs. Never includes the key.
pub fn credential_status(provider: &dyn CredentialProvider) -> String {
    match provider.api_key() {
        Some(key) => format!("Found ({} chars)", key.len()),
        None => "Missing".to_string(),
    }
}
