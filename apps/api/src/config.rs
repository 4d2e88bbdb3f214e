use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 120;

/// Application configuration loaded from environment variables.
/// Fails at startup if the AI provider credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub stripe: StripeConfig,
    pub public_base_url: String,
    pub port: u16,
    pub debug: bool,
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
    pub provider_timeout: Duration,
    pub rust_log: String,
}

/// Payment settings. Every field is optional; checkout reports
/// "Payment not configured" when the pieces it needs are absent.
#[derive(Debug, Clone, Default)]
pub struct StripeConfig {
    pub secret_key: Option<String>,
    pub monthly_price_id: Option<String>,
    pub annual_price_id: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let port = match optional_env("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let provider_timeout_secs = match optional_env("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        let debug = optional_env("DEBUG").is_some_and(|v| parse_flag(&v));
        let default_level = if debug { "debug" } else { "info" };

        Ok(Config {
            google_api_key: require_env("GOOGLE_API_KEY")?,
            stripe: StripeConfig {
                secret_key: optional_env("STRIPE_SECRET_KEY"),
                monthly_price_id: optional_env("STRIPE_MONTHLY_PRICE_ID"),
                annual_price_id: optional_env("STRIPE_ANNUAL_PRICE_ID"),
            },
            public_base_url: optional_env("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            port,
            debug,
            upload_dir: optional_env("UPLOAD_DIR")
                .unwrap_or_else(|| "uploads".to_string())
                .into(),
            static_dir: optional_env("STATIC_DIR")
                .unwrap_or_else(|| "static".to_string())
                .into(),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| default_level.to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Blank values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_truthy_values() {
        for v in ["1", "true", "TRUE", "yes", "On"] {
            assert!(parse_flag(v), "{v} should be truthy");
        }
    }

    #[test]
    fn test_parse_flag_falsy_values() {
        for v in ["0", "false", "no", "off", "debug"] {
            assert!(!parse_flag(v), "{v} should be falsy");
        }
    }
}
