// src/config.rs
use anyhow::{Context, Result};
use log::warn;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_REPORT_DIR: &str = "reports";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub yahoo_base_url: String,
    pub http_timeout: Duration,
    pub user_agent: String,
    pub report_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
        }
    }
}

impl AppConfig {
    /// Load from the process environment. Call `dotenv().ok()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT must be a number, got {:?}", raw))?,
            None => {
                warn!("$PORT not set, defaulting to {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("HTTP_TIMEOUT_SECS must be a whole number of seconds, got {:?}", raw))?,
            ),
            None => defaults.http_timeout,
        };

        let yahoo_base_url = lookup("YAHOO_BASE_URL").unwrap_or_else(|| {
            warn!("$YAHOO_BASE_URL not set, defaulting to {}", DEFAULT_YAHOO_BASE_URL);
            defaults.yahoo_base_url
        });

        Ok(AppConfig {
            port,
            yahoo_base_url,
            http_timeout,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
            report_dir: lookup("REPORT_DIR").map(PathBuf::from).unwrap_or(defaults.report_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 3030);
        assert_eq!(config.yahoo_base_url, DEFAULT_YAHOO_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.report_dir, PathBuf::from("reports"));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("REPORT_DIR", "/tmp/dcf"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.report_dir, PathBuf::from("/tmp/dcf"));
    }

    #[test]
    fn malformed_port_is_an_error() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
    }
}
