use std::time::Duration;

pub const DEFAULT_GRAPH_URL: &str = "https://graph.microsoft.com/v1.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const GRAPH_URL_ENV: &str = "DRAFTS_MCP_GRAPH_URL";
const TIMEOUT_ENV: &str = "DRAFTS_MCP_TIMEOUT_SECS";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub graph_base_url: String,
    /// Deadline applied to one whole `list_draft_emails` invocation,
    /// pagination included.
    pub call_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let graph_base_url = match lookup(GRAPH_URL_ENV) {
            Some(value) => {
                let trimmed = value.trim();
                if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                    return Err(ConfigError::InvalidUrl { var: GRAPH_URL_ENV, value });
                }
                trimmed.trim_end_matches('/').to_string()
            }
            None => DEFAULT_GRAPH_URL.to_string(),
        };

        let call_timeout = match lookup(TIMEOUT_ENV) {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout { var: TIMEOUT_ENV, value }),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self { graph_base_url, call_timeout })
    }
}
