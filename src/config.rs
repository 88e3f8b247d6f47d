// src/config.rs
use std::fmt;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_BASE_URL: &str = "https://api.coze.cn";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Process configuration, read once at startup and never mutated.
#[derive(Clone)]
pub struct Config {
    pub api_token: Option<String>,
    pub workflow_id: Option<String>,
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub timeout: Duration,
    pub gateway_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &self.masked_token())
            .field("workflow_id", &self.workflow_id)
            .field("enabled", &self.enabled)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("gateway_url", &self.gateway_url)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: None,
            workflow_id: None,
            enabled: true,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let port = match get("COZE_API_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("COZE_API_PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_PORT,
        };

        let timeout = match get("COZE_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::Config(format!("COZE_TIMEOUT_SECS must be a positive integer: {}", raw))
                })?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_token: get("COZE_API_KEY"),
            workflow_id: get("COZE_WORKFLOW_ID").or_else(|| get("workflow_id")),
            enabled: get("COZE_ENABLED")
                .map(|v| v.to_lowercase() == "true")
                .unwrap_or(true),
            host: get("COZE_API_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            base_url: get("COZE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout,
            gateway_url: get("COZE_API_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string()),
        })
    }

    /// Token and workflow id, only when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.api_token.as_deref(), self.workflow_id.as_deref()) {
            (Some(token), Some(workflow)) if !token.is_empty() && !workflow.is_empty() => {
                Some((token, workflow))
            }
            _ => None,
        }
    }

    pub fn coze_enabled(&self) -> bool {
        self.enabled && self.credentials().is_some()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn masked_token(&self) -> &'static str {
        if self.api_token.is_some() { "***" } else { "unset" }
    }
}
