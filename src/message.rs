// src/message.rs
use std::fmt;

use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "coze-workflow-api";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub status: String,
}

impl ChatResponse {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: "success".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into(), status: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: Some("failed".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Demo,
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Demo => "demo",
            Mode::Production => "production",
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub mode: Mode,
}

impl HealthResponse {
    pub fn ok(mode: Mode) -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            mode,
        }
    }
}
