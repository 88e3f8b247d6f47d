// src/verify.rs
//! Configuration checks behind the `verify_coze` binary.
use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::error::AppError;
use crate::message::HealthResponse;
use crate::services::coze::CozeClient;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self { severity, message: message.into() }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.severity {
            Severity::Ok => "✅",
            Severity::Warning => "⚠️ ",
            Severity::Error => "❌",
        };
        write!(f, "{} {}", icon, self.message)
    }
}

#[derive(Debug, Default)]
pub struct Report {
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn is_complete(&self) -> bool {
        !self.findings.iter().any(|f| f.severity == Severity::Error)
    }
}

pub fn diagnose(config: &Config) -> Report {
    let mut findings = Vec::new();

    match config.api_token.as_deref() {
        None => findings.push(Finding::new(Severity::Error, "COZE_API_KEY is not set")),
        Some(token) if !token.starts_with("pat_") => findings.push(Finding::new(
            Severity::Warning,
            "COZE_API_KEY should start with 'pat_'",
        )),
        Some(_) => findings.push(Finding::new(Severity::Ok, "API key format looks right")),
    }

    match config.workflow_id.as_deref() {
        None => findings.push(Finding::new(Severity::Error, "COZE_WORKFLOW_ID is not set")),
        Some(id) => findings.push(Finding::new(Severity::Ok, format!("workflow id is set ({})", id))),
    }

    if !config.enabled {
        findings.push(Finding::new(
            Severity::Warning,
            "COZE_ENABLED is off, the gateway will run in demo mode",
        ));
    }

    Report { findings }
}

/// Build the Coze client the gateway would build at startup.
pub fn check_client(config: &Config) -> Result<(), AppError> {
    CozeClient::new(config).map(|_| ())
}

/// Ask a running gateway for its health payload.
pub async fn probe_gateway(gateway_url: &str) -> Result<HealthResponse, AppError> {
    let url = format!("{}/health", gateway_url.trim_end_matches('/'));
    let response = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()?
        .get(&url)
        .send()
        .await?
        .error_for_status()?;

    Ok(response.json::<HealthResponse>().await?)
}
