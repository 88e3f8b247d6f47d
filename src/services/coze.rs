// src/services/coze.rs
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::{Map, Value, json};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const RUN_PATH: &str = "/v1/workflow/run";

/// Normalized result of a workflow run: the upstream fields in the order
/// the API returned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkflowRun {
    pub fields: Map<String, Value>,
}

impl WorkflowRun {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Turn the Coze `{code, msg, data, ...}` envelope into a run.
    ///
    /// A non-zero `code` is an upstream failure. `code` and `msg` are dropped
    /// from the view, and a `data` string holding a JSON object is decoded in
    /// place so callers can look inside it.
    pub fn from_api_payload(payload: Value) -> Result<Self, AppError> {
        let obj = match payload {
            Value::Object(obj) => obj,
            other => {
                return Err(AppError::Workflow(format!(
                    "expected a JSON object, got {}",
                    other
                )));
            }
        };

        let code = match obj.get("code") {
            None | Some(Value::Null) => 0,
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
                AppError::Workflow(format!("unexpected code in response: {}", n))
            })?,
            Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
                AppError::Workflow(format!("unexpected code in response: {:?}", s))
            })?,
            Some(other) => {
                return Err(AppError::Workflow(format!(
                    "unexpected code in response: {}",
                    other
                )));
            }
        };
        if code != 0 {
            let msg = obj.get("msg").and_then(Value::as_str).unwrap_or("unknown error");
            return Err(AppError::Workflow(format!("code {}: {}", code, msg)));
        }

        let fields = obj
            .into_iter()
            .filter(|(key, _)| key != "code" && key != "msg")
            .map(|(key, value)| {
                let value = if key == "data" { decode_nested(value) } else { value };
                (key, value)
            })
            .collect();

        Ok(Self { fields })
    }
}

impl fmt::Display for WorkflowRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

fn decode_nested(value: Value) -> Value {
    match value {
        Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
            Ok(decoded @ Value::Object(_)) => decoded,
            _ => Value::String(raw),
        },
        other => other,
    }
}

/// Anything that can execute a workflow by id.
#[async_trait]
pub trait WorkflowClient: Send + Sync {
    async fn run_workflow(
        &self,
        workflow_id: &str,
        parameters: Map<String, Value>,
    ) -> Result<WorkflowRun, AppError>;
}

/// Client for the Coze open API.
#[derive(Clone)]
pub struct CozeClient {
    http: reqwest::Client,
    run_url: String,
}

impl fmt::Debug for CozeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CozeClient")
            .field("run_url", &self.run_url)
            .finish()
    }
}

impl CozeClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let token = config
            .api_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Config("COZE_API_KEY is not set".to_string()))?;

        let base = reqwest::Url::parse(&config.base_url)
            .map_err(|e| AppError::Config(format!("invalid base url {}: {}", config.base_url, e)))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(AppError::Config(format!(
                "base url must be http or https: {}",
                config.base_url
            )));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::Config("COZE_API_KEY is not a valid header value".to_string()))?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            run_url: format!("{}{}", config.base_url.trim_end_matches('/'), RUN_PATH),
        })
    }
}

#[async_trait]
impl WorkflowClient for CozeClient {
    async fn run_workflow(
        &self,
        workflow_id: &str,
        parameters: Map<String, Value>,
    ) -> Result<WorkflowRun, AppError> {
        info!(workflow_id, url = %self.run_url, "running Coze workflow");

        let response = self
            .http
            .post(&self.run_url)
            .json(&json!({
                "workflow_id": workflow_id,
                "parameters": parameters,
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, body = %preview(&body), "Coze workflow response");

        let payload: Value = serde_json::from_str(&body).map_err(|_| {
            AppError::Workflow(format!("unexpected response (HTTP {}): {}", status, preview(&body)))
        })?;
        let run = WorkflowRun::from_api_payload(payload)?;

        if !status.is_success() {
            return Err(AppError::Workflow(format!("HTTP {}", status)));
        }
        Ok(run)
    }
}

/// First 100 characters, for log lines.
pub fn preview(text: &str) -> String {
    text.chars().take(100).collect()
}
