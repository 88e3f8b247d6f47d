// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("endpoint not found")]
    NotFound,

    #[error("configuration error: {0}")]
    Config(String),

    /// The workflow API answered, but with an error or an unusable body.
    #[error("workflow error: {0}")]
    Workflow(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            AppError::BadRequest(msg) => ErrorBody::new(msg.clone()),
            AppError::NotFound => ErrorBody::new(self.to_string()),
            other => {
                tracing::error!(error = %other, "request failed");
                ErrorBody::failed(format!("server error: {}", other))
            }
        };
        (status, Json(body)).into_response()
    }
}
