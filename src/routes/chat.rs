use axum::{Json, body::Bytes, extract::State};
use tracing::info;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HealthResponse},
    services::{chatbot::generate_reply, coze::preview},
    state::SharedState,
};

pub async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.mode()))
}

// The body is parsed here rather than through `Json` so that malformed
// payloads surface as server errors, not extractor rejections.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let payload: ChatRequest = serde_json::from_slice(&body)?;
    let trimmed = payload.input.trim();

    if trimmed.is_empty() {
        return Err(AppError::BadRequest("input must not be empty".to_string()));
    }
    info!(input = %preview(trimmed), "chat request received");

    let reply = generate_reply(&state, trimmed).await?;

    Ok(Json(ChatResponse::success(reply)))
}
