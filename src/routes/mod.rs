// src/routes/mod.rs
pub mod chat;

use crate::{error::AppError, state::SharedState};
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use chat::{chat_handler, health_handler};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    // Answers every OPTIONS request itself, before routing.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health_handler).head(not_found).fallback(not_found))
        .route("/api/coze/chat", post(chat_handler).fallback(not_found))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> AppError {
    AppError::NotFound
}
