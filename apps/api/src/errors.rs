use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::webhooks::events::EventError;
use crate::webhooks::signature::SignatureError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Webhook rejections answer in plain text, which is what the sender logs in
/// its delivery dashboard. Everything else uses the JSON error envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing svix headers")]
    MissingWebhookHeaders,

    #[error("Webhook verification failed: {0}")]
    WebhookVerification(#[from] SignatureError),

    #[error("Webhook payload rejected: {0}")]
    WebhookPayload(#[from] EventError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingWebhookHeaders => {
                tracing::warn!("Webhook rejected: missing svix headers");
                return (StatusCode::BAD_REQUEST, "Error occured -- no svix headers").into_response();
            }
            AppError::WebhookVerification(e) => {
                tracing::error!("Error verifying webhook: {e}");
                return (StatusCode::BAD_REQUEST, "Error occured").into_response();
            }
            AppError::WebhookPayload(e) => {
                tracing::error!("Error verifying webhook: {e}");
                return (StatusCode::BAD_REQUEST, "Error occured").into_response();
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
