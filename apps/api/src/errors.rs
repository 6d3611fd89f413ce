use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::extract::ExtractionError;
use crate::ingest::fetch::FetchError;
use crate::llm_client::ProviderError;
use crate::render::DocumentError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction error: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    e.to_string(),
                )
            }
            AppError::Fetch(e) => {
                tracing::warn!("Fetch error: {e}");
                let code = match e {
                    FetchError::InvalidUrl(_) => "INVALID_URL",
                    FetchError::Blocked => "FETCH_BLOCKED",
                    FetchError::NotFound => "FETCH_NOT_FOUND",
                    FetchError::Unextractable => "FETCH_UNEXTRACTABLE",
                    FetchError::Generic(_) => "FETCH_ERROR",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, code, e.to_string())
            }
            AppError::Provider(e) if e.is_client_error() => {
                let code = match e {
                    ProviderError::UnknownProvider(name) => {
                        tracing::warn!("Unknown provider requested: {name}");
                        "INVALID_PROVIDER"
                    }
                    _ => "MISSING_CREDENTIAL",
                };
                (StatusCode::BAD_REQUEST, code, e.to_string())
            }
            AppError::Provider(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::BAD_GATEWAY, "LLM_ERROR", e.to_string())
            }
            AppError::Document(e) => {
                tracing::error!("Document error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DOCUMENT_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
