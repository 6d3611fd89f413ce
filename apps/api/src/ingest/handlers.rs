//! Axum route handlers for resume upload and job-description fetch.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::extract::{extract_text_blocking, DocumentKind};
use crate::ingest::fetch::fetch_job_description;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub file_name: String,
    pub kind: DocumentKind,
    pub chars: usize,
    pub resume_text: String,
}

#[derive(Debug, Deserialize)]
pub struct FetchJobRequest {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct FetchJobResponse {
    pub url: String,
    pub job_description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/resume/upload
///
/// Multipart body with one file part (PDF or DOCX). The extracted text becomes
/// the session's resume, replacing any earlier upload or paste.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    // Fail fast on a dead session before decoding anything.
    state.sessions.snapshot(id).await?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;

    let file_name = field.file_name().unwrap_or("unnamed").to_string();
    let content_type = field.content_type().map(str::to_string);
    let kind = DocumentKind::detect(Some(&file_name), content_type.as_deref())?;

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;

    let text = extract_text_blocking(bytes, kind).await?;
    if text.trim().is_empty() {
        return Err(AppError::Validation(format!(
            "No text could be extracted from '{file_name}'. Please paste your resume instead."
        )));
    }

    info!("Extracted '{}' ({:?}): {} chars", file_name, kind, text.chars().count());

    let stored = text.clone();
    state
        .sessions
        .with_session(id, |s| s.resume_text = stored)
        .await?;

    Ok(Json(ResumeUploadResponse {
        file_name,
        kind,
        chars: text.chars().count(),
        resume_text: text,
    }))
}

/// POST /api/v1/sessions/:id/job/fetch
///
/// Reads the posting through the reader proxy. On success the text becomes the
/// session's job description; on failure the previous one is left untouched.
pub async fn handle_fetch_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FetchJobRequest>,
) -> Result<Json<FetchJobResponse>, AppError> {
    if request.url.trim().is_empty() {
        return Err(AppError::Validation("Please provide a job posting URL.".to_string()));
    }
    state.sessions.snapshot(id).await?;

    let job_description = fetch_job_description(state.reader.as_ref(), request.url.trim()).await?;

    let stored = job_description.clone();
    state
        .sessions
        .with_session(id, |s| s.job_description = stored)
        .await?;

    Ok(Json(FetchJobResponse {
        url: request.url,
        job_description,
    }))
}
