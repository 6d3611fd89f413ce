use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::artifact::{ArtifactKind, GeneratedArtifact};
use crate::models::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: String,
}

pub(crate) fn parse_kind(raw: &str) -> Result<ArtifactKind, AppError> {
    raw.parse::<ArtifactKind>().map_err(AppError::Validation)
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<Session>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Session>, AppError> {
    Ok(Json(state.sessions.snapshot(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found or expired")));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/resume
///
/// Pasted resume text. Replaces whatever an earlier upload produced.
pub async fn handle_put_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TextBody>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .with_session(id, |s| s.resume_text = body.text)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/job
pub async fn handle_put_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<TextBody>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .with_session(id, |s| s.job_description = body.text)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/artifacts/:kind
///
/// The user's edit replaces the slot; later downloads use the edited text verbatim.
pub async fn handle_edit_artifact(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    Json(body): Json<TextBody>,
) -> Result<Json<GeneratedArtifact>, AppError> {
    let kind = parse_kind(&kind)?;
    let artifact = GeneratedArtifact {
        kind,
        text: body.text,
        provider: None,
        updated_at: Utc::now(),
    };
    state.sessions.set_artifact(id, artifact.clone()).await?;
    Ok(Json(artifact))
}
