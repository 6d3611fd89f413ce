//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::artifacts::PromptInputs;
use crate::generation::generator::{generate_artifact, generate_documents};
use crate::llm_client::Credential;
use crate::models::artifact::{ArtifactKind, GeneratedArtifact};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub kind: ArtifactKind,
    pub provider: String,
    pub api_key: Credential,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDocumentsRequest {
    pub provider: String,
    pub api_key: Credential,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub question: String,
    pub answer: String,
    pub provider: String,
    pub api_key: Credential,
}

#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<GeneratedArtifact>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// Copies the session's inputs out so no lock is held across the provider call.
async fn session_inputs(state: &AppState, id: Uuid) -> Result<PromptInputs, AppError> {
    let session = state.sessions.snapshot(id).await?;
    Ok(PromptInputs {
        resume_text: session.resume_text,
        job_description: session.job_description,
        ..PromptInputs::default()
    })
}

/// POST /api/v1/sessions/:id/generate
///
/// Generates one artifact kind from the session's resume and job description and
/// overwrites that kind's slot.
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedArtifact>, AppError> {
    if request.kind == ArtifactKind::InterviewFeedback {
        return Err(AppError::Validation(
            "Interview feedback is requested through the feedback endpoint.".to_string(),
        ));
    }
    let inputs = session_inputs(&state, id).await?;

    let artifact = generate_artifact(
        &state.llm,
        &request.provider,
        &request.api_key,
        request.kind,
        &inputs,
    )
    .await?;

    state.sessions.set_artifact(id, artifact.clone()).await?;
    info!("Session {}: stored {} ({} chars)", id, artifact.kind, artifact.text.len());

    Ok(Json(artifact))
}

/// POST /api/v1/sessions/:id/generate/documents
///
/// Optimized resume followed by cover letter. Both slots are written only if both succeed.
pub async fn handle_generate_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<GenerateDocumentsRequest>,
) -> Result<Json<DocumentsResponse>, AppError> {
    let inputs = session_inputs(&state, id).await?;

    let documents =
        generate_documents(&state.llm, &request.provider, &request.api_key, &inputs).await?;

    for document in &documents {
        state.sessions.set_artifact(id, document.clone()).await?;
    }

    Ok(Json(DocumentsResponse { documents }))
}

/// POST /api/v1/sessions/:id/feedback
///
/// Feedback on one interview answer. Only the job description is needed from the session.
pub async fn handle_feedback(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<GeneratedArtifact>, AppError> {
    let inputs = PromptInputs {
        question: Some(request.question),
        answer: Some(request.answer),
        ..session_inputs(&state, id).await?
    };

    let artifact = generate_artifact(
        &state.llm,
        &request.provider,
        &request.api_key,
        ArtifactKind::InterviewFeedback,
        &inputs,
    )
    .await?;

    state.sessions.set_artifact(id, artifact.clone()).await?;
    Ok(Json(artifact))
}
