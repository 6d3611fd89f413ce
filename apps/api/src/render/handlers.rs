//! Axum route handlers for document downloads.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::DocumentFormat;
use crate::session::handlers::parse_kind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub text: String,
    /// Download name without extension. Defaults to "Document".
    pub file_name: Option<String>,
}

/// Builds the attachment response for `bytes`.
fn attachment(format: DocumentFormat, stem: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}.{}\"", stem, format.extension());
    (
        [
            (header::CONTENT_TYPE, format.mime().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Keeps download names header-safe.
fn safe_stem(raw: &str) -> String {
    let stem: String = raw
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "Document".to_string()
    } else {
        stem
    }
}

/// GET /api/v1/sessions/:id/artifacts/:kind/{docx,pdf}
///
/// Renders the current text of the slot, so a user edit is exported verbatim.
pub async fn handle_download_artifact(
    State(state): State<AppState>,
    Path((id, kind, format)): Path<(Uuid, String, DocumentFormat)>,
) -> Result<Response, AppError> {
    let kind = parse_kind(&kind)?;
    let text = state
        .sessions
        .with_session(id, |s| s.artifact_text(kind).map(str::to_string))
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No {} has been generated in this session yet", kind))
        })?;

    let bytes = format.render(text, kind.file_stem().to_string()).await?;
    Ok(attachment(format, kind.file_stem(), bytes))
}

/// POST /api/v1/documents/{docx,pdf}
///
/// Stateless conversion of arbitrary text.
pub async fn handle_render_text(
    Path(format): Path<DocumentFormat>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let stem = safe_stem(request.file_name.as_deref().unwrap_or("Document"));
    let bytes = format.render(request.text, stem.clone()).await?;
    Ok(attachment(format, &stem, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_stem_replaces_header_breaking_characters() {
        assert_eq!(safe_stem("My \"CV\"\r\n"), "My__CV_");
        assert_eq!(safe_stem("Jane_Doe-2024"), "Jane_Doe-2024");
        assert_eq!(safe_stem("   "), "Document");
    }

    #[test]
    fn test_attachment_headers() {
        let response = attachment(DocumentFormat::Pdf, "Cover_Letter", b"%PDF".to_vec());
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Cover_Letter.pdf\""
        );
    }
}
