//! Text Extractors — uploaded PDF / DOCX bytes to plain text.
//!
//! Decoding is CPU-bound and runs inside `tokio::task::spawn_blocking`.
//! A decoder panic surfaces as an `ExtractionError` through the join handle.

use std::path::Path;

use bytes::Bytes;
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type '{0}'. Please upload a PDF or DOCX file.")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),

    #[error("Text extraction aborted: {0}")]
    Aborted(String),
}

/// Declared format of an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the format from the file extension, falling back to the content type.
    pub fn detect(
        file_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<Self, ExtractionError> {
        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Ok(DocumentKind::Pdf),
            Some("docx") => return Ok(DocumentKind::Docx),
            _ => {}
        }

        match content_type {
            Some("application/pdf") => Ok(DocumentKind::Pdf),
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document") => {
                Ok(DocumentKind::Docx)
            }
            _ => Err(ExtractionError::UnsupportedFormat(
                file_name.or(content_type).unwrap_or("unknown").to_string(),
            )),
        }
    }
}

/// Extracts text off the async runtime.
pub async fn extract_text_blocking(
    bytes: Bytes,
    kind: DocumentKind,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(&bytes, kind))
        .await
        .map_err(|e| {
            warn!("Extraction task failed: {e}");
            ExtractionError::Aborted(format!("the {kind:?} decoder failed on this file"))
        })?
}

/// Extracts plain text from `bytes` interpreted as `kind`.
pub fn extract_text(bytes: &[u8], kind: DocumentKind) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
        DocumentKind::Docx => docx_paragraphs(bytes)?.join("\n"),
    };
    info!("Extracted {} chars from {:?} upload", text.chars().count(), kind);
    Ok(text)
}

/// Text of each top-level body paragraph, in document order.
pub fn docx_paragraphs(bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let paragraphs = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs)
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    for child in children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}
