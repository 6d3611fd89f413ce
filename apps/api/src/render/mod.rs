// Document Emitter: cleaned text to downloadable DOCX / PDF bytes.
// Encoding is CPU-bound and runs inside tokio::task::spawn_blocking.

pub mod docx;
pub mod handlers;
pub mod pdf;

use serde::Deserialize;
use thiserror::Error;

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Failed to build DOCX: {0}")]
    Docx(String),

    #[error("Failed to build PDF: {0}")]
    Pdf(String),

    #[error("Document rendering aborted: {0}")]
    Aborted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Docx,
    Pdf,
}

impl DocumentFormat {
    pub fn mime(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => DOCX_MIME,
            DocumentFormat::Pdf => PDF_MIME,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Docx => "docx",
            DocumentFormat::Pdf => "pdf",
        }
    }

    /// Encodes `text` off the async runtime.
    pub async fn render(self, text: String, title: String) -> Result<Vec<u8>, DocumentError> {
        tokio::task::spawn_blocking(move || match self {
            DocumentFormat::Docx => docx::to_docx(&text),
            DocumentFormat::Pdf => pdf::to_pdf(&text, &title),
        })
        .await
        .map_err(|e| DocumentError::Aborted(e.to_string()))?
    }
}
