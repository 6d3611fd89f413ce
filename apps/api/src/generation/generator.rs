//! Artifact generation — orchestrates one user action end to end.
//!
//! Flow: build_prompt → LlmInvoker::invoke → sanitize → GeneratedArtifact.
//!
//! A provider failure is an error, never artifact text: nothing is stored and
//! nothing is offered for download when generation fails.

use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::generation::artifacts::{build_prompt, PromptInputs};
use crate::generation::sanitize::sanitize;
use crate::llm_client::{Credential, LlmInvoker, Provider, ProviderError};
use crate::models::artifact::{ArtifactKind, GeneratedArtifact};

/// Runs one template through the selected provider and returns the cleaned text.
pub async fn generate_artifact(
    llm: &LlmInvoker,
    provider_name: &str,
    credential: &Credential,
    kind: ArtifactKind,
    inputs: &PromptInputs,
) -> Result<GeneratedArtifact, AppError> {
    let prompt = build_prompt(kind, inputs)?;

    info!("Generating {} via {}", kind, provider_name);
    let raw = llm.invoke(&prompt, provider_name, credential).await?;

    // invoke has already resolved the name
    let provider = provider_name.parse::<Provider>()?;

    let text = sanitize(&raw);
    if text.is_empty() {
        return Err(ProviderError::EmptyResponse(provider).into());
    }

    Ok(GeneratedArtifact {
        kind,
        text,
        provider: Some(provider),
        updated_at: Utc::now(),
    })
}

/// The "Generate Resume & Cover Letter" action: resume first, then cover letter.
/// Calls run one after the other; if the resume fails, the cover letter is not attempted.
pub async fn generate_documents(
    llm: &LlmInvoker,
    provider_name: &str,
    credential: &Credential,
    inputs: &PromptInputs,
) -> Result<Vec<GeneratedArtifact>, AppError> {
    let mut documents = Vec::with_capacity(2);
    for kind in [ArtifactKind::Resume, ArtifactKind::CoverLetter] {
        documents.push(generate_artifact(llm, provider_name, credential, kind, inputs).await?);
    }
    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    use crate::llm_client::testing::{invoker_replying, StubGenerator};
    use crate::ingest::extract::docx_paragraphs;
    use crate::render::docx::to_docx;

    fn john_doe() -> PromptInputs {
        PromptInputs {
            resume_text: "John Doe\nEngineer".to_string(),
            job_description: "Seeking Engineer".to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_stub_provider_output_is_sanitized_and_exportable() {
        let stub = StubGenerator::replying("**Optimized** Summary\n-- done");
        let llm = LlmInvoker::with_generators(stub.clone(), stub.clone());

        let artifact = generate_artifact(
            &llm,
            "Gemini",
            &Credential::new("key"),
            ArtifactKind::Resume,
            &john_doe(),
        )
        .await
        .unwrap();

        assert_eq!(artifact.text, "Optimized Summary\n done");
        assert_eq!(artifact.provider, Some(Provider::Gemini));

        let prompts = stub.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("John Doe\nEngineer"));
        assert!(prompts[0].contains("Seeking Engineer"));
        drop(prompts);

        let bytes = to_docx(&artifact.text).unwrap();
        assert_eq!(
            docx_paragraphs(&bytes).unwrap(),
            vec!["Optimized Summary".to_string(), "done".to_string()]
        );
    }

    #[tokio::test]
    async fn test_provider_error_is_not_turned_into_text() {
        let stub = StubGenerator::failing(401, "API key not valid");
        let llm = LlmInvoker::with_generators(stub.clone(), stub);

        let err = generate_artifact(
            &llm,
            "Gemini",
            &Credential::new("bad"),
            ArtifactKind::Resume,
            &john_doe(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Provider(_)));
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn test_markup_only_reply_is_rejected() {
        let llm = invoker_replying("** -- **");
        let err = generate_artifact(
            &llm,
            "OpenAI",
            &Credential::new("key"),
            ArtifactKind::CareerInsights,
            &john_doe(),
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Provider(ProviderError::EmptyResponse(Provider::OpenAi))
        ));
        assert_eq!(
            err.into_response().status(),
            axum::http::StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn test_generate_documents_produces_resume_then_cover_letter() {
        let stub = StubGenerator::replying("Plain text");
        let llm = LlmInvoker::with_generators(stub.clone(), stub.clone());

        let docs = generate_documents(&llm, "Gemini", &Credential::new("k"), &john_doe())
            .await
            .unwrap();

        let kinds: Vec<_> = docs.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![ArtifactKind::Resume, ArtifactKind::CoverLetter]);
        let prompts = stub.prompts.lock().unwrap();
        assert!(prompts[0].contains("expert professional resume writer"));
        assert!(prompts[1].contains("persuasive cover letter"));
    }

    #[tokio::test]
    async fn test_validation_happens_before_provider_call() {
        let stub = StubGenerator::replying("unused");
        let llm = LlmInvoker::with_generators(stub.clone(), stub.clone());

        let err = generate_artifact(
            &llm,
            "Gemini",
            &Credential::new("k"),
            ArtifactKind::AtsAnalysis,
            &PromptInputs::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(stub.prompts.lock().unwrap().is_empty());
    }
}
