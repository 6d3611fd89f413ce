/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call a provider API directly.
/// All LLM interactions MUST go through `LlmInvoker`.
///
/// Model identifiers are hardcoded per provider (see `gemini::MODEL`, `openai::MODEL`).
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

pub mod gemini;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Invalid Model Provider")]
    UnknownProvider(String),

    #[error("An API key is required to call {0}")]
    MissingCredential(Provider),

    #[error("Error calling {provider} API: {source}")]
    Http {
        provider: Provider,
        #[source]
        source: reqwest::Error,
    },

    #[error("Error calling {provider} API: {message} (status {status})")]
    Api {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("Error calling {0} API: response contained no text")]
    EmptyResponse(Provider),
}

impl ProviderError {
    /// True when the caller sent something unusable, as opposed to the provider failing.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ProviderError::UnknownProvider(_) | ProviderError::MissingCredential(_)
        )
    }
}

/// The text-generation backends a caller may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provider {
    Gemini,
    OpenAi,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => write!(f, "Gemini"),
            Provider::OpenAi => write!(f, "OpenAI"),
        }
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    /// Accepts the selector labels a form would send ("Google Gemini", "OpenAI")
    /// as well as the serde names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google gemini" | "google" => Ok(Provider::Gemini),
            "openai" | "open_ai" | "open ai" => Ok(Provider::OpenAi),
            _ => Err(ProviderError::UnknownProvider(s.to_string())),
        }
    }
}

/// An opaque provider API key, scoped to a single request.
/// Debug output is redacted so the key cannot leak through logs.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    #[cfg(test)]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// One text-generation backend. Implementations must not retain the credential.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, credential: &Credential)
        -> Result<String, ProviderError>;
}

/// Dispatches a prompt to the selected provider.
#[derive(Clone)]
pub struct LlmInvoker {
    gemini: Arc<dyn TextGenerator>,
    openai: Arc<dyn TextGenerator>,
}

impl LlmInvoker {
    /// Builds the production invoker. Both providers share one HTTP connection pool.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self::with_generators(
            Arc::new(GeminiProvider::new(
                client.clone(),
                config.gemini_base_url.clone(),
            )),
            Arc::new(OpenAiProvider::new(client, config.openai_base_url.clone())),
        ))
    }

    pub fn with_generators(
        gemini: Arc<dyn TextGenerator>,
        openai: Arc<dyn TextGenerator>,
    ) -> Self {
        Self { gemini, openai }
    }

    fn generator(&self, provider: Provider) -> &dyn TextGenerator {
        match provider {
            Provider::Gemini => self.gemini.as_ref(),
            Provider::OpenAi => self.openai.as_ref(),
        }
    }

    /// Resolves `provider_name` and submits `prompt` as a single-turn request.
    pub async fn invoke(
        &self,
        prompt: &str,
        provider_name: &str,
        credential: &Credential,
    ) -> Result<String, ProviderError> {
        let provider = provider_name.parse::<Provider>()?;
        self.invoke_with(prompt, provider, credential).await
    }

    async fn invoke_with(
        &self,
        prompt: &str,
        provider: Provider,
        credential: &Credential,
    ) -> Result<String, ProviderError> {
        if credential.is_blank() {
            return Err(ProviderError::MissingCredential(provider));
        }

        info!(
            "Invoking {} (prompt length {} chars)",
            provider,
            prompt.chars().count()
        );

        let result = self.generator(provider).generate(prompt, credential).await;
        match &result {
            Ok(text) => info!("{} returned {} chars", provider, text.chars().count()),
            Err(e) => warn!("{e}"),
        }
        result
    }
}

/// Pulls a human-readable message out of a provider error body.
/// Both Gemini and OpenAI use `{"error": {"message": "..."}}`.
pub(crate) fn error_message_from_body(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorEnvelope {
        error: ErrorBody,
    }

    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}


#[cfg(test)]
mod tests {
    use super::testing::StubGenerator;
    use super::*;

    #[tokio::test]
    async fn test_unknown_provider_is_invalid_model_provider() {
        let llm = testing::invoker_replying("unused");
        let err = llm
            .invoke("prompt", "UnknownProvider", &Credential::new("any-key"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid Model Provider");
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_dispatches_to_selected_provider() {
        let gemini = StubGenerator::replying("from gemini");
        let openai = StubGenerator::replying("from openai");
        let llm = LlmInvoker::with_generators(gemini.clone(), openai.clone());
        let key = Credential::new("k");

        assert_eq!(llm.invoke("p1", "Google Gemini", &key).await.unwrap(), "from gemini");
        assert_eq!(llm.invoke("p2", "OpenAI", &key).await.unwrap(), "from openai");
        assert_eq!(gemini.prompts.lock().unwrap().as_slice(), ["p1"]);
        assert_eq!(openai.prompts.lock().unwrap().as_slice(), ["p2"]);
    }

    #[tokio::test]
    async fn test_blank_credential_is_rejected_before_calling() {
        let stub = StubGenerator::replying("never");
        let llm = LlmInvoker::with_generators(stub.clone(), stub.clone());
        let err = llm
            .invoke_with("p", Provider::Gemini, &Credential::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential(Provider::Gemini)));
        assert!(stub.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_is_typed_not_text() {
        let stub = StubGenerator::failing(429, "Quota exceeded");
        let llm = LlmInvoker::with_generators(stub.clone(), stub);
        let err = llm
            .invoke_with("p", Provider::Gemini, &Credential::new("k"))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error calling Gemini API: Quota exceeded (status 429)"
        );
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_provider_parsing_is_case_insensitive() {
        assert_eq!("gemini".parse::<Provider>().unwrap(), Provider::Gemini);
        assert_eq!(" OPENAI ".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!("claude".parse::<Provider>().is_err());
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let key = Credential::new("sk-super-secret");
        assert_eq!(format!("{key:?}"), "Credential(***)");
        assert_eq!(key.expose(), "sk-super-secret");
    }

    #[test]
    fn test_error_message_from_json_body() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message_from_body(body), "API key not valid");
    }

    #[test]
    fn test_error_message_from_plain_body() {
        assert_eq!(error_message_from_body("  upstream timeout \n"), "upstream timeout");
    }
}
