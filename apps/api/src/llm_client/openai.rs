use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{error_message_from_body, Credential, Provider, ProviderError, TextGenerator};

pub const MODEL: &str = "gpt-4o-mini";

pub struct OpenAiProvider {
    client: Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAiProvider {
    async fn generate(
        &self,
        prompt: &str,
        credential: &Credential,
    ) -> Result<String, ProviderError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("OpenAI request to {}", url);

        let http_err = |source: reqwest::Error| ProviderError::Http {
            provider: Provider::OpenAi,
            source,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(http_err)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: Provider::OpenAi,
                status: status.as_u16(),
                message: error_message_from_body(&body),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(http_err)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(ProviderError::EmptyResponse(Provider::OpenAi))
    }
}
