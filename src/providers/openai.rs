use reqwest::blocking::Client; // blocking API, every call is a single synchronous round trip
use serde::Serialize;
use serde_json::Value;

use super::{
    base::Provider,
    configs::OpenAiProviderConfig,
    types::message::Message,
    utils::{messages_to_openai_spec, openai_response_to_text, upstream_error_message},
};
use crate::errors::{VisionError, VisionResult};

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Value>,
    max_tokens: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

pub struct OpenAiProvider {
    client: Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> VisionResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(VisionError::MissingCredential);
        }

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { client, config })
    }

    fn url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Returns the HTTP status alongside the decoded body of a successful response
    fn post(&self, payload: &ChatCompletionRequest) -> VisionResult<(u16, Value)> {
        let url = self.url();
        tracing::debug!(%url, model = %payload.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(payload)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(VisionError::upstream(
                Some(status.as_u16()),
                upstream_error_message(&body),
            ));
        }

        let value = serde_json::from_str(&body).map_err(|e| {
            VisionError::upstream(
                Some(status.as_u16()),
                format!("Malformed response body: {}", e),
            )
        })?;
        Ok((status.as_u16(), value))
    }
}

impl Provider for OpenAiProvider {
    fn complete(&self, messages: &[Message]) -> VisionResult<String> {
        let payload = ChatCompletionRequest {
            model: &self.config.model,
            messages: messages_to_openai_spec(messages),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let (status, response) = self.post(&payload)?;
        openai_response_to_text(&response, Some(status))
    }
}
