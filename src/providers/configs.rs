use std::env;
use std::time::Duration;

use crate::deployment::LlmConfig;
use crate::errors::{VisionError, VisionResult};

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Everything the OpenAI-compatible provider needs to make one call
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub api_key: String,
    pub api_base: String,
    pub model: String,
    pub max_tokens: i32,
    pub temperature: Option<f32>,
    pub timeout: Duration,
}

impl OpenAiProviderConfig {
    pub fn new<S: Into<String>>(llm_config: &LlmConfig, api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: llm_config.api_base().to_string(),
            model: llm_config.model.clone(),
            max_tokens: llm_config.max_tokens,
            temperature: llm_config.temperature,
            timeout: Duration::from_secs(llm_config.timeout_secs),
        }
    }

    /// Build the config with the credential taken from `OPENAI_API_KEY`
    pub fn from_env(llm_config: &LlmConfig) -> VisionResult<Self> {
        let api_key = get_env(OPENAI_API_KEY)?.ok_or(VisionError::MissingCredential)?;
        Ok(Self::new(llm_config, api_key))
    }
}

/// Read an environment variable, treating unset and blank values alike
fn get_env(key: &str) -> VisionResult<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(VisionError::Config(format!("{}: {}", key, e))),
    }
}
