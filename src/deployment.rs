use config::{Config, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::errors::VisionResult;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: i32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant that can understand and discuss images.";

/// Model parameters for the completion endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: i32,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl LlmConfig {
    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: None,
            max_tokens: default_max_tokens(),
            temperature: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemPrompt {
    #[serde(default = "default_role")]
    pub role: String,
    /// Carried along with the deployment, not sent to the model
    #[serde(default)]
    pub persona: Option<Value>,
}

impl Default for SystemPrompt {
    fn default() -> Self {
        Self {
            role: default_role(),
            persona: None,
        }
    }
}

/// Resolved deployment of the agent. Loaded once, read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentDeployment {
    #[serde(default)]
    pub llm_config: LlmConfig,
    #[serde(default)]
    pub system_prompt: SystemPrompt,
}

impl AgentDeployment {
    /// Load a deployment from defaults, an optional file and `VISION_AGENT_*` environment variables.
    ///
    /// The file format follows its extension (json, toml, yaml). Environment
    /// keys use `__` between levels, e.g. `VISION_AGENT_LLM_CONFIG__MODEL`.
    pub fn load(path: Option<&Path>) -> VisionResult<Self> {
        let mut builder = Config::builder()
            .set_default("llm_config.model", default_model())?
            .set_default("llm_config.max_tokens", i64::from(default_max_tokens()))?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(
                Environment::with_prefix("VISION_AGENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let deployment: Self = config.try_deserialize().map_err(|err| {
            tracing::debug!("Deployment configuration error: {:?}", &err);
            err
        })?;
        Ok(deployment)
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> i32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_role() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}
