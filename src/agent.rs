use std::str::FromStr;

use crate::deployment::AgentDeployment;
use crate::errors::{VisionError, VisionResult};
use crate::inputs::{describe, Request, ToolInputData, VisionInput};
use crate::providers::base::Provider;
use crate::providers::configs::OpenAiProviderConfig;
use crate::providers::openai::OpenAiProvider;
use crate::providers::types::message::Message;

/// The completion endpoint rejects turns with more images than this
pub const MAX_IMAGES_PER_TURN: usize = 2;

/// Operations the agent can be asked to run by `tool_name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Vision,
}

impl FromStr for Operation {
    type Err = VisionError;

    fn from_str(name: &str) -> VisionResult<Self> {
        match name {
            "vision" => Ok(Operation::Vision),
            other => Err(VisionError::UnsupportedOperation(other.to_string())),
        }
    }
}

/// Build the canonical message list: the system turn, then one user turn with
/// the question followed by at most [`MAX_IMAGES_PER_TURN`] images.
pub fn build_messages(system_prompt: &str, input: &VisionInput) -> Vec<Message> {
    if input.images.len() > MAX_IMAGES_PER_TURN {
        tracing::debug!(
            dropped = input.images.len() - MAX_IMAGES_PER_TURN,
            "Dropping images beyond the per-turn limit"
        );
    }

    let user = input
        .images
        .iter()
        .take(MAX_IMAGES_PER_TURN)
        .fold(Message::user().with_text(&input.question), |message, url| {
            message.with_image_url(url)
        });

    vec![Message::system(system_prompt), user]
}

pub struct VisionAgent {
    deployment: AgentDeployment,
    provider: Box<dyn Provider>,
}

impl VisionAgent {
    /// Create an agent backed by the OpenAI-compatible endpoint of the deployment
    pub fn new<S: Into<String>>(deployment: AgentDeployment, api_key: S) -> VisionResult<Self> {
        let config = OpenAiProviderConfig::new(&deployment.llm_config, api_key);
        let provider = OpenAiProvider::new(config).map_err(|err| {
            tracing::error!(error = %err, "Failed to create vision agent");
            err
        })?;
        Ok(Self::with_provider(deployment, Box::new(provider)))
    }

    /// Like [`VisionAgent::new`], with the credential read from `OPENAI_API_KEY`
    pub fn from_env(deployment: AgentDeployment) -> VisionResult<Self> {
        let provider = OpenAiProviderConfig::from_env(&deployment.llm_config)
            .and_then(OpenAiProvider::new)
            .map_err(|err| {
                tracing::error!(error = %err, "Failed to create vision agent");
                err
            })?;
        Ok(Self::with_provider(deployment, Box::new(provider)))
    }

    pub fn with_provider(deployment: AgentDeployment, provider: Box<dyn Provider>) -> Self {
        Self {
            deployment,
            provider,
        }
    }

    pub fn deployment(&self) -> &AgentDeployment {
        &self.deployment
    }

    /// Resolve `tool_name` and run the matching operation.
    ///
    /// Failures are logged with a description of the input before being returned.
    pub fn run(&self, request: &Request) -> VisionResult<String> {
        let input = describe(&request.tool_input_data);
        tracing::info!(tool_name = %request.tool_name, %input, "Running agent request");

        self.dispatch(request).map_err(|err| {
            tracing::error!(
                tool_name = %request.tool_name,
                %input,
                error = %err,
                "Failed to generate response"
            );
            err
        })
    }

    fn dispatch(&self, request: &Request) -> VisionResult<String> {
        match request.tool_name.parse::<Operation>()? {
            Operation::Vision => {
                let data = ToolInputData::try_from(request.tool_input_data.clone())?;
                self.vision(data)
            }
        }
    }

    fn vision(&self, data: ToolInputData) -> VisionResult<String> {
        let input = data.normalize();
        let messages = build_messages(&self.deployment.system_prompt.role, &input);
        self.provider.complete(&messages)
    }
}
