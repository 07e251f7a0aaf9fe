use super::types::message::Message;
use crate::errors::VisionResult;

/// Base trait for chat-completion providers
pub trait Provider: Send + Sync {
    /// Submit the canonical message list and return the answer text
    fn complete(&self, messages: &[Message]) -> VisionResult<String>;
}
