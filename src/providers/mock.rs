use std::sync::Mutex;

use super::base::Provider;
use super::types::message::Message;
use crate::errors::{VisionError, VisionResult};

/// A mock provider that records every call and answers with a canned reply
pub struct MockProvider {
    reply: VisionResult<String>,
    calls: Mutex<Vec<Vec<Message>>>,
}

impl MockProvider {
    pub fn new<S: Into<String>>(reply: S) -> Self {
        Self {
            reply: Ok(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A provider whose every call fails with an upstream error of the given status
    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            reply: Err(VisionError::upstream(Some(status), message)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

impl Provider for MockProvider {
    fn complete(&self, messages: &[Message]) -> VisionResult<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(VisionError::Upstream { status, message }) => {
                Err(VisionError::upstream(*status, message.clone()))
            }
            Err(other) => Err(VisionError::upstream(None, other.to_string())),
        }
    }
}
