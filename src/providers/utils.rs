use serde_json::{json, Value};

use super::types::message::{Message, Role};
use crate::errors::{VisionError, VisionResult};

/// Convert the canonical message list to the chat-completion message specification.
///
/// System turns that hold a single text block are sent with plain string
/// content; every other turn is sent as a list of typed content blocks.
pub fn messages_to_openai_spec(messages: &[Message]) -> Vec<Value> {
    messages
        .iter()
        .map(|message| match (message.role, message.content.as_slice()) {
            (Role::System, [only]) if only.as_text().is_some() => json!({
                "role": message.role,
                "content": only.as_text(),
            }),
            _ => json!({
                "role": message.role,
                "content": message.content,
            }),
        })
        .collect()
}

/// Pull `choices[0].message.content` out of a chat-completion response.
///
/// `status` is the HTTP status the body arrived with and is attached to every error.
pub fn openai_response_to_text(response: &Value, status: Option<u16>) -> VisionResult<String> {
    if let Some(error) = response.get("error") {
        return Err(VisionError::upstream(status, error_message(error)));
    }

    let choices = response
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| VisionError::upstream(status, "Response is missing the choices field"))?;

    let first = choices
        .first()
        .ok_or_else(|| VisionError::upstream(status, "Response contained no choices"))?;

    first
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| VisionError::upstream(status, "First choice has no message content"))
}

/// Best-effort description of an error body returned by the completion endpoint
pub fn upstream_error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => match value.get("error") {
            Some(error) => error_message(error),
            None => value.to_string(),
        },
        Err(_) if body.trim().is_empty() => "Empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

fn error_message(error: &Value) -> String {
    error
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .or_else(|| error.as_str().map(str::to_string))
        .unwrap_or_else(|| error.to_string())
}
