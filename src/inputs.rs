use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{VisionError, VisionResult};

pub const DEFAULT_IMAGE_QUESTION: &str = "What can you tell me about this image?";
pub const DEFAULT_IMAGES_QUESTION: &str = "What can you tell me about these images?";

/// Longest URL prefix written to logs; `data:` URLs carry whole images
const MAX_LOGGED_URL_CHARS: usize = 80;

/// A request as delivered by the dispatching framework.
///
/// `tool_input_data` stays loosely typed here; it is only interpreted once the
/// operation named by `tool_name` is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub tool_name: String,
    pub tool_input_data: Value,
}

impl Request {
    pub fn new<S: Into<String>>(tool_name: S, tool_input_data: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_input_data,
        }
    }
}

/// The two accepted shapes of `tool_input_data`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub enum ToolInputData {
    /// Legacy shape: the payload is the image URL itself
    SingleImage(String),
    MultiImage {
        question: Option<String>,
        images: Vec<String>,
    },
}

/// Normalized input of a vision call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionInput {
    pub question: String,
    pub images: Vec<String>,
}

impl ToolInputData {
    pub fn normalize(self) -> VisionInput {
        match self {
            ToolInputData::SingleImage(url) => VisionInput {
                question: DEFAULT_IMAGE_QUESTION.to_string(),
                images: vec![url],
            },
            ToolInputData::MultiImage { question, images } => VisionInput {
                question: question.unwrap_or_else(|| DEFAULT_IMAGES_QUESTION.to_string()),
                images,
            },
        }
    }
}

impl TryFrom<Value> for ToolInputData {
    type Error = VisionError;

    fn try_from(value: Value) -> VisionResult<Self> {
        match value {
            Value::String(url) => Ok(ToolInputData::SingleImage(url)),
            Value::Object(mut fields) => {
                let question = match fields.remove("question") {
                    None | Some(Value::Null) => None,
                    Some(Value::String(question)) => Some(question),
                    Some(other) => {
                        return Err(VisionError::InvalidInput(format!(
                            "question must be a string, got {}",
                            kind(&other)
                        )))
                    }
                };

                // older callers send a single `image` key
                let images = match fields.remove("images").or_else(|| fields.remove("image")) {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::String(url)) => vec![url],
                    Some(Value::Array(items)) => items
                        .into_iter()
                        .map(|item| match item {
                            Value::String(url) => Ok(url),
                            other => Err(VisionError::InvalidInput(format!(
                                "images must contain only strings, got {}",
                                kind(&other)
                            ))),
                        })
                        .collect::<VisionResult<Vec<_>>>()?,
                    Some(other) => {
                        return Err(VisionError::InvalidInput(format!(
                            "images must be a string or a list of strings, got {}",
                            kind(&other)
                        )))
                    }
                };

                Ok(ToolInputData::MultiImage { question, images })
            }
            other => Err(VisionError::InvalidInput(format!(
                "expected an image URL or an object with images, got {}",
                kind(&other)
            ))),
        }
    }
}

/// Short description of a payload for logs, never the full content
pub fn describe(value: &Value) -> String {
    match value {
        Value::String(url) => format!("image {}", truncate_url(url)),
        Value::Object(fields) => {
            let count = match fields.get("images").or_else(|| fields.get("image")) {
                Some(Value::Array(items)) => items.len(),
                Some(Value::String(_)) => 1,
                _ => 0,
            };
            format!("{} image(s), question: {}", count, fields.contains_key("question"))
        }
        other => kind(other).to_string(),
    }
}

fn truncate_url(url: &str) -> String {
    match url.char_indices().nth(MAX_LOGGED_URL_CHARS) {
        Some((end, _)) => format!("{}... ({} bytes)", &url[..end], url.len()),
        None => url.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> VisionResult<VisionInput> {
        Ok(ToolInputData::try_from(value)?.normalize())
    }

    #[test]
    fn test_string_input() -> VisionResult<()> {
        for url in ["https://x/img.png", "a.png", ""] {
            let input = normalize(json!(url))?;
            assert_eq!(input.images, vec![url.to_string()]);
            assert_eq!(input.question, DEFAULT_IMAGE_QUESTION);
        }
        Ok(())
    }

    #[test]
    fn test_single_string_matches_one_element_list() -> VisionResult<()> {
        let single = normalize(json!({"images": "u.png", "question": "What?"}))?;
        let list = normalize(json!({"images": ["u.png"], "question": "What?"}))?;
        assert_eq!(single, list);
        assert_eq!(single.images, vec!["u.png".to_string()]);
        Ok(())
    }

    #[test]
    fn test_missing_question() -> VisionResult<()> {
        let input = normalize(json!({"images": ["a.png", "b.png"]}))?;
        assert_eq!(input.question, DEFAULT_IMAGES_QUESTION);
        assert_eq!(input.images.len(), 2);

        let input = normalize(json!({"images": ["a.png"], "question": null}))?;
        assert_eq!(input.question, DEFAULT_IMAGES_QUESTION);
        Ok(())
    }

    #[test]
    fn test_missing_images() -> VisionResult<()> {
        let input = normalize(json!({"question": "Anything there?"}))?;
        assert_eq!(input.question, "Anything there?");
        assert!(input.images.is_empty());

        let input = normalize(json!({}))?;
        assert_eq!(input.question, DEFAULT_IMAGES_QUESTION);
        assert!(input.images.is_empty());
        Ok(())
    }

    #[test]
    fn test_image_alias() -> VisionResult<()> {
        let input = normalize(json!({
            "image": "https://x/diagram.png",
            "question": "What can you tell me about this image?"
        }))?;
        assert_eq!(input.images, vec!["https://x/diagram.png".to_string()]);
        Ok(())
    }

    #[test]
    fn test_normalizer_keeps_every_image() -> VisionResult<()> {
        let input = normalize(json!({"images": ["a.png", "b.png", "c.png"]}))?;
        assert_eq!(input.images, vec!["a.png", "b.png", "c.png"]);
        Ok(())
    }

    #[test]
    fn test_invalid_shapes() {
        for value in [
            json!(42),
            json!(null),
            json!(true),
            json!(["a.png", "b.png"]),
            json!({"images": 7}),
            json!({"images": ["a.png", 3]}),
            json!({"images": "a.png", "question": ["why"]}),
        ] {
            let result = ToolInputData::try_from(value.clone());
            assert!(
                matches!(result, Err(VisionError::InvalidInput(_))),
                "expected InvalidInput for {}",
                value
            );
        }
    }

    #[test]
    fn test_deserialize_through_serde() {
        let data: ToolInputData = serde_json::from_str(r#""https://x/img.png""#).unwrap();
        assert_eq!(data, ToolInputData::SingleImage("https://x/img.png".to_string()));

        let result = serde_json::from_str::<ToolInputData>("12");
        assert!(result.is_err());
    }

    #[test]
    fn test_request_deserialize() {
        let request: Request = serde_json::from_str(
            r#"{"tool_name": "vision", "tool_input_data": {"images": ["a.png"]}}"#,
        )
        .unwrap();
        assert_eq!(request.tool_name, "vision");
        assert_eq!(request.tool_input_data, json!({"images": ["a.png"]}));
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&json!("a.png")), "image a.png");
        assert_eq!(
            describe(&json!({"images": ["a", "b"], "question": "q"})),
            "2 image(s), question: true"
        );
        assert_eq!(describe(&json!(3)), "a number");
    }

    #[test]
    fn test_describe_truncates_long_urls() {
        let data_url = format!("data:image/png;base64,{}", "A".repeat(10_000));
        let description = describe(&json!(data_url));

        assert!(description.starts_with("image data:image/png;base64,AAAA"));
        assert!(description.ends_with(&format!("... ({} bytes)", data_url.len())));
        assert!(description.len() < 120);

        let short = "https://x/img.png";
        assert_eq!(describe(&json!(short)), "image https://x/img.png");
    }
}
