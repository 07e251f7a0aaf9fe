use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrlContent {
    pub image_url: ImageUrl,
}

/// A single block of message content, serialized the way chat-completion
/// endpoints expect it: `{"type": "text", ...}` or `{"type": "image_url", ...}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Content {
    Text(TextContent),
    ImageUrl(ImageUrlContent),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(TextContent { text: text.into() })
    }

    pub fn image_url<S: Into<String>>(url: S) -> Self {
        Content::ImageUrl(ImageUrlContent {
            image_url: ImageUrl { url: url.into() },
        })
    }

    /// Get the text content if this is a TextContent variant
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(&text.text),
            _ => None,
        }
    }

    /// Get the referenced url if this is an ImageUrlContent variant
    pub fn as_image_url(&self) -> Option<&str> {
        match self {
            Content::ImageUrl(image) => Some(&image.image_url.url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_block_shape() -> serde_json::Result<()> {
        let value = serde_json::to_value(Content::text("What is in this image?"))?;
        assert_eq!(
            value,
            json!({"type": "text", "text": "What is in this image?"})
        );
        Ok(())
    }

    #[test]
    fn test_image_block_shape() -> serde_json::Result<()> {
        let value = serde_json::to_value(Content::image_url("https://x/img.png"))?;
        assert_eq!(
            value,
            json!({"type": "image_url", "image_url": {"url": "https://x/img.png"}})
        );
        Ok(())
    }

    #[test]
    fn test_accessors() {
        let text = Content::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert_eq!(text.as_image_url(), None);

        let image = Content::image_url("a.png");
        assert_eq!(image.as_image_url(), Some("a.png"));
        assert_eq!(image.as_text(), None);
    }
}
