use serde::{Deserialize, Serialize};

use super::content::Content;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// A role-tagged turn of the canonical message list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<Content>,
}

impl Message {
    /// Create a system turn carrying the persona text
    pub fn system<S: Into<String>>(text: S) -> Self {
        Message {
            role: Role::System,
            content: vec![Content::text(text)],
        }
    }

    /// Create an empty user turn, filled with the `with_*` builders
    pub fn user() -> Self {
        Message {
            role: Role::User,
            content: Vec::new(),
        }
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.content.push(content);
        self
    }

    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(Content::text(text))
    }

    pub fn with_image_url<S: Into<String>>(self, url: S) -> Self {
        self.with_content(Content::image_url(url))
    }

    /// Concatenated text of all text blocks
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|content| content.as_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn image_urls(&self) -> Vec<&str> {
        self.content
            .iter()
            .filter_map(|content| content.as_image_url())
            .collect()
    }
}
