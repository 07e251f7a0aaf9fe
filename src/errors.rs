use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("OpenAI API key not set")]
    MissingCredential,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Method {0} not found")]
    UnsupportedOperation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream error{}: {message}", format_status(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VisionError {
    pub fn upstream<S: Into<String>>(status: Option<u16>, message: S) -> Self {
        VisionError::Upstream {
            status,
            message: message.into(),
        }
    }

    /// HTTP status reported by the completion endpoint, if the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            VisionError::Upstream { status, .. } => *status,
            VisionError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for VisionError {
    fn from(err: config::ConfigError) -> Self {
        VisionError::Config(err.to_string())
    }
}

fn format_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" (status {})", code),
        None => String::new(),
    }
}

pub type VisionResult<T> = Result<T, VisionError>;
