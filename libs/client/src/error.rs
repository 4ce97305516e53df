use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Vec<String>,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidBaseUrl(_) => None,
        }
    }

    /// Messages to show next to a form: the detail list, or the single message.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Api {
                message, details, ..
            } if details.is_empty() => vec![message.clone()],
            Self::Api { details, .. } => details.clone(),
            other => vec![other.to_string()],
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
