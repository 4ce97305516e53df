use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Image must be {max_mb} MB or smaller (got {size} bytes)")]
    TooLarge { size: usize, max_mb: usize },

    #[error("Image is empty")]
    Empty,

    #[error("Only image files can be uploaded (got {0})")]
    UnsupportedType(String),

    #[error("Upload request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Media store rejected upload ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Media store response had no URL")]
    MissingUrl,

    #[error("Upload failed: {0}")]
    Failed(String),
}

impl MediaError {
    /// Whether the client sent an unacceptable file, as opposed to an upstream fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::TooLarge { .. } | Self::Empty | Self::UnsupportedType(_)
        )
    }
}

pub type MediaResult<T> = Result<T, MediaError>;
