use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use media::MediaError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Item with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid input: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("Image upload failed: {0}")]
    Upload(#[from] MediaError),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
            ItemError::DuplicateName(name) => {
                AppError::Conflict(format!("Item with name '{}' already exists", name))
            }
            ItemError::Validation(messages) => AppError::Validation(messages),
            ItemError::Upload(e) if e.is_client_error() => AppError::BadRequest(e.to_string()),
            ItemError::Upload(e) => AppError::InternalServerError(e.to_string()),
            ItemError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}
