use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

pub const DUPLICATE_EMAIL_MESSAGE: &str = "Email already exists. Please try again";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid Credentials";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Session token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User not found".to_string()),
            UserError::DuplicateEmail(_) => AppError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()),
            UserError::InvalidCredentials => {
                AppError::BadRequest(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("Password hashing failed: {msg}"))
            }
            UserError::Token(msg) => {
                AppError::InternalServerError(format!("Session token failed: {msg}"))
            }
            UserError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_user_errors_map_to_client_statuses() {
        let status = |err: UserError| err.into_response().status();

        assert_eq!(status(UserError::InvalidCredentials), StatusCode::BAD_REQUEST);
        assert_eq!(
            status(UserError::DuplicateEmail("ada@diner.test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status(UserError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(UserError::Database("down".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
