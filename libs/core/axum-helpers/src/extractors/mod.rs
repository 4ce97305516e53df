//! Custom extractors for Axum handlers.
//!
//! Each rejects with the standard [`ErrorResponse`](crate::errors::ErrorResponse) body.

pub mod form_payload;
pub mod uuid_path;
pub mod validated_json;
pub mod validated_query;

pub use form_payload::{FormPayload, MAX_UPLOAD_BYTES, UploadedFile};
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
pub use validated_query::ValidatedQuery;
