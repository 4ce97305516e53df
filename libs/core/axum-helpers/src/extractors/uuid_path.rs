//! Single `{id}` path segment parsed as a UUID.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

/// Record id taken from the route's `{id}` segment, as in `PUT /api/items/{id}`.
///
/// A segment that is not a UUID is answered with 400 `INVALID_UUID` before the
/// handler runs, so handlers never see a malformed id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UuidPath(pub Uuid);

impl<S> FromRequestParts<S> for UuidPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match Uuid::parse_str(raw.trim()) {
            Ok(id) => Ok(UuidPath(id)),
            Err(e) => {
                tracing::debug!(id = %raw, "Rejected malformed id");
                Err(AppError::from(e).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/items/{id}",
            get(|UuidPath(id): UuidPath| async move { id.to_string() }),
        )
    }

    async fn get_item(uri: &str) -> Response {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_id_reaches_handler() {
        let id = Uuid::now_v7();
        let response = get_item(&format!("/items/{id}")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, id.to_string());
    }

    #[tokio::test]
    async fn test_malformed_id_is_bad_request() {
        let response = get_item("/items/pancakes").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "INVALID_UUID");
    }
}
