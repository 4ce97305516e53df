use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{CACHE_CONTROL, REFERRER_POLICY, SET_COOKIE, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
    },
    middleware::Next,
    response::Response,
};

const PERMISSIONS_POLICY: HeaderName = HeaderName::from_static("permissions-policy");
const X_XSS_PROTECTION: HeaderName = HeaderName::from_static("x-xss-protection");

/// Headers stamped on every response. The API never renders HTML of its own
/// outside the docs pages, so framing and sniffing are refused outright.
const STATIC_HEADERS: [(HeaderName, &str); 5] = [
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (X_XSS_PROTECTION, "1; mode=block"),
    (REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (PERMISSIONS_POLICY, "geolocation=(), microphone=(), camera=()"),
];

/// Adds the fixed security headers and marks cookie-bearing responses
/// (sign-in, logout) as `no-store` so shared caches never keep a session.
pub async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in STATIC_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    if headers.contains_key(SET_COOKIE) && !headers.contains_key(CACHE_CONTROL) {
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request as HttpRequest, middleware, routing::post};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/menu", post(|| async { "menu" }))
            .route(
                "/sign_in",
                post(|| async { ([(SET_COOKIE, "auth_token=abc; HttpOnly; Path=/")], "ok") }),
            )
            .layer(middleware::from_fn(security_headers))
    }

    async fn send(uri: &str) -> Response {
        app()
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_fixed_headers_on_every_response() {
        let response = send("/menu").await;

        assert_eq!(response.headers()[X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(response.headers()[X_FRAME_OPTIONS], "DENY");
        assert_eq!(
            response.headers()["permissions-policy"],
            "geolocation=(), microphone=(), camera=()"
        );
        assert!(response.headers().get(CACHE_CONTROL).is_none());
    }

    #[tokio::test]
    async fn test_session_cookie_responses_are_not_cached() {
        let response = send("/sign_in").await;
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
    }
}
