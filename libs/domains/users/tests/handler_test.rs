//! Router-level tests for registration, sign-in and session validation.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use axum_helpers::{AUTH_COOKIE, JwtConfig, SessionGate, SessionTokens};
use domain_users::{InMemoryUserRepository, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

const SECRET: &str = "users-handler-test-secret-32-chars-long";

fn app() -> Router {
    let tokens = SessionTokens::new(&JwtConfig::new(SECRET));
    let service = UserService::new(InMemoryUserRepository::new());
    let gate = SessionGate::new(tokens.clone(), Arc::new(service.session_resolver()));

    Router::new()
        .nest("/users", handlers::router(service, tokens, false))
        .nest("/auth", handlers::auth_router(gate))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn registration(first: &str, email: &str) -> Value {
    json!({
        "firstName": first,
        "lastName": "smith",
        "email": email,
        "password": "secret1"
    })
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &Response) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string())
}

async fn register(app: &Router, first: &str, email: &str) -> Response {
    app.clone()
        .oneshot(post("/users/register", registration(first, email)))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_first_registrant_is_admin() {
    let app = app();

    let response = register(&app, "ada", "ada@diner.test").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["role"], "admin");
    assert_eq!(body["user"]["firstName"], "Ada");
    assert!(body["user"].get("password").is_none());

    let body = json_body(register(&app, "bo", "bo@diner.test").await).await;
    assert_eq!(body["user"]["role"], "user");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = app();
    register(&app, "ada", "ada@diner.test").await;

    let response = register(&app, "ada", "ada@diner.test").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Email already exists. Please try again");
}

#[tokio::test]
async fn test_register_validation_messages() {
    let response = app()
        .oneshot(post(
            "/users/register",
            json!({
                "firstName": "R2D2",
                "lastName": "",
                "email": "nope",
                "password": "123"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let details: Vec<String> = serde_json::from_value(body["details"].clone()).unwrap();
    assert!(details.contains(&"First Name should only contain letters and spaces".to_string()));
    assert!(details.contains(&"Last Name is required".to_string()));
    assert!(details.contains(&"Invalid email address".to_string()));
    assert!(details.contains(&"Password should be at least 6 characters long".to_string()));
}

#[tokio::test]
async fn test_sign_in_sets_cookie_and_validates() {
    let app = app();
    register(&app, "ada", "ada@diner.test").await;

    let response = app
        .clone()
        .oneshot(post(
            "/users/sign_in",
            json!({ "email": "ada@diner.test", "password": "secret1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = set_cookie(&response).expect("sign-in sets a cookie");
    assert!(cookie.starts_with(&format!("{AUTH_COOKIE}=")));
    assert!(cookie.contains("HttpOnly"));

    let body = json_body(response).await;
    assert_eq!(body["user"]["name"], "Ada Smith");
    assert_eq!(body["user"]["role"], "admin");
    let token = body["token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/auth/validate_token")
                .header(header::COOKIE, format!("{AUTH_COOKIE}={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["token"], token.as_str());
    assert_eq!(body["user"]["email"], "ada@diner.test");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn test_wrong_password_has_no_cookie() {
    let app = app();
    register(&app, "ada", "ada@diner.test").await;

    let response = app
        .oneshot(post(
            "/users/sign_in",
            json!({ "email": "ada@diner.test", "password": "wrong-pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookie(&response).is_none());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid Credentials");
}

#[tokio::test]
async fn test_validate_token_without_cookie() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/auth/validate_token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "No token, authorization denied");
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = set_cookie(&response).unwrap();
    assert!(cookie.starts_with(&format!("{AUTH_COOKIE}=;")));
    assert!(cookie.contains("Max-Age=0"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}
