use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, StatusCode, header::SET_COOKIE},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    CurrentUser, SessionGate, SessionToken, SessionTokens, ValidatedJson, clear_session_cookie,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
    require_session, session_cookie,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{UserError, UserResult};
use crate::models::{
    RegisterRequest, RegisterResponse, Role, SignInRequest, SignInResponse, SignedInUser,
    UserResponse, ValidateTokenResponse,
};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(register, sign_in, logout),
    components(
        schemas(
            RegisterRequest,
            RegisterResponse,
            SignInRequest,
            SignInResponse,
            SignedInUser,
            UserResponse,
            Role
        ),
        responses(
            BadRequestValidationResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Users", description = "Registration and sign-in")
    )
)]
pub struct ApiDoc;

/// OpenAPI documentation for the session check
#[derive(OpenApi)]
#[openapi(
    paths(validate_token),
    components(
        schemas(ValidateTokenResponse),
        responses(UnauthorizedResponse)
    ),
    tags(
        (name = "Auth", description = "Session validation")
    )
)]
pub struct AuthApiDoc;

struct UsersState<R: UserRepository> {
    service: UserService<R>,
    tokens: SessionTokens,
    secure_cookies: bool,
}

/// Users router: register, sign in, log out.
///
/// `secure_cookies` marks the session cookie `Secure; SameSite=None`.
pub fn router<R: UserRepository + 'static>(
    service: UserService<R>,
    tokens: SessionTokens,
    secure_cookies: bool,
) -> Router {
    let state = Arc::new(UsersState {
        service,
        tokens,
        secure_cookies,
    });

    Router::new()
        .route("/register", post(register::<R>))
        .route("/sign_in", post(sign_in::<R>))
        .route("/logout", post(logout::<R>))
        .with_state(state)
}

/// Auth router: session validation behind the session gate.
pub fn auth_router(gate: SessionGate) -> Router {
    Router::new()
        .route("/validate_token", get(validate_token))
        .route_layer(middleware::from_fn_with_state(gate, require_session))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> UserResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state.service.register(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user,
        }),
    ))
}

/// Sign in and receive the `auth_token` cookie
#[utoipa::path(
    post,
    path = "/sign_in",
    tag = "Users",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in; sets the auth_token cookie", body = SignInResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sign_in<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
    ValidatedJson(input): ValidatedJson<SignInRequest>,
) -> UserResult<impl IntoResponse> {
    let user = state.service.sign_in(input).await?;

    let token = state
        .tokens
        .issue(user.id)
        .map_err(|e| UserError::Token(e.to_string()))?;
    let cookie = session_cookie(&token, state.secure_cookies)
        .map_err(|e| UserError::Token(e.to_string()))?;

    tracing::info!(user_id = %user.id, "User signed in");

    Ok((
        [(SET_COOKIE, cookie)],
        Json(SignInResponse {
            token,
            user: SignedInUser::from(&user),
        }),
    ))
}

/// Clear the session cookie
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Users",
    responses(
        (status = 200, description = "Cookie cleared")
    )
)]
async fn logout<R: UserRepository>(
    State(state): State<Arc<UsersState<R>>>,
) -> ([(axum::http::HeaderName, HeaderValue); 1], StatusCode) {
    (
        [(SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        StatusCode::OK,
    )
}

/// Return the session token and the user it belongs to
#[utoipa::path(
    get,
    path = "/validate_token",
    tag = "Auth",
    responses(
        (status = 200, description = "Session is valid", body = ValidateTokenResponse),
        (status = 401, response = UnauthorizedResponse)
    )
)]
async fn validate_token(
    CurrentUser(user): CurrentUser,
    SessionToken(token): SessionToken,
) -> Json<ValidateTokenResponse> {
    Json(ValidateTokenResponse { token, user })
}
