//! Authentication routes (signup, login, logout, session check).
//!
//! Login deliberately returns the same generic message for an unknown
//! email and a failed password check, so callers cannot enumerate
//! registered users.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use cookie::time::{Duration, OffsetDateTime};
use cookie::{Cookie, SameSite};
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, CreateUserError, User};
use crate::services::token::{AUTH_COOKIE_NAME, TOKEN_LIFETIME_SECS, token_from_headers};
use crate::state::AppState;

/// Generic login failure message. Identical for unknown email and
/// wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 6;

/// Signup request body. Fields are optional so missing input maps to a
/// 400 validation error rather than a body-rejection status.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Build the session cookie carrying a freshly issued token.
///
/// HttpOnly, SameSite=Strict, Path=/, Max-Age matching the token
/// lifetime. `Secure` is dropped only for local development.
fn auth_cookie(token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE_NAME, token);
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::seconds(TOKEN_LIFETIME_SECS));
    cookie
}

/// Build an already-expired cookie that overwrites the session cookie.
fn clear_auth_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(AUTH_COOKIE_NAME, "");
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::ZERO);
    cookie.set_expires(OffsetDateTime::UNIX_EPOCH);
    cookie
}

/// Treat missing and empty fields the same.
fn required(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

/// Signup handler.
///
/// POST /api/auth/signup
async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> AppResult<Response> {
    let (Some(name), Some(email), Some(password)) = (
        required(request.name),
        required(request.email),
        required(request.password),
    ) else {
        return Err(AppError::Validation(
            "Missing required fields (email, password, name)".to_string(),
        ));
    };

    // Characters, not bytes: a multibyte password counts by what the
    // user typed.
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    // Pre-check for a friendlier conflict; the unique constraint still
    // backstops concurrent signups.
    if User::find_by_email(state.db(), &email).await?.is_some() {
        return Err(AppError::Conflict(
            "User already exists with this email".to_string(),
        ));
    }

    let user = User::create(
        state.db(),
        CreateUser {
            name,
            email,
            password,
        },
    )
    .await
    .map_err(|e| match e {
        CreateUserError::DuplicateEmail => {
            AppError::Conflict("User already exists with this email".to_string())
        }
        other => AppError::Internal(anyhow::Error::new(other)),
    })?;

    info!(user_id = %user.id, "user created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "userId": user.id,
        })),
    )
        .into_response())
}

/// Login handler.
///
/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Response> {
    let (Some(email), Some(password)) = (required(request.email), required(request.password))
    else {
        return Err(AppError::Validation(
            "Missing required fields (email, password)".to_string(),
        ));
    };

    let Some(user) = User::find_by_email(state.db(), &email).await? else {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !user.verify_password(&password) {
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let token = state.tokens().issue(&user)?;
    let cookie = auth_cookie(token, state.cookie_secure());

    info!(user_id = %user.id, "user logged in");

    Ok((
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({
            "message": "Login successful",
            "user": {
                "id": user.id,
                "name": user.name,
                "email": user.email,
            },
        })),
    )
        .into_response())
}

/// Logout handler.
///
/// POST /api/auth/logout — overwrites the cookie with an expired one.
async fn logout(State(state): State<AppState>) -> Response {
    let cookie = clear_auth_cookie(state.cookie_secure());

    (
        [(header::SET_COOKIE, cookie.to_string())],
        Json(json!({ "message": "Logout successful" })),
    )
        .into_response()
}

/// Session check handler.
///
/// GET /api/auth/me — verifies the token, then re-fetches the user
/// record to catch deletion after issuance. Any failure returns 401
/// and clears the cookie.
async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match current_user(&state, &headers).await {
        Ok(user) => Json(json!({
            "user": {
                "id": user.id,
                "name": user.name,
                "email": user.email,
                "created": user.created,
            },
        }))
        .into_response(),
        Err(message) => {
            tracing::debug!(%message, "session check failed");
            let cookie = clear_auth_cookie(state.cookie_secure());
            (
                StatusCode::UNAUTHORIZED,
                [(header::SET_COOKIE, cookie.to_string())],
                Json(json!({ "message": message })),
            )
                .into_response()
        }
    }
}

/// Resolve the current user from the session cookie.
async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<User, &'static str> {
    let token = token_from_headers(headers).ok_or("Not authenticated: No token")?;

    let claims = state
        .tokens()
        .verify(&token)
        .map_err(|_| "Not authenticated: Invalid or expired token")?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| "Not authenticated: Invalid or expired token")?;

    match User::find_by_id(state.db(), user_id).await {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err("Not authenticated: User not found"),
        Err(e) => {
            tracing::error!(error = %e, "database error during session check");
            Err("Not authenticated: User lookup failed")
        }
    }
}

/// Create the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
}
