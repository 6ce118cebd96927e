use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::Validator;
use super::{ApiError, ApiResponse, AppState, MessageResponse};
use crate::services::{Registration, UserInfo};

/// Session key holding the authenticated user's id.
const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Gate for the /api/admin surface.
///
/// Resolves the session cookie to a user id, reloads the user from the
/// store, and only then lets the request through. The lookup happens on
/// every request so a deleted account invalidates its sessions immediately,
/// and a revoked admin flag takes effect without waiting for expiry.
pub async fn admin_middleware(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_session_user(&state, &session).await?;

    if !user.is_admin {
        return Err(ApiError::Forbidden("Not authorized".to_string()));
    }

    tracing::Span::current().record("user_id", user.id);
    Ok(next.run(request).await)
}

/// Load the user behind the current session, or fail with 401.
///
/// A session whose user row has been deleted is treated exactly like no
/// session at all.
async fn resolve_session_user(
    state: &Arc<AppState>,
    session: &Session,
) -> Result<UserInfo, ApiError> {
    let user_id: Option<i32> = session
        .get(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?;

    let Some(user_id) = user_id else {
        return Err(ApiError::Unauthorized("Not authenticated".to_string()));
    };

    state
        .auth()
        .get_user(user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
/// Create an account and establish a session for it in one step.
pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let mut v = Validator::new();
    v.require("username", &payload.username)
        .require("password", &payload.password)
        .require("email", &payload.email);
    if !payload.username.trim().is_empty() {
        v.username("username", &payload.username);
    }
    if !payload.password.is_empty() {
        v.password("password", &payload.password);
    }
    if !payload.email.trim().is_empty() {
        v.email("email", &payload.email);
    }
    v.finish()?;

    let user = state
        .auth()
        .register(Registration {
            username: payload.username,
            password: payload.password,
            email: payload.email,
        })
        .await?;

    establish_session(&session, &user).await?;

    tracing::info!("New account registered: {}", user.username);

    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// POST /api/auth/login
/// Verify credentials and establish a session.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let mut v = Validator::new();
    v.require("username", &payload.username)
        .require("password", &payload.password);
    v.finish()?;

    let user = state
        .auth()
        .login(&payload.username, &payload.password)
        .await?;

    establish_session(&session, &user).await?;

    Ok(Json(ApiResponse::success(user)))
}

/// POST /api/auth/logout
/// Destroy the server-side session record; the cookie stops resolving.
pub async fn logout(session: Session) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    session
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to destroy session: {e}")))?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: "Logged out".to_string(),
    })))
}

/// GET /api/auth/user
/// Return the current user, or 401 when the session does not resolve.
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    let user = resolve_session_user(&state, &session).await?;
    Ok(Json(ApiResponse::success(user)))
}

// ============================================================================
// Helpers
// ============================================================================

async fn establish_session(session: &Session, user: &UserInfo) -> Result<(), ApiError> {
    session
        .insert(SESSION_USER_KEY, user.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))
}
