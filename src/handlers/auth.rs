//! Auth handlers - registration, activation, login and password recovery

use crate::core::auth::TOKEN_LIFETIME_HOURS;
use crate::core::{AppError, AppState};
use crate::dtos::{CreateUserDTO, LoginDTO, ProfileDTO, RestorePasswordDTO, UserDTO};
use axum::{
    extract::{Json, Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

fn header_value(value: String) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&value)
        .map_err(|_| AppError::internal_server_error("Failed to build response headers"))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>,
) -> Result<impl IntoResponse, AppError> {
    // fail fast before touching the database
    body.validate()?;
    let user = state.users().register(body).await?;
    info!(user_id = user.user_id, "Registration completed, waiting for activation");
    Ok((StatusCode::CREATED, Json(UserDTO::from(user))))
}

#[instrument(skip(state))]
pub async fn activate_account(
    State(state): State<Arc<AppState>>,
    Path(uuid): Path<String>,
) -> Result<Json<UserDTO>, AppError> {
    let user = state.users().activate_account(&uuid).await?;
    Ok(Json(UserDTO::from(user)))
}

/// Returns the profile with the token as bearer header and HttpOnly cookie
#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>,
) -> Result<impl IntoResponse, AppError> {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return Err(AppError::unauthorized("Username or password are not correct"));
    }
    let (user, token) = state.users().login(&body).await?;

    let cookie = format!(
        "token={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        token,
        TOKEN_LIFETIME_HOURS * 60 * 60
    );
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(cookie)?);
    headers.insert(header::AUTHORIZATION, header_value(format!("Bearer {}", token))?);

    Ok((StatusCode::OK, headers, Json(ProfileDTO::from(user))))
}

#[instrument(skip(state, body))]
pub async fn restore_password(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RestorePasswordDTO>,
) -> Result<StatusCode, AppError> {
    body.validate()?;
    state.users().restore_password(&body.email).await?;
    Ok(StatusCode::NO_CONTENT)
}
