//! User handlers - search, public profiles and the own profile

use crate::core::{AppError, AppState};
use crate::dtos::{EditProfileDTO, ProfileDTO, UserDTO, UserSearchQuery};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Username completion: `/users?search=prefix`
#[instrument(skip(state), fields(search = %params.search))]
pub async fn search_usernames(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserSearchQuery>,
) -> Result<Json<Vec<String>>, AppError> {
    debug!("Searching usernames");
    let usernames = state.users().get_usernames(&params.search).await?;
    Ok(Json(usernames))
}

#[instrument(skip(state))]
pub async fn get_user_by_username(
    State(state): State<Arc<AppState>>,
    Path(username): Path<String>,
) -> Result<Json<UserDTO>, AppError> {
    let user = state.users().get_by_username(&username).await?;
    Ok(Json(UserDTO::from(user)))
}

pub async fn get_my_profile(Extension(current_user): Extension<User>) -> Json<ProfileDTO> {
    Json(ProfileDTO::from(current_user))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn edit_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<EditProfileDTO>,
) -> Result<Json<ProfileDTO>, AppError> {
    let user = state.users().save_edited_profile(&current_user, body).await?;
    info!("Profile saved");
    Ok(Json(ProfileDTO::from(user)))
}
