//! Banner handlers

use crate::core::{AppError, AppState};
use crate::dtos::SetBannerDTO;
use crate::entities::{Banner, User};
use axum::{
    Extension,
    extract::{Json, State},
};
use std::sync::Arc;
use tracing::instrument;

pub async fn list_banners(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Banner>>, AppError> {
    Ok(Json(state.banners().get_all_banners().await?))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn set_banner(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<SetBannerDTO>,
) -> Result<Json<Banner>, AppError> {
    let banner = state.banners().set_banner(&current_user, body).await?;
    Ok(Json(banner))
}
