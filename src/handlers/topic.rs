//! Topic and poll handlers

use crate::core::{AppError, AppState};
use crate::dtos::{CreateTopicDTO, PollDTO, TopicDTO, VoteDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_topic(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateTopicDTO>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let (topic, poll) = state.topics().create_topic(&current_user, body).await?;
    info!(topic_id = topic.topic_id, "Topic created");
    Ok((StatusCode::CREATED, Json(TopicDTO::new(topic, poll))))
}

#[instrument(skip(state))]
pub async fn get_topic(
    State(state): State<Arc<AppState>>,
    Path(topic_id): Path<i32>,
) -> Result<Json<TopicDTO>, AppError> {
    let (topic, poll) = state.topics().get_topic(topic_id).await?;
    Ok(Json(TopicDTO::new(topic, poll)))
}

#[instrument(skip(state))]
pub async fn get_poll(
    State(state): State<Arc<AppState>>,
    Path(poll_id): Path<i32>,
) -> Result<Json<PollDTO>, AppError> {
    let poll = state.polls().get_poll(poll_id).await?;
    Ok(Json(PollDTO::from(poll)))
}

/// Votes for the chosen items. Votes on an expired poll are ignored and
/// the poll is returned unchanged.
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, items = ?body.item_ids))]
pub async fn vote(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(poll_id): Path<i32>,
    Json(body): Json<VoteDTO>,
) -> Result<Json<PollDTO>, AppError> {
    let poll = state.polls().vote(poll_id, &body.item_ids).await?;
    Ok(Json(PollDTO::from(poll)))
}
