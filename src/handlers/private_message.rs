//! Private message handlers

use crate::core::{AppError, AppState};
use crate::dtos::{
    DeleteMessagesDTO, DeleteMessagesResultDTO, DraftDTO, NewMessagesCountDTO, PrivateMessageDTO,
    SendMessageDTO,
};
use crate::entities::{PrivateMessage, User};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

fn to_dtos(messages: Vec<PrivateMessage>) -> Json<Vec<PrivateMessageDTO>> {
    Json(messages.into_iter().map(PrivateMessageDTO::from).collect())
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_inbox(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<PrivateMessageDTO>>, AppError> {
    let messages = state.private_messages().inbox(&current_user).await?;
    debug!("Inbox holds {} messages", messages.len());
    Ok(to_dtos(messages))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_outbox(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<PrivateMessageDTO>>, AppError> {
    let messages = state.private_messages().outbox(&current_user).await?;
    debug!("Outbox holds {} messages", messages.len());
    Ok(to_dtos(messages))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_drafts(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<PrivateMessageDTO>>, AppError> {
    let messages = state.private_messages().drafts(&current_user).await?;
    Ok(to_dtos(messages))
}

pub async fn new_messages_count(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<NewMessagesCountDTO>, AppError> {
    let count = state
        .private_messages()
        .current_user_new_pm_count(Some(&current_user))
        .await?;
    Ok(Json(NewMessagesCountDTO { count }))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<SendMessageDTO>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let message = state.private_messages().send_message(&current_user, body).await?;
    info!(message_id = message.message_id, "Message sent");
    Ok((StatusCode::CREATED, Json(PrivateMessageDTO::from(message))))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn save_draft(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<DraftDTO>,
) -> Result<Json<PrivateMessageDTO>, AppError> {
    body.validate()?;
    let draft = state.private_messages().save_draft(&current_user, body).await?;
    Ok(Json(PrivateMessageDTO::from(draft)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn send_draft(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(message_id): Path<i32>,
    Json(body): Json<SendMessageDTO>,
) -> Result<Json<PrivateMessageDTO>, AppError> {
    body.validate()?;
    let message = state
        .private_messages()
        .send_draft(&current_user, message_id, body)
        .await?;
    Ok(Json(PrivateMessageDTO::from(message)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(message_id): Path<i32>,
) -> Result<Json<PrivateMessageDTO>, AppError> {
    let message = state.private_messages().get(&current_user, message_id).await?;
    Ok(Json(PrivateMessageDTO::from(message)))
}

/// Batch delete; answers with the mailbox to return to
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, count = body.ids.len()))]
pub async fn delete_messages(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<DeleteMessagesDTO>,
) -> Result<Json<DeleteMessagesResultDTO>, AppError> {
    if body.ids.is_empty() {
        return Err(AppError::bad_request("No message selected"));
    }
    let mailbox = state
        .private_messages()
        .delete(&current_user, &body.ids)
        .await?;
    Ok(Json(DeleteMessagesResultDTO { mailbox }))
}
