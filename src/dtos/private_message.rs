//! Private message DTOs

use crate::entities::{Mailbox, PrivateMessage, PrivateMessageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PrivateMessageDTO {
    pub message_id: i32,
    pub user_from: i32,
    pub user_to: Option<i32>,
    pub title: String,
    pub body: String,
    pub creation_date: DateTime<Utc>,
    pub read: bool,
    pub status: PrivateMessageStatus,
}

impl From<PrivateMessage> for PrivateMessageDTO {
    fn from(value: PrivateMessage) -> Self {
        Self {
            message_id: value.message_id,
            user_from: value.user_from,
            user_to: value.user_to,
            title: value.title,
            body: value.body,
            creation_date: value.creation_date,
            read: value.read,
            status: value.status,
        }
    }
}

/// Message form, used both to send directly and to send a saved draft
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct SendMessageDTO {
    #[validate(length(min = 1, max = 25, message = "Recipient is required"))]
    pub recipient: String,

    #[validate(length(min = 1, max = 255, message = "Title must be between 1 and 255 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 20000, message = "Body must be between 1 and 20000 characters"))]
    pub body: String,
}

/// Draft form: nothing is mandatory yet
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct DraftDTO {
    pub message_id: Option<i32>,

    #[validate(length(max = 25))]
    pub recipient: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 20000))]
    pub body: String,
}

/// Row to insert for a new message
#[derive(Debug, Clone)]
pub struct CreatePrivateMessageDTO {
    pub user_from: i32,
    pub user_to: Option<i32>,
    pub title: String,
    pub body: String,
    pub creation_date: DateTime<Utc>,
    pub status: PrivateMessageStatus,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteMessagesDTO {
    pub ids: Vec<i32>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DeleteMessagesResultDTO {
    /// Mailbox of the last deleted message, None when nothing was deleted
    pub mailbox: Option<Mailbox>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct NewMessagesCountDTO {
    pub count: i64,
}
