//! Enumerations shared by the entities

use serde::{Deserialize, Serialize};

// ********************* ENUMS **********************//

/// Lifecycle of a private message. A message deleted from both mailboxes has
/// no status: it is removed from the store.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "pm_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrivateMessageStatus {
    Draft,
    Sent,
    DeletedFromInbox,
    DeletedFromOutbox,
}

/// The mailbox a message is listed in, from the point of view of one user
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mailbox {
    Inbox,
    Outbox,
    Drafts,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "banner_position", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BannerPosition {
    Top,
    Bottom,
}
