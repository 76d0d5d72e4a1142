//! PrivateMessage entity and its mailbox state machine

use super::enums::{Mailbox, PrivateMessageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PrivateMessage {
    pub message_id: i32,
    pub user_from: i32,
    // a draft can be saved before the recipient is chosen
    pub user_to: Option<i32>,
    pub title: String,
    pub body: String,
    pub creation_date: DateTime<Utc>,
    #[sqlx(rename = "is_read")]
    pub read: bool,
    pub status: PrivateMessageStatus,
}

/// What deleting a message from one mailbox does to the stored row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deletion {
    /// Nobody can see the message any more, remove the row
    Purge,
    /// The other party still sees it, only flag the mailbox as deleted
    MarkAs(PrivateMessageStatus),
}

impl PrivateMessage {
    pub fn is_sender(&self, user_id: i32) -> bool {
        self.user_from == user_id
    }

    pub fn is_recipient(&self, user_id: i32) -> bool {
        self.user_to == Some(user_id)
    }

    /// Delivered messages are the ones present in the recipient inbox
    pub fn is_delivered(&self) -> bool {
        matches!(
            self.status,
            PrivateMessageStatus::Sent | PrivateMessageStatus::DeletedFromOutbox
        )
    }

    /// A party keeps access until the message is deleted from its own mailbox.
    /// A message sent to oneself is purged by its first deletion.
    pub fn is_accessible_by(&self, user_id: i32) -> bool {
        let sender = self.is_sender(user_id);
        let recipient = self.is_recipient(user_id);
        match self.status {
            PrivateMessageStatus::Draft => sender,
            PrivateMessageStatus::Sent => sender || recipient,
            PrivateMessageStatus::DeletedFromInbox => sender && !recipient,
            PrivateMessageStatus::DeletedFromOutbox => recipient && !sender,
        }
    }

    /// Opening a delivered, unread message as its recipient marks it read
    pub fn should_mark_read(&self, user_id: i32) -> bool {
        self.is_recipient(user_id) && !self.read && self.is_delivered()
    }

    /// Transition applied when `user_id` deletes the message from the mailbox
    /// it is looking at. Callers check `is_accessible_by` first.
    pub fn deletion_for(&self, user_id: i32) -> (Mailbox, Deletion) {
        match self.status {
            PrivateMessageStatus::Draft => (Mailbox::Drafts, Deletion::Purge),
            // the recipient already dropped it, the sender is the last one holding it
            PrivateMessageStatus::DeletedFromInbox => (Mailbox::Outbox, Deletion::Purge),
            PrivateMessageStatus::DeletedFromOutbox => (Mailbox::Inbox, Deletion::Purge),
            // both copies belong to the same user
            PrivateMessageStatus::Sent if self.is_sender(user_id) && self.is_recipient(user_id) => {
                (Mailbox::Outbox, Deletion::Purge)
            }
            PrivateMessageStatus::Sent if self.is_sender(user_id) => (
                Mailbox::Outbox,
                Deletion::MarkAs(PrivateMessageStatus::DeletedFromOutbox),
            ),
            PrivateMessageStatus::Sent => (
                Mailbox::Inbox,
                Deletion::MarkAs(PrivateMessageStatus::DeletedFromInbox),
            ),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_message(
    message_id: i32,
    user_from: i32,
    user_to: Option<i32>,
    status: PrivateMessageStatus,
) -> PrivateMessage {
    PrivateMessage {
        message_id,
        user_from,
        user_to,
        title: "title".to_string(),
        body: "body".to_string(),
        creation_date: Utc::now(),
        read: false,
        status,
    }
}
