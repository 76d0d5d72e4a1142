//! Private message service - mailboxes, drafts, sending, reading and deletion

use super::cache::UserDataCache;
use super::error::{ServiceError, ServiceResult};
use super::mail::MailService;
use crate::dtos::{CreatePrivateMessageDTO, DraftDTO, SendMessageDTO};
use crate::entities::{Deletion, Mailbox, PrivateMessage, PrivateMessageStatus, User};
use crate::repositories::{Create, Delete, PrivateMessageStore, Read, Update, UserStore};
use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

pub struct PrivateMessageService<'a, P, U> {
    messages: &'a P,
    users: &'a U,
    cache: &'a UserDataCache,
    mail: &'a MailService,
}

impl<'a, P: PrivateMessageStore, U: UserStore> PrivateMessageService<'a, P, U> {
    pub fn new(messages: &'a P, users: &'a U, cache: &'a UserDataCache, mail: &'a MailService) -> Self {
        Self {
            messages,
            users,
            cache,
            mail,
        }
    }

    pub async fn inbox(&self, user: &User) -> ServiceResult<Vec<PrivateMessage>> {
        Ok(self.messages.find_inbox(user.user_id).await?)
    }

    pub async fn outbox(&self, user: &User) -> ServiceResult<Vec<PrivateMessage>> {
        Ok(self.messages.find_outbox(user.user_id).await?)
    }

    pub async fn drafts(&self, user: &User) -> ServiceResult<Vec<PrivateMessage>> {
        Ok(self.messages.find_drafts(user.user_id).await?)
    }

    async fn recipient(&self, username: &str) -> ServiceResult<User> {
        self.users
            .find_by_username(username.trim())
            .await?
            .ok_or(ServiceError::NotFound("Recipient"))
    }

    /// Counts the new message for the recipient and tells them by mail
    fn notify_recipient(&self, recipient: &User, message: &PrivateMessage) {
        self.cache.increment_new_pm_count(recipient.user_id);
        if let Err(e) = self
            .mail
            .send_received_private_message_notification(recipient, message.message_id)
        {
            warn!("Notification mail not sent: {}", e);
        }
    }

    #[instrument(skip(self, sender, dto), fields(user_id = sender.user_id, recipient = %dto.recipient))]
    pub async fn send_message(&self, sender: &User, dto: SendMessageDTO) -> ServiceResult<PrivateMessage> {
        dto.validate()?;
        let recipient = self.recipient(&dto.recipient).await?;

        let message = self
            .messages
            .create(&CreatePrivateMessageDTO {
                user_from: sender.user_id,
                user_to: Some(recipient.user_id),
                title: dto.title,
                body: dto.body,
                creation_date: Utc::now(),
                status: PrivateMessageStatus::Sent,
            })
            .await?;
        info!(message_id = message.message_id, "Private message sent");

        self.notify_recipient(&recipient, &message);
        Ok(message)
    }

    /// Loads a draft of `user`, failing for missing messages and for messages
    /// that are not their draft
    async fn own_draft(&self, user: &User, message_id: i32) -> ServiceResult<PrivateMessage> {
        let message = self
            .messages
            .read(&message_id)
            .await?
            .ok_or(ServiceError::NotFound("Private message"))?;
        if message.status != PrivateMessageStatus::Draft || !message.is_sender(user.user_id) {
            warn!(message_id, "Not a draft of the current user");
            return Err(ServiceError::Forbidden("Not a draft of the current user"));
        }
        Ok(message)
    }

    /// Creates a draft, or overwrites the draft named by `message_id`
    #[instrument(skip(self, sender, dto), fields(user_id = sender.user_id, message_id = ?dto.message_id))]
    pub async fn save_draft(&self, sender: &User, dto: DraftDTO) -> ServiceResult<PrivateMessage> {
        dto.validate()?;
        let user_to = match dto.recipient.as_deref().map(str::trim) {
            Some(username) if !username.is_empty() => Some(self.recipient(username).await?.user_id),
            _ => None,
        };

        let draft = match dto.message_id {
            Some(message_id) => {
                let mut draft = self.own_draft(sender, message_id).await?;
                draft.user_to = user_to;
                draft.title = dto.title;
                draft.body = dto.body;
                draft.creation_date = Utc::now();
                self.messages.update(&message_id, &draft).await?
            }
            None => {
                self.messages
                    .create(&CreatePrivateMessageDTO {
                        user_from: sender.user_id,
                        user_to,
                        title: dto.title,
                        body: dto.body,
                        creation_date: Utc::now(),
                        status: PrivateMessageStatus::Draft,
                    })
                    .await?
            }
        };
        debug!(message_id = draft.message_id, "Draft saved");
        Ok(draft)
    }

    /// Sends a saved draft with the final content of the message form
    #[instrument(skip(self, sender, dto), fields(user_id = sender.user_id))]
    pub async fn send_draft(
        &self,
        sender: &User,
        message_id: i32,
        dto: SendMessageDTO,
    ) -> ServiceResult<PrivateMessage> {
        dto.validate()?;
        let mut message = self.own_draft(sender, message_id).await?;
        let recipient = self.recipient(&dto.recipient).await?;

        message.user_to = Some(recipient.user_id);
        message.title = dto.title;
        message.body = dto.body;
        message.creation_date = Utc::now();
        message.read = false;
        message.status = PrivateMessageStatus::Sent;
        let message = self.messages.update(&message_id, &message).await?;
        info!("Draft sent");

        self.notify_recipient(&recipient, &message);
        Ok(message)
    }

    /// Unread messages of the user, zero for anonymous visitors
    pub async fn current_user_new_pm_count(&self, user: Option<&User>) -> ServiceResult<i64> {
        let Some(user) = user else {
            return Ok(0);
        };
        if let Some(count) = self.cache.new_pm_count(user.user_id) {
            return Ok(count);
        }
        let count = self.messages.count_unread_for(user.user_id).await?;
        self.cache.put_new_pm_count(user.user_id, count);
        Ok(count)
    }

    /// Returns the message, marking it read when its recipient opens it
    #[instrument(skip(self, user), fields(user_id = user.user_id))]
    pub async fn get(&self, user: &User, message_id: i32) -> ServiceResult<PrivateMessage> {
        let mut message = self
            .messages
            .read(&message_id)
            .await?
            .ok_or(ServiceError::NotFound("Private message"))?;
        if !message.is_accessible_by(user.user_id) {
            warn!("Access to private message denied");
            return Err(ServiceError::Forbidden("No access to this private message"));
        }

        if message.should_mark_read(user.user_id) {
            message.read = true;
            message = self.messages.update(&message_id, &message).await?;
            self.cache.decrement_new_pm_count(user.user_id);
            debug!("Private message marked as read");
        }
        Ok(message)
    }

    /// Deletes every listed message from the mailbox of `user` it is in.
    /// Missing or inaccessible ids are skipped. Returns the mailbox of the
    /// last deleted message.
    #[instrument(skip(self, user), fields(user_id = user.user_id))]
    pub async fn delete(&self, user: &User, ids: &[i32]) -> ServiceResult<Option<Mailbox>> {
        let mut last_mailbox = None;
        for id in ids {
            let Some(mut message) = self.messages.read(id).await? else {
                debug!(message_id = id, "Skipping missing private message");
                continue;
            };
            if !message.is_accessible_by(user.user_id) {
                debug!(message_id = id, "Skipping inaccessible private message");
                continue;
            }

            if message.should_mark_read(user.user_id) {
                self.cache.decrement_new_pm_count(user.user_id);
            }
            let (mailbox, deletion) = message.deletion_for(user.user_id);
            match deletion {
                Deletion::Purge => self.messages.delete(id).await?,
                Deletion::MarkAs(status) => {
                    message.status = status;
                    self.messages.update(id, &message).await?;
                }
            }
            last_mailbox = Some(mailbox);
        }
        info!(mailbox = ?last_mailbox, "Private messages deleted");
        Ok(last_mailbox)
    }

    pub async fn has_access(&self, user: &User, message_id: i32) -> ServiceResult<bool> {
        let message = self.messages.read(&message_id).await?;
        Ok(message.is_some_and(|message| message.is_accessible_by(user.user_id)))
    }
}
