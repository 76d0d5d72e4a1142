//! Mail service - composes the forum mails and hands them to a transport

use super::error::{ServiceError, ServiceResult};
use crate::entities::User;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Delivery backend of the composed mails
pub trait MailTransport: Send + Sync {
    fn deliver(&self, mail: &Mail) -> Result<(), TransportError>;
}

/// Writes every mail to the log instead of sending it
pub struct LogTransport;

impl MailTransport for LogTransport {
    fn deliver(&self, mail: &Mail) -> Result<(), TransportError> {
        info!(to = %mail.to, subject = %mail.subject, "Mail delivered to log:\n{}", mail.body);
        Ok(())
    }
}

#[derive(Clone)]
pub struct MailService {
    transport: Arc<dyn MailTransport>,
    from: String,
    base_url: String,
}

impl MailService {
    pub fn new(transport: Arc<dyn MailTransport>, from: String, base_url: String) -> Self {
        Self {
            transport,
            from,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn send(&self, to: &str, subject: &str, body: String) -> ServiceResult<()> {
        let mail = Mail {
            from: self.from.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body,
        };
        self.transport.deliver(&mail).map_err(|e| {
            error!("Failed to deliver mail to {}: {}", mail.to, e);
            ServiceError::MailingFailed(e.0)
        })
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    pub fn send_account_activation_mail(&self, user: &User) -> ServiceResult<()> {
        let body = format!(
            "Dear {},\n\nTo activate your account follow the link below within 24 hours:\n\
             {}/auth/activate/{}\n",
            user.username, self.base_url, user.activation_uuid
        );
        self.send(&user.email, "Account activation", body)
    }

    #[instrument(skip(self, user, new_password), fields(username = %user.username))]
    pub fn send_password_recovery_mail(&self, user: &User, new_password: &str) -> ServiceResult<()> {
        let body = format!(
            "Dear {},\n\nYour new password is: {}\n\
             You can change it in your profile after signing in at {}\n",
            user.username, new_password, self.base_url
        );
        self.send(&user.email, "Password recovery", body)
    }

    #[instrument(skip(self, recipient), fields(username = %recipient.username))]
    pub fn send_received_private_message_notification(
        &self,
        recipient: &User,
        message_id: i32,
    ) -> ServiceResult<()> {
        let body = format!(
            "Dear {},\n\nYou have received a new private message:\n{}/pm/{}\n",
            recipient.username, self.base_url, message_id
        );
        self.send(&recipient.email, "New private message", body)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::entities::user::sample_user;

    #[test]
    fn test_activation_mail_links_the_activation_key() {
        let transport = Arc::new(RecordingTransport::default());
        let service = mail_service(transport.clone());
        let mut user = sample_user(1, "alice");
        user.activation_uuid = "3f2a".to_string();

        service.send_account_activation_mail(&user).unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "alice@example.com");
        assert_eq!(sent[0].from, "noreply@forum.test");
        assert!(sent[0].body.contains("http://forum.test/auth/activate/3f2a"));
    }

    #[test]
    fn test_failed_delivery_is_mailing_failed() {
        let service = mail_service(Arc::new(RecordingTransport::failing()));
        let user = sample_user(1, "alice");

        let result = service.send_password_recovery_mail(&user, "abc123");

        assert!(matches!(result, Err(ServiceError::MailingFailed(_))));
    }
}
