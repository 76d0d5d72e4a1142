//! Services module - the forum business rules
//!
//! Services are written against the store traits of `repositories` and are
//! built per request from `AppState` with the MySQL repositories.

pub mod banner;
pub mod cache;
pub mod error;
pub mod mail;
pub mod poll;
pub mod private_message;
pub mod topic;
pub mod user;

pub use banner::BannerService;
pub use cache::UserDataCache;
pub use error::{ServiceError, ServiceResult};
pub use mail::{LogTransport, Mail, MailService, MailTransport, TransportError};
pub use poll::PollService;
pub use private_message::PrivateMessageService;
pub use topic::TopicService;
pub use user::UserService;
