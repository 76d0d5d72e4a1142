//! Entities module - domain entities
//!
//! Every entity maps one table of the database.

pub mod banner;
pub mod enums;
pub mod poll;
pub mod private_message;
pub mod topic;
pub mod user;

// Re-exports
pub use banner::Banner;
pub use enums::{BannerPosition, Mailbox, PrivateMessageStatus};
pub use poll::{Poll, PollItem};
pub use private_message::{Deletion, PrivateMessage};
pub use topic::Topic;
pub use user::User;
