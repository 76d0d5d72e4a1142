//! Handlers module - HTTP endpoints
//!
//! Every handler extracts the request, calls the service built from
//! `AppState` and converts the result into a DTO response.

pub mod auth;
pub mod banner;
pub mod private_message;
pub mod topic;
pub mod user;

// Re-exports
pub use auth::{activate_account, login_user, register_user, restore_password};
pub use banner::{list_banners, set_banner};
pub use private_message::{
    delete_messages, get_message, list_drafts, list_inbox, list_outbox, new_messages_count,
    save_draft, send_draft, send_message,
};
pub use topic::{create_topic, get_poll, get_topic, vote};
pub use user::{edit_my_profile, get_my_profile, get_user_by_username, search_usernames};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
