//! Forum server library - exposes the main modules for the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod handlers;
pub mod repositories;
pub mod services;
pub mod validation;

// Re-exports
pub use core::{AppError, AppState, auth, config};
pub use handlers::root;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Builds the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes())
        .nest("/users", configure_user_routes(state.clone()))
        .nest("/pm", configure_private_message_routes(state.clone()))
        .merge(configure_forum_routes(state.clone()))
        .merge(configure_banner_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Public routes: registration, activation, login, password recovery
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use handlers::*;
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/activate/{uuid}", post(activate_account))
        .route("/restore_password", post(restore_password))
}

fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use handlers::*;

    Router::new()
        .route("/", get(search_usernames))
        .route("/me", get(get_my_profile).patch(edit_my_profile))
        .route("/{username}", get(get_user_by_username))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

fn configure_private_message_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use handlers::*;

    Router::new()
        .route("/", post(send_message).delete(delete_messages))
        .route("/inbox", get(list_inbox))
        .route("/outbox", get(list_outbox))
        .route("/drafts", get(list_drafts).post(save_draft))
        .route("/drafts/{message_id}/send", post(send_draft))
        .route("/new_count", get(new_messages_count))
        .route("/{message_id}", get(get_message))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Topics and their polls
fn configure_forum_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use handlers::*;

    Router::new()
        .route("/topics", post(create_topic))
        .route("/topics/{topic_id}", get(get_topic))
        .route("/polls/{poll_id}", get(get_poll))
        .route("/polls/{poll_id}/votes", post(vote))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Banners are public to read; changing them needs an authenticated administrator
fn configure_banner_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use handlers::*;

    Router::new().route(
        "/banners",
        get(list_banners).merge(put(set_banner).layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))),
    )
}
