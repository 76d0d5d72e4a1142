//! Integration tests for the user endpoints
//!
//! - GET /users?search=prefix
//! - GET /users/{username}
//! - GET, PATCH /users/me

mod common;

#[cfg(test)]
mod user_tests {
    use super::common::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_without_token() {
        let server = create_test_server(create_test_state());

        let response = server.get("/users").add_query_param("search", "al").await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_profile_with_garbage_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .get("/users/me")
            .add_header("Authorization", "Bearer not.a.token")
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_profile_with_foreign_token() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt(1, "alice", "some other secret");

        let response = server
            .get("/users/alice")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_profile_with_non_bearer_scheme() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt(1, "alice", TEST_JWT_SECRET);

        let response = server
            .get("/users/me")
            .add_header("Authorization", format!("Basic {}", token))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_edit_profile_without_token() {
        let server = create_test_server(create_test_state());

        let body = json!({ "email": "alice@example.com", "language": "en", "page_size": 50 });

        let response = server.patch("/users/me").json(&body).await;

        response.assert_status_forbidden();
    }
}
