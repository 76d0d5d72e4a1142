//! Integration tests for topics, polls and banners
//!
//! - POST /topics, GET /topics/{id}
//! - GET /polls/{id}, POST /polls/{id}/votes
//! - PUT /banners

mod common;

#[cfg(test)]
mod forum_tests {
    use super::common::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_topic_routes_require_token() {
        let server = create_test_server(create_test_state());

        let body = json!({ "title": "Plans", "content": "Where?" });

        server.post("/topics").json(&body).await.assert_status_forbidden();
        server.get("/topics/1").await.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_vote_requires_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/polls/1/votes")
            .json(&json!({ "item_ids": [1, 5, 9] }))
            .await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_poll_with_expired_token_secret() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt(1, "alice", "rotated secret");

        let response = server
            .get("/polls/1")
            .add_header("Authorization", format!("Bearer {}", token))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_set_banner_requires_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .put("/banners")
            .json(&json!({ "position": "TOP", "content": "<b>hello</b>" }))
            .await;

        response.assert_status_forbidden();
    }
}
