//! Integration tests for the private message endpoints
//!
//! Every route of `/pm` requires a valid bearer token; the tests check the
//! rejections of the authentication middleware.

mod common;

#[cfg(test)]
mod private_message_tests {
    use super::common::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mailboxes_require_token() {
        let server = create_test_server(create_test_state());

        for path in ["/pm/inbox", "/pm/outbox", "/pm/drafts", "/pm/new_count", "/pm/1"] {
            let response = server.get(path).await;
            response.assert_status_forbidden();
        }
    }

    #[tokio::test]
    async fn test_send_requires_token() {
        let server = create_test_server(create_test_state());

        let body = json!({ "recipient": "bob", "title": "Hi", "body": "Hello Bob" });

        server.post("/pm").json(&body).await.assert_status_forbidden();
        server
            .post("/pm/drafts/3/send")
            .json(&body)
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_delete_with_invalid_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .delete("/pm")
            .add_header("Authorization", "Bearer invalid")
            .json(&json!({ "ids": [1, 2] }))
            .await;

        response.assert_status_unauthorized();
        let error: serde_json::Value = response.json();
        assert_eq!(error["error"], "Unable to decode token");
    }
}
