//! [`HttpTransport`] against a mockito Bot API server.

use std::sync::Arc;

use hookbot_core::{code, Api, SendMessageRequest};
use hookbot_telegram::{HttpTransport, TelegramConfig};
use mockito::Matcher;
use serde_json::json;

const TEST_BOT_TOKEN: &str = "123456:TEST";

fn api_for(server: &mockito::ServerGuard) -> Api {
    let mut config = TelegramConfig::with_token(TEST_BOT_TOKEN);
    config.api_url = server.url();
    config.request_timeout_secs = 5;
    Api::new(Arc::new(HttpTransport::new(&config).unwrap()))
}

fn path(method: &str) -> String {
    format!("/bot{}/{}", TEST_BOT_TOKEN, method)
}

#[tokio::test]
async fn test_send_message_posts_json_and_decodes_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", path("sendMessage").as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"chat_id": 123, "text": "hi"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 1706529600,
                "chat": {"id": 123, "type": "private"},
                "text": "hi"
            }
        }"#,
        )
        .create_async()
        .await;

    let sent = api_for(&server)
        .send_message(&SendMessageRequest::new(123, "hi"))
        .await
        .unwrap();

    assert_eq!(sent.message_id, 1);
    assert_eq!(sent.chat.id, 123);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_error_maps_code_and_description() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("sendMessage").as_str())
        .with_status(403)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok": false, "error_code": 403, "description": "Forbidden: bot was blocked by the user"}"#)
        .create_async()
        .await;

    let err = api_for(&server)
        .send_message(&SendMessageRequest::new(1, "x"))
        .await
        .unwrap_err();

    assert!(err.is_forbidden());
    assert_eq!(err.message, "Forbidden: bot was blocked by the user");
}

#[tokio::test]
async fn test_rate_limit_carries_retry_after() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("answerCallbackQuery").as_str())
        .with_status(429)
        .with_body(
            r#"{"ok": false, "error_code": 429, "description": "Too Many Requests: retry after 7", "parameters": {"retry_after": 7}}"#,
        )
        .create_async()
        .await;

    let req = hookbot_core::AnswerCallbackQueryRequest::new("q1");
    let err = api_for(&server)
        .answer_callback_query(&req)
        .await
        .unwrap_err();

    assert_eq!(err.code, code::TOO_MANY_REQUESTS);
    assert_eq!(err.retry_after, Some(7));
}

#[tokio::test]
async fn test_non_json_error_body_uses_http_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", path("getMe").as_str())
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = api_for(&server).get_me().await.unwrap_err();
    assert_eq!(err.code, 502);
}

#[tokio::test]
async fn test_boolean_result_passes_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", path("deleteWebhook").as_str())
        .match_body(Matcher::Json(json!({"drop_pending_updates": true})))
        .with_status(200)
        .with_body(r#"{"ok": true, "result": true, "description": "Webhook was deleted"}"#)
        .create_async()
        .await;

    api_for(&server).delete_webhook(true).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_internal_error() {
    let mut config = TelegramConfig::with_token(TEST_BOT_TOKEN);
    config.api_url = "http://127.0.0.1:1".to_string();
    config.request_timeout_secs = 2;
    let api = Api::new(Arc::new(HttpTransport::new(&config).unwrap()));

    let err = api.get_me().await.unwrap_err();
    assert_eq!(err.code, code::INTERNAL);
    assert!(!err.to_string().contains(TEST_BOT_TOKEN));
}
