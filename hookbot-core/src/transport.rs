//! Outbound API abstraction.
//!
//! [`ApiTransport`] is transport-agnostic ("send named operation with parameters, get raw result bytes");
//! [`Api`] layers typed operations on top of it. Production code plugs in an HTTP transport; tests
//! substitute a recording one.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{BotError, Result};
use crate::requests::{
    set_my_commands_params, AnswerCallbackQueryRequest, ChatAction, CopyMessageRequest,
    EditMessageTextRequest, ForwardMessageRequest, ParamBuilder, Params, SendMediaRequest,
    SendMessageRequest, SetWebhookRequest,
};
use crate::types::{BotCommand, InlineKeyboardMarkup, Message, User, WebhookInfo};

/// Sends one named API operation. Implementations must be safe for concurrent use.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Invokes `method` with `params`; returns the raw JSON bytes of the result on success.
    async fn invoke(&self, method: &str, params: Params) -> Result<Vec<u8>>;
}

/// Typed outbound operations over a shared [`ApiTransport`]. Cheap to clone.
#[derive(Clone)]
pub struct Api {
    transport: Arc<dyn ApiTransport>,
}

impl Api {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    /// Raw call; returns the result bytes untouched.
    pub async fn call(&self, method: &str, params: Params) -> Result<Vec<u8>> {
        debug!(method = %method, "api call");
        self.transport.invoke(method, params).await
    }

    /// Call and decode the result as `T`.
    pub async fn call_json<T: DeserializeOwned>(&self, method: &str, params: Params) -> Result<T> {
        let raw = self.call(method, params).await?;
        serde_json::from_slice(&raw).map_err(|e| {
            BotError::bad_request(format!("failed to decode {} result", method)).with_cause(e)
        })
    }

    pub async fn send_message(&self, req: &SendMessageRequest) -> Result<Message> {
        self.call_json("sendMessage", req.to_params()?).await
    }

    pub async fn forward_message(&self, req: &ForwardMessageRequest) -> Result<Message> {
        self.call_json("forwardMessage", req.to_params()?).await
    }

    /// Returns the raw `MessageId` object of the copy.
    pub async fn copy_message(&self, req: &CopyMessageRequest) -> Result<Vec<u8>> {
        self.call("copyMessage", req.to_params()?).await
    }

    pub async fn send_media(&self, req: &SendMediaRequest) -> Result<Message> {
        self.call_json(req.kind.method(), req.to_params()?).await
    }

    pub async fn send_chat_action(&self, chat_id: i64, action: ChatAction) -> Result<()> {
        let params = ParamBuilder::new()
            .required("chat_id", chat_id)?
            .required("action", action)?
            .build();
        self.call("sendChatAction", params).await.map(|_| ())
    }

    /// Edits text; the platform answers with the edited message or `true`, both are discarded.
    pub async fn edit_message_text(&self, req: &EditMessageTextRequest) -> Result<()> {
        self.call("editMessageText", req.to_params()?)
            .await
            .map(|_| ())
    }

    pub async fn edit_message_reply_markup(
        &self,
        chat_id: i64,
        message_id: i64,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<()> {
        let params = ParamBuilder::new()
            .required("chat_id", chat_id)?
            .required("message_id", message_id)?
            .optional_some("reply_markup", markup)?
            .build();
        self.call("editMessageReplyMarkup", params).await.map(|_| ())
    }

    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<()> {
        let params = ParamBuilder::new()
            .required("chat_id", chat_id)?
            .required("message_id", message_id)?
            .build();
        self.call("deleteMessage", params).await.map(|_| ())
    }

    pub async fn answer_callback_query(&self, req: &AnswerCallbackQueryRequest) -> Result<()> {
        self.call("answerCallbackQuery", req.to_params()?)
            .await
            .map(|_| ())
    }

    pub async fn set_webhook(&self, req: &SetWebhookRequest) -> Result<()> {
        self.call("setWebhook", req.to_params()?).await.map(|_| ())
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<()> {
        let params = ParamBuilder::new()
            .optional("drop_pending_updates", drop_pending_updates)?
            .build();
        self.call("deleteWebhook", params).await.map(|_| ())
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call_json("getWebhookInfo", Params::new()).await
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call_json("getMe", Params::new()).await
    }

    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<()> {
        self.call("setMyCommands", set_my_commands_params(commands)?)
            .await
            .map(|_| ())
    }

    pub async fn get_my_commands(&self) -> Result<Vec<BotCommand>> {
        self.call_json("getMyCommands", Params::new()).await
    }

    pub async fn delete_my_commands(&self) -> Result<()> {
        self.call("deleteMyCommands", Params::new()).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::code;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every call and answers with a fixed result.
    struct StubTransport {
        calls: Mutex<Vec<(String, Params)>>,
        reply: fn() -> Result<Vec<u8>>,
    }

    impl StubTransport {
        fn new(reply: fn() -> Result<Vec<u8>>) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }

        fn calls(&self) -> Vec<(String, Params)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiTransport for StubTransport {
        async fn invoke(&self, method: &str, params: Params) -> Result<Vec<u8>> {
            self.calls.lock().unwrap().push((method.to_string(), params));
            (self.reply)()
        }
    }

    #[tokio::test]
    async fn test_send_message_decodes_result() {
        let stub = StubTransport::new(|| {
            Ok(br#"{"message_id": 77, "chat": {"id": 10, "type": "private"}, "text": "hello"}"#
                .to_vec())
        });
        let api = Api::new(stub.clone());

        let sent = api
            .send_message(&SendMessageRequest::new(10, "hello"))
            .await
            .unwrap();
        assert_eq!(sent.message_id, 77);
        assert_eq!(sent.text(), "hello");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "sendMessage");
        assert_eq!(
            serde_json::Value::Object(calls[0].1.clone()),
            json!({"chat_id": 10, "text": "hello"})
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_returned_unchanged() {
        let stub = StubTransport::new(|| {
            Err(BotError::new(
                code::FORBIDDEN,
                "Forbidden: bot was blocked by the user",
            ))
        });
        let err = Api::new(stub).delete_message(1, 2).await.unwrap_err();
        assert!(err.is_forbidden());
    }

    #[tokio::test]
    async fn test_undecodable_result_is_bad_request() {
        let stub = StubTransport::new(|| Ok(b"true".to_vec()));
        let err = Api::new(stub).get_me().await.unwrap_err();
        assert_eq!(err.code, code::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_webhook_omits_false_flag() {
        let stub = StubTransport::new(|| Ok(b"true".to_vec()));
        Api::new(stub.clone()).delete_webhook(false).await.unwrap();
        let calls = stub.calls();
        assert_eq!(calls[0].0, "deleteWebhook");
        assert!(calls[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_set_my_commands_sends_array() {
        let stub = StubTransport::new(|| Ok(b"true".to_vec()));
        let commands = vec![BotCommand::new("start", "Start the bot")];
        Api::new(stub.clone())
            .set_my_commands(&commands)
            .await
            .unwrap();
        let calls = stub.calls();
        assert_eq!(calls[0].0, "setMyCommands");
        assert_eq!(
            calls[0].1["commands"],
            json!([{"command": "start", "description": "Start the bot"}])
        );
    }

    #[tokio::test]
    async fn test_send_media_picks_method_from_kind() {
        let stub = StubTransport::new(|| {
            Ok(br#"{"message_id": 1, "chat": {"id": 4, "type": "group"}}"#.to_vec())
        });
        let req = SendMediaRequest::new(crate::requests::MediaKind::Photo, 4, "AgACAg")
            .caption("look");
        Api::new(stub.clone()).send_media(&req).await.unwrap();
        let calls = stub.calls();
        assert_eq!(calls[0].0, "sendPhoto");
        assert_eq!(calls[0].1["photo"], json!("AgACAg"));
        assert_eq!(calls[0].1["caption"], json!("look"));
    }
}
