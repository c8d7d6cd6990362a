#![allow(dead_code)]

pub mod mock_transport;

use hookbot_core::{Api, Update};
use serde_json::{json, Value};
use std::sync::Arc;

use mock_transport::MockTransport;

pub const CHAT_ID: i64 = 456;
pub const USER_ID: i64 = 123;

/// Api backed by a fresh [`MockTransport`]; the transport is returned for assertions.
pub fn mock_api() -> (Api, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    (Api::new(transport.clone()), transport)
}

/// Message update from the test user in the test chat; `fields` is merged into the message.
pub fn message_update(fields: Value) -> Update {
    let mut message = json!({
        "message_id": 42,
        "from": {"id": USER_ID, "is_bot": false, "first_name": "Test", "username": "test_user"},
        "chat": {"id": CHAT_ID, "type": "private"},
        "date": 1700000000
    });
    if let (Some(target), Value::Object(extra)) = (message.as_object_mut(), fields) {
        target.extend(extra);
    }
    serde_json::from_value(json!({"update_id": 1, "message": message})).unwrap()
}

pub fn text_update(text: &str) -> Update {
    message_update(json!({ "text": text }))
}

/// Callback query update for a button attached to message 7 in the test chat.
pub fn callback_update(data: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 2,
        "callback_query": {
            "id": "cbq-1",
            "from": {"id": USER_ID, "first_name": "Test"},
            "message": {
                "message_id": 7,
                "chat": {"id": CHAT_ID, "type": "private"},
                "text": "menu"
            },
            "data": data
        }
    }))
    .unwrap()
}

/// Callback query from an inline-mode message: no originating chat message.
pub fn inline_callback_update(data: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 3,
        "callback_query": {
            "id": "cbq-inline",
            "from": {"id": USER_ID, "first_name": "Test"},
            "inline_message_id": "inline-1",
            "data": data
        }
    }))
    .unwrap()
}
