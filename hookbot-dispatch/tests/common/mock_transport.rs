//! Recording [`ApiTransport`] for dispatch tests.
//!
//! Records every `(method, params)` call so tests can assert on what handlers sent without a
//! network. Methods can be set to fail with a given error code.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use hookbot_core::{ApiTransport, BotError, Params, Result};
use serde_json::{json, Value};

/// One recorded call.
#[derive(Debug, Clone)]
pub struct CallRecord {
    pub method: String,
    pub params: Params,
}

impl CallRecord {
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<CallRecord>>,
    failures: Mutex<HashMap<String, (u16, String)>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every later call of `method` fails with `code`.
    pub fn fail_method(&self, method: &str, code: u16, description: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(method.to_string(), (code, description.to_string()));
    }

    pub fn calls(&self) -> Vec<CallRecord> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<CallRecord> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method)
            .collect()
    }

    /// Texts of all `sendMessage` calls, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls_to("sendMessage")
            .iter()
            .filter_map(|c| c.param("text").and_then(Value::as_str).map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl ApiTransport for MockTransport {
    async fn invoke(&self, method: &str, params: Params) -> Result<Vec<u8>> {
        let chat_id = params.get("chat_id").cloned().unwrap_or(json!(0));
        let text = params.get("text").cloned().unwrap_or(Value::Null);
        self.calls.lock().unwrap().push(CallRecord {
            method: method.to_string(),
            params,
        });

        if let Some((code, description)) = self.failures.lock().unwrap().get(method) {
            return Err(BotError::new(*code, description.clone()));
        }

        let result = match method {
            "sendMessage" => json!({
                "message_id": 1000,
                "chat": {"id": chat_id, "type": "private"},
                "text": text
            }),
            _ => json!(true),
        };
        Ok(serde_json::to_vec(&result)?)
    }
}
