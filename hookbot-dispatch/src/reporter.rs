//! Fallback reporters: notify the end user when a handler fails with a generic error.

use async_trait::async_trait;
use hookbot_core::{BotError, SendMessageRequest};
use tracing::{error, warn};

use crate::context::ReportTarget;

pub const DEFAULT_APOLOGY: &str = "Sorry, something went wrong. Please try again later.";

/// Invoked by the execution guard with the failed dispatch's context and error.
///
/// Reporting is best-effort: implementations swallow their own failures.
#[async_trait]
pub trait ErrorReporter: Send + Sync {
    async fn report(&self, target: &dyn ReportTarget, err: &BotError);
}

/// Default reporter: logs the error and sends a fixed apology to the originating chat.
#[derive(Debug, Clone)]
pub struct ApologyReporter {
    text: String,
}

impl ApologyReporter {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for ApologyReporter {
    fn default() -> Self {
        Self::new(DEFAULT_APOLOGY)
    }
}

#[async_trait]
impl ErrorReporter for ApologyReporter {
    async fn report(&self, target: &dyn ReportTarget, err: &BotError) {
        error!(
            user_id = target.report_user_id(),
            chat_id = ?target.report_chat_id(),
            error = %err,
            "Bot error"
        );
        let Some(chat_id) = target.report_chat_id() else {
            return;
        };
        let req = SendMessageRequest::new(chat_id, self.text.clone());
        if let Err(e) = target.api().send_message(&req).await {
            warn!(chat_id = chat_id, error = %e, "Failed to send fallback message");
        }
    }
}
