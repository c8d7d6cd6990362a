//! Error record shared by dispatch and transport.
//!
//! [`BotError`] carries a numeric code so handler code can branch on a platform failure
//! (e.g. 403 "bot was blocked by the user") without caring where it originated.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Numeric classification codes used by [`BotError`]. Platform errors reuse the platform's own code.
pub mod code {
    pub const BAD_REQUEST: u16 = 400;
    pub const FORBIDDEN: u16 = 403;
    pub const NOT_FOUND: u16 = 404;
    pub const TOO_MANY_REQUESTS: u16 = 429;
    pub const INTERNAL: u16 = 500;
}

/// Error record: numeric code, human-readable message, optional lower-level cause.
#[derive(Error)]
#[error("{message} (code {code})")]
pub struct BotError {
    pub code: u16,
    pub message: String,
    /// Seconds to wait before retrying, when the platform supplied one with a 429.
    pub retry_after: Option<u64>,
    #[source]
    cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl BotError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retry_after: None,
            cause: None,
        }
    }

    /// Attaches the lower-level error that caused this one.
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_retry_after(mut self, secs: u64) -> Self {
        self.retry_after = Some(secs);
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(code::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(code::INTERNAL, message)
    }

    /// True if this error carries the given numeric code.
    pub fn is_api_error(&self, code: u16) -> bool {
        self.code == code
    }

    /// Platform refused the call because the user blocked the bot.
    pub fn is_forbidden(&self) -> bool {
        self.is_api_error(code::FORBIDDEN)
    }

    pub fn is_rate_limited(&self) -> bool {
        self.is_api_error(code::TOO_MANY_REQUESTS)
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }
}

impl fmt::Debug for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("BotError");
        s.field("code", &self.code).field("message", &self.message);
        if let Some(secs) = self.retry_after {
            s.field("retry_after", &secs);
        }
        if let Some(cause) = &self.cause {
            s.field("cause", &cause.to_string());
        }
        s.finish()
    }
}

impl From<serde_json::Error> for BotError {
    fn from(e: serde_json::Error) -> Self {
        BotError::bad_request("failed to encode or decode JSON").with_cause(e)
    }
}

impl From<std::io::Error> for BotError {
    fn from(e: std::io::Error) -> Self {
        BotError::internal("IO error").with_cause(e)
    }
}

/// Result type for core operations; uses [`BotError`].
pub type Result<T> = std::result::Result<T, BotError>;
