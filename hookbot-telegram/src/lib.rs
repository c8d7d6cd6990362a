//! # hookbot-telegram
//!
//! Telegram connectivity for a [`hookbot_dispatch::Bot`]: [`HttpTransport`] (the Bot API over
//! `reqwest`), [`TelegramConfig`] loaded from the environment, the axum webhook endpoint and the
//! [`serve`] runner. No dispatch logic lives here.

mod config;
mod http_transport;
mod runner;
mod webhook;

pub use config::{TelegramConfig, DEFAULT_API_URL, DEFAULT_LISTEN_ADDR, DEFAULT_WEBHOOK_PATH};
pub use http_transport::HttpTransport;
pub use runner::{build_api, register_webhook, serve};
pub use webhook::webhook_router;
