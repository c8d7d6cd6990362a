//! CLI parser and config loading.

use anyhow::Result;
use clap::{Parser, Subcommand};
use hookbot_telegram::TelegramConfig;

#[derive(Parser, Debug)]
#[command(name = "hookbot")]
#[command(about = "Webhook Telegram bot: serve, manage webhook", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Overrides BOT_TOKEN.
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Serve the demo bot on LISTEN_ADDR; registers WEBHOOK_URL first when set.
    Serve,
    /// Register a webhook URL with Telegram.
    SetWebhook {
        #[arg(short, long)]
        url: String,
        #[arg(long)]
        drop_pending: bool,
    },
    /// Remove the webhook registration.
    DeleteWebhook {
        #[arg(long)]
        drop_pending: bool,
    },
    /// Print the current webhook status as JSON.
    WebhookInfo,
    /// Print the bot's own user record as JSON.
    Me,
}

/// Load TelegramConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TelegramConfig> {
    let config = TelegramConfig::from_env(token)?;
    config.validate()?;
    Ok(config)
}
