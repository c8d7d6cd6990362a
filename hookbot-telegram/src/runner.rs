use std::sync::Arc;

use anyhow::Result;
use hookbot_core::{Api, SetWebhookRequest};
use hookbot_dispatch::Bot;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use crate::config::TelegramConfig;
use crate::http_transport::HttpTransport;
use crate::webhook::webhook_router;

/// [`Api`] over an [`HttpTransport`] built from `config`.
pub fn build_api(config: &TelegramConfig) -> Result<Api> {
    Ok(Api::new(Arc::new(HttpTransport::new(config)?)))
}

/// Registers `url` as the bot's webhook.
pub async fn register_webhook(api: &Api, url: &str, drop_pending_updates: bool) -> Result<()> {
    let req = SetWebhookRequest {
        drop_pending_updates,
        ..SetWebhookRequest::new(url)
    };
    api.set_webhook(&req).await?;
    info!(url = %url, "Webhook registered");
    Ok(())
}

/// Main entry: validate config, register the webhook if configured, then serve updates until Ctrl+C.
#[instrument(
    skip(config, bot),
    fields(listen_addr = %config.listen_addr, path = %config.webhook_path)
)]
pub async fn serve(config: &TelegramConfig, bot: Bot) -> Result<()> {
    config.validate()?;

    if let Some(ref url) = config.webhook_url {
        register_webhook(bot.api(), url, false).await?;
    }

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    info!(addr = %listener.local_addr()?, "Webhook server listening");

    axum::serve(listener, webhook_router(bot, &config.webhook_path))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Webhook server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
