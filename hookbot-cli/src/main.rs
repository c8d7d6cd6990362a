//! hookbot CLI: serve the demo bot over a webhook, manage the webhook registration.

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use hookbot_cli::{build_demo_bot, demo_commands, load_config, Cli, Commands};
use hookbot_core::init_tracing;
use hookbot_telegram::{build_api, register_webhook, serve};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(cli.token)?;
    init_tracing(config.log_file.as_deref())?;
    let api = build_api(&config)?;

    match cli.command {
        Commands::Serve => {
            if let Err(e) = api.set_my_commands(&demo_commands()).await {
                warn!(error = %e, "Failed to publish command list");
            }
            info!(
                start_time = %Local::now().format("%Y-%m-%d %H:%M:%S"),
                listen_addr = %config.listen_addr,
                "hookbot started"
            );
            serve(&config, build_demo_bot(api)).await
        }
        Commands::SetWebhook { url, drop_pending } => {
            register_webhook(&api, &url, drop_pending).await?;
            println!("Webhook set to {}", url);
            Ok(())
        }
        Commands::DeleteWebhook { drop_pending } => {
            api.delete_webhook(drop_pending).await?;
            println!("Webhook deleted");
            Ok(())
        }
        Commands::WebhookInfo => {
            let info = api.get_webhook_info().await?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            Ok(())
        }
        Commands::Me => {
            let me = api.get_me().await?;
            println!("{}", serde_json::to_string_pretty(&me)?);
            Ok(())
        }
    }
}
