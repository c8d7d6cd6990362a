//! Demo bot: one handler of each kind, wired through the public builder API.

use hookbot_core::{
    Api, BotCommand, CallbackAnswerOptions, ChatAction, ContentKind, EditMessageOptions,
    InlineKeyboardButton, ParseMode,
};
use hookbot_dispatch::Bot;
use tracing::info;

pub fn demo_commands() -> Vec<BotCommand> {
    vec![
        BotCommand::new("start", "Show the menu"),
        BotCommand::new("echo", "Repeat the given words"),
    ]
}

pub fn build_demo_bot(api: Api) -> Bot {
    Bot::builder(api)
        .on_command("start", |ctx| async move {
            let name = match ctx.username() {
                "" => "there".to_string(),
                username => format!("@{}", username),
            };
            ctx.reply_with_keyboard(
                format!("Hi {}! Pick an option:", name),
                vec![vec![
                    InlineKeyboardButton::callback("Help", "menu:help"),
                    InlineKeyboardButton::callback("About", "menu:about"),
                ]],
            )
            .await?;
            Ok(())
        })
        .on_command("echo", |ctx| async move {
            if ctx.args().is_empty() {
                ctx.reply_to("Usage: /echo <text>").await?;
            } else {
                ctx.reply(ctx.args().join(" ")).await?;
            }
            Ok(())
        })
        .on_message(ContentKind::Text, |ctx| async move {
            info!(
                user_id = ctx.user_id(),
                chat_id = ctx.chat_id(),
                message_content = %ctx.text(),
                "Echoing message"
            );
            ctx.reply(format!("Echo: {}", ctx.text())).await?;
            Ok(())
        })
        .on_message(ContentKind::Photo, |ctx| async move {
            ctx.send_chat_action(ChatAction::Typing).await?;
            let size = ctx
                .photo()
                .and_then(|sizes| sizes.last())
                .map(|p| format!("{}x{}", p.width, p.height))
                .unwrap_or_default();
            ctx.reply_to(format!("Nice photo ({})", size)).await?;
            Ok(())
        })
        .on_callback("menu:", |ctx| async move {
            let text = match ctx.data() {
                "menu:help" => "<b>Commands</b>\n/start: menu\n/echo text: repeat text",
                "menu:about" => "<b>hookbot</b> demo: webhook dispatch in Rust",
                _ => "Unknown option",
            };
            ctx.answer(CallbackAnswerOptions::default()).await?;
            ctx.edit_message(
                text,
                EditMessageOptions {
                    parse_mode: Some(ParseMode::Html),
                    ..Default::default()
                },
            )
            .await?;
            Ok(())
        })
        .build()
}
