//! Command & content router for message updates.

use hookbot_core::{code, BotError, Message, Result};
use tracing::{debug, info};

use crate::bot::{Bot, Dispatch};
use crate::context::Context;
use crate::guard;

/// A slash command parsed from message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
}

impl CommandInvocation {
    /// Parses `/name arg1 arg2`. `Ok(None)` when the text does not start with `/`.
    ///
    /// The name is the first whitespace-delimited token without its leading `/`, cut at the next
    /// `/`. It is case-sensitive and an `@botname` suffix is kept as part of it. An empty name
    /// (`/`, `/ foo`, `//x`) is a malformed command.
    pub fn parse(text: &str) -> Result<Option<Self>> {
        if !text.starts_with('/') {
            return Ok(None);
        }
        let mut tokens = text.split_whitespace();
        let head = tokens.next().unwrap_or_default();
        let name = head
            .strip_prefix('/')
            .and_then(|rest| rest.split('/').next())
            .unwrap_or_default();
        if name.is_empty() {
            return Err(BotError::new(code::INTERNAL, "Not a valid command"));
        }
        Ok(Some(Self {
            name: name.to_string(),
            args: tokens.map(str::to_string).collect(),
        }))
    }
}

pub(crate) async fn route_message(bot: &Bot, message: Message) -> Result<Dispatch> {
    if let Some(command) = CommandInvocation::parse(message.text())? {
        return route_command(bot, message, command).await;
    }
    route_content(bot, message).await
}

async fn route_command(
    bot: &Bot,
    message: Message,
    command: CommandInvocation,
) -> Result<Dispatch> {
    debug!(
        text = %message.text(),
        command = %command.name,
        args = ?command.args,
        "Parsed command"
    );
    let Some(handler) = bot.commands().lookup(command.name.as_str()) else {
        return Err(BotError::new(
            code::NOT_FOUND,
            format!("Unknown command: {}", command.name),
        ));
    };

    info!(command = %command.name, user_id = message.user_id(), "Executing command");
    let ctx = Context::new(bot.clone(), message, command.args, None);
    guard::execute(bot.reporter(), ctx, handler.as_ref()).await?;
    Ok(Dispatch::Command(command.name))
}

async fn route_content(bot: &Bot, message: Message) -> Result<Dispatch> {
    let kinds = message.content_kinds();
    if kinds.is_empty() {
        return Err(BotError::bad_request(
            "Unsupported message type received. No handler is available for this message type.",
        ));
    }

    // A populated field without a handler falls through to the next populated field.
    let matched = kinds.iter().find_map(|kind| {
        bot.messages()
            .lookup(kind)
            .map(|handler| (*kind, handler.clone()))
    });
    let Some((kind, handler)) = matched else {
        info!(
            kinds = ?kinds,
            chat_id = message.chat.id,
            "No message handler registered for content"
        );
        return Ok(Dispatch::NoHandler);
    };

    debug!(kind = %kind, user_id = message.user_id(), "Executing message handler");
    let content = message.content_of(kind);
    let ctx = Context::new(bot.clone(), message, Vec::new(), content);
    guard::execute(bot.reporter(), ctx, handler.as_ref()).await?;
    Ok(Dispatch::Content(kind))
}
