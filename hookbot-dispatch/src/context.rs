//! Per-dispatch contexts: the triggering event plus thin façades over [`Api`].
//!
//! A context is created for a single dispatch and owned by the handler it is passed to. Every
//! façade is one API call; errors are returned to the handler untouched.

use hookbot_core::{
    Animation, AnswerCallbackQueryRequest, Api, Audio, BotError, CallbackAnswerOptions,
    CallbackQuery, ChatAction, Content, Document, EditMessageOptions, EditMessageTextRequest,
    InlineKeyboardButton, InlineKeyboardMarkup, Message, PhotoSize, Result, SendMessageRequest,
    Sticker, Video, VideoNote, Voice,
};

use crate::bot::Bot;

/// What the fallback reporter needs to know about the dispatch that failed.
pub trait ReportTarget: Send + Sync {
    fn api(&self) -> &Api;
    /// Chat to notify, if the event came from one.
    fn report_chat_id(&self) -> Option<i64>;
    fn report_user_id(&self) -> i64;
}

/// Context of a message dispatch (command or content handler).
#[derive(Clone)]
pub struct Context {
    bot: Bot,
    message: Message,
    args: Vec<String>,
    content: Option<Content>,
}

impl Context {
    pub fn new(bot: Bot, message: Message, args: Vec<String>, content: Option<Content>) -> Self {
        Self {
            bot,
            message,
            args,
            content,
        }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    pub fn api(&self) -> &Api {
        self.bot.api()
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn chat_id(&self) -> i64 {
        self.message.chat.id
    }

    pub fn user_id(&self) -> i64 {
        self.message.user_id()
    }

    pub fn username(&self) -> &str {
        self.message.username()
    }

    pub fn message_id(&self) -> i64 {
        self.message.message_id
    }

    pub fn text(&self) -> &str {
        self.message.text()
    }

    /// Command arguments (whitespace-split tokens after the command name). Empty for content handlers.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Content the handler was selected for. `None` for command handlers.
    pub fn content(&self) -> Option<&Content> {
        self.content.as_ref()
    }

    pub fn photo(&self) -> Option<&[PhotoSize]> {
        match &self.content {
            Some(Content::Photo(sizes)) => Some(sizes),
            _ => None,
        }
    }

    pub fn video(&self) -> Option<&Video> {
        match &self.content {
            Some(Content::Video(v)) => Some(v),
            _ => None,
        }
    }

    pub fn voice(&self) -> Option<&Voice> {
        match &self.content {
            Some(Content::Voice(v)) => Some(v),
            _ => None,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match &self.content {
            Some(Content::Document(d)) => Some(d),
            _ => None,
        }
    }

    pub fn animation(&self) -> Option<&Animation> {
        match &self.content {
            Some(Content::Animation(a)) => Some(a),
            _ => None,
        }
    }

    pub fn sticker(&self) -> Option<&Sticker> {
        match &self.content {
            Some(Content::Sticker(s)) => Some(s),
            _ => None,
        }
    }

    pub fn audio(&self) -> Option<&Audio> {
        match &self.content {
            Some(Content::Audio(a)) => Some(a),
            _ => None,
        }
    }

    pub fn video_note(&self) -> Option<&VideoNote> {
        match &self.content {
            Some(Content::VideoNote(v)) => Some(v),
            _ => None,
        }
    }

    /// Sends `text` to the originating chat.
    pub async fn reply(&self, text: impl Into<String>) -> Result<Message> {
        self.api()
            .send_message(&SendMessageRequest::new(self.chat_id(), text))
            .await
    }

    /// Sends `text` as a quoted reply to the triggering message.
    pub async fn reply_to(&self, text: impl Into<String>) -> Result<Message> {
        let req = SendMessageRequest::new(self.chat_id(), text).reply_to(self.message_id());
        self.api().send_message(&req).await
    }

    /// Sends a fully specified message; the chat id is always the originating chat.
    pub async fn reply_with(&self, mut req: SendMessageRequest) -> Result<Message> {
        req.chat_id = self.chat_id();
        self.api().send_message(&req).await
    }

    pub async fn reply_with_keyboard(
        &self,
        text: impl Into<String>,
        buttons: Vec<Vec<InlineKeyboardButton>>,
    ) -> Result<Message> {
        let req = SendMessageRequest::new(self.chat_id(), text)
            .reply_markup(InlineKeyboardMarkup::new(buttons));
        self.api().send_message(&req).await
    }

    /// Edits a message previously sent to this chat.
    pub async fn edit_message_text(
        &self,
        message_id: i64,
        text: impl Into<String>,
        opts: EditMessageOptions,
    ) -> Result<()> {
        let req = edit_request(self.chat_id(), message_id, text.into(), opts);
        self.api().edit_message_text(&req).await
    }

    pub async fn edit_message_markup(
        &self,
        message_id: i64,
        markup: Option<&InlineKeyboardMarkup>,
    ) -> Result<()> {
        self.api()
            .edit_message_reply_markup(self.chat_id(), message_id, markup)
            .await
    }

    /// Deletes the triggering message.
    pub async fn delete_message(&self) -> Result<()> {
        self.api()
            .delete_message(self.chat_id(), self.message_id())
            .await
    }

    pub async fn send_chat_action(&self, action: ChatAction) -> Result<()> {
        self.api().send_chat_action(self.chat_id(), action).await
    }
}

impl ReportTarget for Context {
    fn api(&self) -> &Api {
        self.bot.api()
    }

    fn report_chat_id(&self) -> Option<i64> {
        Some(self.chat_id())
    }

    fn report_user_id(&self) -> i64 {
        self.user_id()
    }
}

/// Context of a callback query dispatch.
#[derive(Clone)]
pub struct CallbackContext {
    bot: Bot,
    query: CallbackQuery,
}

impl CallbackContext {
    pub fn new(bot: Bot, query: CallbackQuery) -> Self {
        Self { bot, query }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    pub fn api(&self) -> &Api {
        self.bot.api()
    }

    pub fn query(&self) -> &CallbackQuery {
        &self.query
    }

    pub fn query_id(&self) -> &str {
        &self.query.id
    }

    /// Raw callback data of the pressed button.
    pub fn data(&self) -> &str {
        self.query.data()
    }

    /// Message the button was attached to. Absent for inline-mode messages.
    pub fn message(&self) -> Option<&Message> {
        self.query.message.as_ref()
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.message().map(|m| m.chat.id)
    }

    pub fn message_id(&self) -> Option<i64> {
        self.message().map(|m| m.message_id)
    }

    pub fn user_id(&self) -> i64 {
        self.query.from.id
    }

    pub fn username(&self) -> &str {
        self.query.from.username.as_deref().unwrap_or("")
    }

    fn origin(&self) -> Result<(i64, i64)> {
        self.message()
            .map(|m| (m.chat.id, m.message_id))
            .ok_or_else(|| BotError::bad_request("callback query has no originating message"))
    }

    pub async fn answer(&self, opts: CallbackAnswerOptions) -> Result<()> {
        let req = AnswerCallbackQueryRequest {
            callback_query_id: self.query.id.clone(),
            text: opts.text,
            show_alert: opts.show_alert,
            url: opts.url,
            cache_time: opts.cache_time,
        };
        self.api().answer_callback_query(&req).await
    }

    /// Answers with a modal alert showing `text`.
    pub async fn alert(&self, text: impl Into<String>) -> Result<()> {
        self.answer(CallbackAnswerOptions {
            text: text.into(),
            show_alert: true,
            ..Default::default()
        })
        .await
    }

    /// Replaces the text of the message the button belongs to.
    pub async fn edit_message(
        &self,
        text: impl Into<String>,
        opts: EditMessageOptions,
    ) -> Result<()> {
        let (chat_id, message_id) = self.origin()?;
        let req = edit_request(chat_id, message_id, text.into(), opts);
        self.api().edit_message_text(&req).await
    }

    pub async fn edit_markup(&self, markup: Option<&InlineKeyboardMarkup>) -> Result<()> {
        let (chat_id, message_id) = self.origin()?;
        self.api()
            .edit_message_reply_markup(chat_id, message_id, markup)
            .await
    }

    /// Sends a new message to the chat the button belongs to.
    pub async fn reply(&self, text: impl Into<String>) -> Result<Message> {
        let (chat_id, _) = self.origin()?;
        self.api()
            .send_message(&SendMessageRequest::new(chat_id, text))
            .await
    }

    pub async fn delete_message(&self) -> Result<()> {
        let (chat_id, message_id) = self.origin()?;
        self.api().delete_message(chat_id, message_id).await
    }
}

impl ReportTarget for CallbackContext {
    fn api(&self) -> &Api {
        self.bot.api()
    }

    fn report_chat_id(&self) -> Option<i64> {
        self.chat_id()
    }

    fn report_user_id(&self) -> i64 {
        self.user_id()
    }
}

fn edit_request(
    chat_id: i64,
    message_id: i64,
    text: String,
    opts: EditMessageOptions,
) -> EditMessageTextRequest {
    EditMessageTextRequest {
        chat_id,
        message_id,
        text,
        parse_mode: opts.parse_mode,
        disable_web_page_preview: opts.disable_web_page_preview,
        reply_markup: opts.reply_markup,
    }
}
