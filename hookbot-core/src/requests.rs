//! Typed parameter builders for outbound API operations.
//!
//! Every request turns into a [`Params`] map through [`ParamBuilder`]. Required fields are always
//! written; optional fields are written iff their value differs from the type's default
//! (non-empty string, `true`, non-zero number, `Some`). The resulting payload shape is deterministic.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::types::{BotCommand, InlineKeyboardMarkup};

/// Parameter mapping handed to the API transport.
pub type Params = Map<String, Value>;

/// Builds a [`Params`] map applying the omission rule.
#[derive(Debug, Default)]
pub struct ParamBuilder {
    params: Params,
}

impl ParamBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always writes `key`.
    pub fn required(mut self, key: &str, value: impl Serialize) -> Result<Self> {
        self.params.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Writes `key` only when `value` is not the type's default.
    pub fn optional<T>(self, key: &str, value: T) -> Result<Self>
    where
        T: Serialize + Default + PartialEq,
    {
        if value == T::default() {
            return Ok(self);
        }
        self.required(key, value)
    }

    /// Writes `key` only when `value` is `Some`.
    pub fn optional_some<T: Serialize>(self, key: &str, value: Option<T>) -> Result<Self> {
        match value {
            Some(v) => self.required(key, v),
            None => Ok(self),
        }
    }

    pub fn build(self) -> Params {
        self.params
    }
}

/// Text formatting mode. Only the two modes the platform accepts can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    #[serde(rename = "MarkdownV2")]
    MarkdownV2,
}

/// Which message a new message replies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReplyParameters {
    pub message_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<i64>,
}

impl ReplyParameters {
    pub fn to(message_id: i64) -> Self {
        Self {
            message_id,
            chat_id: None,
        }
    }
}

/// `sendMessage`.
#[derive(Debug, Clone, Default)]
pub struct SendMessageRequest {
    pub chat_id: i64,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub reply_parameters: Option<ReplyParameters>,
    pub disable_notification: bool,
    pub protect_content: bool,
}

impl SendMessageRequest {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn reply_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.reply_parameters = Some(ReplyParameters::to(message_id));
        self
    }

    pub fn to_params(&self) -> Result<Params> {
        // A zero message id means "not replying to anything".
        let reply = self.reply_parameters.filter(|r| r.message_id != 0);
        Ok(ParamBuilder::new()
            .required("chat_id", self.chat_id)?
            .required("text", &self.text)?
            .optional_some("parse_mode", self.parse_mode)?
            .optional_some("reply_markup", self.reply_markup.as_ref())?
            .optional_some("reply_parameters", reply)?
            .optional("disable_notification", self.disable_notification)?
            .optional("protect_content", self.protect_content)?
            .build())
    }
}

/// `forwardMessage`.
#[derive(Debug, Clone, Default)]
pub struct ForwardMessageRequest {
    pub chat_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
    pub disable_notification: bool,
    pub protect_content: bool,
}

impl ForwardMessageRequest {
    pub fn to_params(&self) -> Result<Params> {
        Ok(ParamBuilder::new()
            .required("chat_id", self.chat_id)?
            .required("from_chat_id", self.from_chat_id)?
            .required("message_id", self.message_id)?
            .optional("disable_notification", self.disable_notification)?
            .optional("protect_content", self.protect_content)?
            .build())
    }
}

/// `copyMessage`.
#[derive(Debug, Clone, Default)]
pub struct CopyMessageRequest {
    pub chat_id: i64,
    pub from_chat_id: i64,
    pub message_id: i64,
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub disable_notification: bool,
    pub protect_content: bool,
}

impl CopyMessageRequest {
    pub fn to_params(&self) -> Result<Params> {
        Ok(ParamBuilder::new()
            .required("chat_id", self.chat_id)?
            .required("from_chat_id", self.from_chat_id)?
            .required("message_id", self.message_id)?
            .optional("caption", self.caption.as_str())?
            .optional_some("parse_mode", self.parse_mode)?
            .optional_some("reply_markup", self.reply_markup.as_ref())?
            .optional("disable_notification", self.disable_notification)?
            .optional("protect_content", self.protect_content)?
            .build())
    }
}

/// Kind of media sent by [`SendMediaRequest`]; selects the method and the media field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
    Document,
    Voice,
    Animation,
    Sticker,
    VideoNote,
}

impl MediaKind {
    pub fn method(&self) -> &'static str {
        match self {
            MediaKind::Photo => "sendPhoto",
            MediaKind::Video => "sendVideo",
            MediaKind::Audio => "sendAudio",
            MediaKind::Document => "sendDocument",
            MediaKind::Voice => "sendVoice",
            MediaKind::Animation => "sendAnimation",
            MediaKind::Sticker => "sendSticker",
            MediaKind::VideoNote => "sendVideoNote",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
            MediaKind::Document => "document",
            MediaKind::Voice => "voice",
            MediaKind::Animation => "animation",
            MediaKind::Sticker => "sticker",
            MediaKind::VideoNote => "video_note",
        }
    }
}

/// `sendPhoto`, `sendVideo`, ... referencing media by file id or HTTP URL.
#[derive(Debug, Clone)]
pub struct SendMediaRequest {
    pub kind: MediaKind,
    pub chat_id: i64,
    /// File id already on the platform, or an HTTP URL.
    pub media: String,
    pub caption: String,
    pub parse_mode: Option<ParseMode>,
    pub reply_markup: Option<InlineKeyboardMarkup>,
    pub reply_parameters: Option<ReplyParameters>,
    pub duration: u32,
    pub has_spoiler: bool,
    pub disable_notification: bool,
    pub protect_content: bool,
}

impl SendMediaRequest {
    pub fn new(kind: MediaKind, chat_id: i64, media: impl Into<String>) -> Self {
        Self {
            kind,
            chat_id,
            media: media.into(),
            caption: String::new(),
            parse_mode: None,
            reply_markup: None,
            reply_parameters: None,
            duration: 0,
            has_spoiler: false,
            disable_notification: false,
            protect_content: false,
        }
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn to_params(&self) -> Result<Params> {
        Ok(ParamBuilder::new()
            .required("chat_id", self.chat_id)?
            .required(self.kind.field(), &self.media)?
            .optional("caption", self.caption.as_str())?
            .optional_some("parse_mode", self.parse_mode)?
            .optional_some("reply_markup", self.reply_markup.as_ref())?
            .optional_some("reply_parameters", self.reply_parameters)?
            .optional("duration", self.duration)?
            .optional("has_spoiler", self.has_spoiler)?
            .optional("disable_notification", self.disable_notification)?
            .optional("protect_content", self.protect_content)?
            .build())
    }
}

/// `sendChatAction` actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

/// `editMessageText`.
#[derive(Debug, Clone, Default)]
pub struct EditMessageTextRequest {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: String,
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: bool,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageTextRequest {
    pub fn new(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            message_id,
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Result<Params> {
        Ok(ParamBuilder::new()
            .required("chat_id", self.chat_id)?
            .required("message_id", self.message_id)?
            .required("text", &self.text)?
            .optional_some("parse_mode", self.parse_mode)?
            .optional("disable_web_page_preview", self.disable_web_page_preview)?
            .optional_some("reply_markup", self.reply_markup.as_ref())?
            .build())
    }
}

/// Optional knobs for editing a message's text from a context.
#[derive(Debug, Clone, Default)]
pub struct EditMessageOptions {
    pub parse_mode: Option<ParseMode>,
    pub disable_web_page_preview: bool,
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// `answerCallbackQuery`.
#[derive(Debug, Clone, Default)]
pub struct AnswerCallbackQueryRequest {
    pub callback_query_id: String,
    pub text: String,
    pub show_alert: bool,
    pub url: String,
    pub cache_time: u32,
}

impl AnswerCallbackQueryRequest {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Result<Params> {
        Ok(ParamBuilder::new()
            .required("callback_query_id", &self.callback_query_id)?
            .optional("text", self.text.as_str())?
            .optional("show_alert", self.show_alert)?
            .optional("url", self.url.as_str())?
            .optional("cache_time", self.cache_time)?
            .build())
    }
}

/// Optional fields of an answer given from a callback context.
#[derive(Debug, Clone, Default)]
pub struct CallbackAnswerOptions {
    pub text: String,
    pub show_alert: bool,
    pub url: String,
    pub cache_time: u32,
}

/// `setWebhook`.
#[derive(Debug, Clone, Default)]
pub struct SetWebhookRequest {
    pub url: String,
    pub max_connections: u32,
    pub allowed_updates: Vec<String>,
    pub drop_pending_updates: bool,
    pub secret_token: String,
}

impl SetWebhookRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> Result<Params> {
        Ok(ParamBuilder::new()
            .required("url", &self.url)?
            .optional("max_connections", self.max_connections)?
            .optional("allowed_updates", self.allowed_updates.clone())?
            .optional("drop_pending_updates", self.drop_pending_updates)?
            .optional("secret_token", self.secret_token.as_str())?
            .build())
    }
}

/// `setMyCommands`.
pub fn set_my_commands_params(commands: &[BotCommand]) -> Result<Params> {
    Ok(ParamBuilder::new().required("commands", commands)?.build())
}
