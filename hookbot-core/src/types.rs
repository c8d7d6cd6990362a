//! Event model: inbound updates, messages, callback queries and the media records they carry.
//!
//! Field names follow the Telegram Bot API JSON so these types deserialize straight from a webhook body.
//! Unknown fields are ignored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One inbound event delivered to the webhook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
}

/// The variant of an [`Update`] the dispatcher acts on.
#[derive(Debug, Clone)]
pub enum UpdateKind {
    Message(Message),
    CallbackQuery(CallbackQuery),
    /// Neither a message nor a callback query (another platform event kind).
    Unsupported,
}

impl Update {
    /// Message takes precedence when, against the platform contract, both variants are set.
    pub fn into_kind(self) -> UpdateKind {
        match (self.message, self.callback_query) {
            (Some(message), _) => UpdateKind::Message(message),
            (None, Some(query)) => UpdateKind::CallbackQuery(query),
            (None, None) => UpdateKind::Unsupported,
        }
    }
}

/// User identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

/// Chat (private, group, supergroup or channel) identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub chat_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoSize {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub file_id: String,
    pub file_unique_id: String,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub file_id: String,
    pub file_unique_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub file_id: String,
    pub file_unique_id: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub is_animated: bool,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    pub file_id: String,
    pub file_unique_id: String,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoNote {
    pub file_id: String,
    pub file_unique_id: String,
    pub length: u32,
    pub duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

/// A chat message. At most one content field is populated per the platform contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_note: Option<VideoNote>,
}

impl Message {
    /// Sender id; 0 when the message has no sender (e.g. channel posts).
    pub fn user_id(&self) -> i64 {
        self.from.as_ref().map(|u| u.id).unwrap_or(0)
    }

    /// Sender username; empty when unknown.
    pub fn username(&self) -> &str {
        self.from
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .unwrap_or("")
    }

    /// Text, or the empty string.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Content of the given kind, if that field is populated. Empty text and empty photo lists count as absent.
    pub fn content_of(&self, kind: ContentKind) -> Option<Content> {
        match kind {
            ContentKind::Text => self
                .text
                .as_ref()
                .filter(|t| !t.is_empty())
                .map(|t| Content::Text(t.clone())),
            ContentKind::Photo => self
                .photo
                .as_ref()
                .filter(|p| !p.is_empty())
                .map(|p| Content::Photo(p.clone())),
            ContentKind::Video => self.video.clone().map(Content::Video),
            ContentKind::Voice => self.voice.clone().map(Content::Voice),
            ContentKind::Document => self.document.clone().map(Content::Document),
            ContentKind::Animation => self.animation.clone().map(Content::Animation),
            ContentKind::Sticker => self.sticker.clone().map(Content::Sticker),
            ContentKind::Audio => self.audio.clone().map(Content::Audio),
            ContentKind::VideoNote => self.video_note.clone().map(Content::VideoNote),
        }
    }

    /// Kinds of populated content fields, in dispatch priority order.
    pub fn content_kinds(&self) -> Vec<ContentKind> {
        ContentKind::PRIORITY
            .iter()
            .copied()
            .filter(|kind| self.content_of(*kind).is_some())
            .collect()
    }
}

/// Fixed content-type tags a message handler can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Text,
    Photo,
    Video,
    Voice,
    Document,
    Animation,
    Sticker,
    Audio,
    VideoNote,
}

impl ContentKind {
    /// Order in which the router inspects content fields.
    pub const PRIORITY: [ContentKind; 9] = [
        ContentKind::Text,
        ContentKind::Photo,
        ContentKind::Video,
        ContentKind::Voice,
        ContentKind::Document,
        ContentKind::Animation,
        ContentKind::Sticker,
        ContentKind::Audio,
        ContentKind::VideoNote,
    ];

    /// Literal tag, e.g. `"Photo"`, `"VideoNote"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Text => "Text",
            ContentKind::Photo => "Photo",
            ContentKind::Video => "Video",
            ContentKind::Voice => "Voice",
            ContentKind::Document => "Document",
            ContentKind::Animation => "Animation",
            ContentKind::Sticker => "Sticker",
            ContentKind::Audio => "Audio",
            ContentKind::VideoNote => "VideoNote",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentKind::PRIORITY
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown content tag: {}", s))
    }
}

/// The populated content of a message, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Photo(Vec<PhotoSize>),
    Video(Video),
    Voice(Voice),
    Document(Document),
    Animation(Animation),
    Sticker(Sticker),
    Audio(Audio),
    VideoNote(VideoNote),
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Text(_) => ContentKind::Text,
            Content::Photo(_) => ContentKind::Photo,
            Content::Video(_) => ContentKind::Video,
            Content::Voice(_) => ContentKind::Voice,
            Content::Document(_) => ContentKind::Document,
            Content::Animation(_) => ContentKind::Animation,
            Content::Sticker(_) => ContentKind::Sticker,
            Content::Audio(_) => ContentKind::Audio,
            Content::VideoNote(_) => ContentKind::VideoNote,
        }
    }
}

/// Inline keyboard button press.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Application-defined payload of the pressed button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
}

impl CallbackQuery {
    pub fn data(&self) -> &str {
        self.data.as_deref().unwrap_or("")
    }
}

/// Inline keyboard attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(rows: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self {
            inline_keyboard: rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineKeyboardButton {
    /// Button that triggers a callback query with `data`.
    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: Some(data.into()),
            url: None,
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            callback_data: None,
            url: Some(url.into()),
        }
    }
}

/// Result of `getWebhookInfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookInfo {
    pub url: String,
    #[serde(default)]
    pub has_custom_certificate: bool,
    #[serde(default)]
    pub pending_update_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_date: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

/// Entry of the bot's command menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}
