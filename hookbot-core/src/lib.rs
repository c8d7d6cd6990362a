//! # hookbot-core
//!
//! Core types and traits for the webhook bot: the inbound event model ([`Update`], [`Message`],
//! [`CallbackQuery`]), the [`BotError`] record, the [`ApiTransport`] seam with its typed [`Api`]
//! façade, request builders, and tracing initialization. Transport-agnostic; used by
//! hookbot-dispatch and hookbot-telegram.

pub mod error;
pub mod logger;
pub mod requests;
pub mod transport;
pub mod types;

pub use error::{code, BotError, Result};
pub use logger::init_tracing;
pub use requests::{
    AnswerCallbackQueryRequest, CallbackAnswerOptions, ChatAction, CopyMessageRequest,
    EditMessageOptions, EditMessageTextRequest, ForwardMessageRequest, MediaKind, ParamBuilder,
    Params, ParseMode, ReplyParameters, SendMediaRequest, SendMessageRequest, SetWebhookRequest,
};
pub use transport::{Api, ApiTransport};
pub use types::{
    Animation, Audio, BotCommand, CallbackQuery, Chat, Content, ContentKind, Document,
    InlineKeyboardButton, InlineKeyboardMarkup, Message, PhotoSize, Sticker, Update, UpdateKind,
    User, Video, VideoNote, Voice, WebhookInfo,
};
