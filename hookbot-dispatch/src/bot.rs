//! [`Bot`]: frozen handler registries plus the outbound [`Api`], and the dispatch entry points.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use hookbot_core::{code, Api, BotError, ContentKind, Result, Update, UpdateKind};
use tracing::{debug, error, info, instrument, warn};

use crate::callback::route_callback;
use crate::context::{CallbackContext, Context};
use crate::handler::Handler;
use crate::registry::Registry;
use crate::reporter::{ApologyReporter, ErrorReporter};
use crate::router::route_message;

type MessageHandler = dyn Handler<Context>;
type CallbackHandler = dyn Handler<CallbackContext>;

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// The command handler with this name ran.
    Command(String),
    /// The message handler for this content kind ran.
    Content(ContentKind),
    /// A callback handler ran; `key` is the registered key, `exact` false for a prefix match.
    Callback { key: String, exact: bool },
    /// The event was understood but nothing is registered for it.
    NoHandler,
    /// The update carried neither a message nor a callback query.
    Ignored,
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Command(name) => write!(f, "command /{}", name),
            Dispatch::Content(kind) => write!(f, "{} handler", kind),
            Dispatch::Callback { key, exact: true } => write!(f, "callback {:?}", key),
            Dispatch::Callback { key, exact: false } => write!(f, "callback prefix {:?}", key),
            Dispatch::NoHandler => f.write_str("no handler"),
            Dispatch::Ignored => f.write_str("ignored"),
        }
    }
}

struct BotInner {
    api: Api,
    commands: Registry<String, MessageHandler>,
    messages: Registry<ContentKind, MessageHandler>,
    callbacks: Registry<String, CallbackHandler>,
    reporter: Arc<dyn ErrorReporter>,
}

/// Immutable dispatcher. Cheap to clone and safe to share across concurrent dispatches.
#[derive(Clone)]
pub struct Bot {
    inner: Arc<BotInner>,
}

impl Bot {
    pub fn builder(api: Api) -> BotBuilder {
        BotBuilder::new(api)
    }

    pub fn api(&self) -> &Api {
        &self.inner.api
    }

    pub(crate) fn commands(&self) -> &Registry<String, MessageHandler> {
        &self.inner.commands
    }

    pub(crate) fn messages(&self) -> &Registry<ContentKind, MessageHandler> {
        &self.inner.messages
    }

    pub(crate) fn callbacks(&self) -> &Registry<String, CallbackHandler> {
        &self.inner.callbacks
    }

    pub(crate) fn reporter(&self) -> &dyn ErrorReporter {
        self.inner.reporter.as_ref()
    }

    /// Routes one update to at most one handler.
    ///
    /// Errors: malformed command (500), unknown command (404), unsupported message (400), or the
    /// error returned by the handler after the execution guard classified it.
    #[instrument(skip(self, update), fields(update_id = update.update_id))]
    pub async fn dispatch(&self, update: Update) -> Result<Dispatch> {
        match update.into_kind() {
            UpdateKind::Message(message) => route_message(self, message).await,
            UpdateKind::CallbackQuery(query) => route_callback(self, query).await,
            UpdateKind::Unsupported => {
                warn!("Received update with no message or callback query");
                Ok(Dispatch::Ignored)
            }
        }
    }

    /// Webhook-facing entry point: dispatches and logs; never fails.
    pub async fn handle_update(&self, update: Update) {
        let update_id = update.update_id;
        match self.dispatch(update).await {
            Ok(outcome) => debug!(update_id = update_id, outcome = %outcome, "Update dispatched"),
            Err(err) => log_dispatch_error(update_id, &err),
        }
    }

    /// Parses a raw webhook body and handles it. Only an unparseable body is an error (400).
    pub async fn handle_payload(&self, body: &[u8]) -> Result<()> {
        let update: Update = serde_json::from_slice(body)
            .map_err(|e| BotError::bad_request("Failed to decode update").with_cause(e))?;
        self.handle_update(update).await;
        Ok(())
    }
}

fn log_dispatch_error(update_id: i64, err: &BotError) {
    match err.code {
        code::TOO_MANY_REQUESTS => {
            info!(update_id = update_id, error = %err, "Update hit rate limit")
        }
        code::FORBIDDEN | code::NOT_FOUND | code::BAD_REQUEST => {
            warn!(update_id = update_id, error = %err, "Update not handled")
        }
        _ => error!(update_id = update_id, error = %err, "Error handling update"),
    }
}

/// Collects handlers before the bot goes live. Registering a key twice keeps the later handler.
pub struct BotBuilder {
    api: Api,
    commands: Registry<String, MessageHandler>,
    messages: Registry<ContentKind, MessageHandler>,
    callbacks: Registry<String, CallbackHandler>,
    reporter: Arc<dyn ErrorReporter>,
}

impl BotBuilder {
    pub fn new(api: Api) -> Self {
        Self {
            api,
            commands: Registry::new(),
            messages: Registry::new(),
            callbacks: Registry::new(),
            reporter: Arc::new(ApologyReporter::default()),
        }
    }

    /// Handler for `/name`. `name` is matched case-sensitively, without the leading slash.
    pub fn on_command<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let name = name.into();
        if self.commands.register(name.clone(), Arc::new(handler)).is_some() {
            debug!(command = %name, "Replaced command handler");
        }
        self
    }

    /// Handler for non-command messages whose first handled content field is `kind`.
    pub fn on_message<F, Fut>(mut self, kind: ContentKind, handler: F) -> Self
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        if self.messages.register(kind, Arc::new(handler)).is_some() {
            debug!(kind = %kind, "Replaced message handler");
        }
        self
    }

    /// Handler for callback data equal to `data`, or starting with it when no exact key matches.
    pub fn on_callback<F, Fut>(mut self, data: impl Into<String>, handler: F) -> Self
    where
        F: Fn(CallbackContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let data = data.into();
        if self.callbacks.register(data.clone(), Arc::new(handler)).is_some() {
            debug!(data = %data, "Replaced callback handler");
        }
        self
    }

    /// Replaces the default [`ApologyReporter`].
    pub fn error_reporter(mut self, reporter: impl ErrorReporter + 'static) -> Self {
        self.reporter = Arc::new(reporter);
        self
    }

    pub fn build(self) -> Bot {
        info!(
            commands = self.commands.len(),
            message_handlers = self.messages.len(),
            callback_handlers = self.callbacks.len(),
            "Bot built"
        );
        Bot {
            inner: Arc::new(BotInner {
                api: self.api,
                commands: self.commands,
                messages: self.messages,
                callbacks: self.callbacks,
                reporter: self.reporter,
            }),
        }
    }
}
