//! # hookbot-dispatch
//!
//! Update dispatch engine. A [`Bot`] is assembled once through [`BotBuilder`] (command, content and
//! callback handler registries plus a fallback [`ErrorReporter`]) and then routes each inbound
//! [`hookbot_core::Update`] to at most one handler, executed under the [`guard`]: panics are
//! contained and errors classified as access-denied, rate-limited or generic.

mod bot;
mod callback;
mod context;
pub mod guard;
mod handler;
mod registry;
mod reporter;
mod router;

pub use bot::{Bot, BotBuilder, Dispatch};
pub use context::{CallbackContext, Context, ReportTarget};
pub use guard::{classify, FailureClass};
pub use handler::Handler;
pub use registry::Registry;
pub use reporter::{ApologyReporter, ErrorReporter, DEFAULT_APOLOGY};
pub use router::CommandInvocation;
