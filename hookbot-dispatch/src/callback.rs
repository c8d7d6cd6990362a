//! Callback router: exact match on callback data, then longest registered prefix.

use hookbot_core::{CallbackQuery, Result};
use tracing::{debug, warn};

use crate::bot::{Bot, Dispatch};
use crate::context::CallbackContext;
use crate::guard;

pub(crate) async fn route_callback(bot: &Bot, query: CallbackQuery) -> Result<Dispatch> {
    let data = query.data().to_string();

    if let Some(handler) = bot.callbacks().lookup(data.as_str()) {
        debug!(data = %data, "callback handler called");
        let ctx = CallbackContext::new(bot.clone(), query);
        guard::execute(bot.reporter(), ctx, handler.as_ref()).await?;
        return Ok(Dispatch::Callback {
            key: data,
            exact: true,
        });
    }

    if let Some((key, handler)) = bot.callbacks().longest_prefix(&data) {
        debug!(data = %data, prefix = %key, "callback handler called for prefix");
        let key = key.to_string();
        let ctx = CallbackContext::new(bot.clone(), query);
        guard::execute(bot.reporter(), ctx, handler.as_ref()).await?;
        return Ok(Dispatch::Callback { key, exact: false });
    }

    warn!(data = %data, user_id = query.from.id, "No callback handler found");
    Ok(Dispatch::NoHandler)
}
