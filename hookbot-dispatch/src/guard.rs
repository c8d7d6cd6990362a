//! Execution guard: runs a handler once, contains panics, classifies the returned error.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use hookbot_core::{code, BotError, Result};
use tracing::{error, info, warn};

use crate::context::ReportTarget;
use crate::handler::Handler;
use crate::reporter::ErrorReporter;

/// How a handler failure is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// 403: the user blocked the bot. Logged, propagated, not reported.
    AccessDenied,
    /// 429: the platform throttled us. Logged, propagated, not reported, not retried.
    RateLimited,
    /// Anything else, including a recovered panic. Reported, then propagated.
    Generic,
}

pub fn classify(err: &BotError) -> FailureClass {
    match err.code {
        code::FORBIDDEN => FailureClass::AccessDenied,
        code::TOO_MANY_REQUESTS => FailureClass::RateLimited,
        _ => FailureClass::Generic,
    }
}

/// Invokes `handler` exactly once with `ctx`.
///
/// A panic inside the handler is converted into a 500 [`BotError`] and never unwinds past this
/// function. Generic failures go to `reporter` exactly once before being returned; a panicking
/// reporter is logged and does not change the returned error.
pub async fn execute<C, H>(reporter: &dyn ErrorReporter, ctx: C, handler: &H) -> Result<()>
where
    C: ReportTarget + Clone + Send + 'static,
    H: Handler<C> + ?Sized,
{
    let target = ctx.clone();
    let outcome = AssertUnwindSafe(async move { handler.handle(ctx).await })
        .catch_unwind()
        .await;

    let err = match outcome {
        Ok(Ok(())) => return Ok(()),
        Ok(Err(err)) => err,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            let err = BotError::internal(format!("handler panic: {}", message));
            error!(user_id = target.report_user_id(), error = %err, "Panic in handler execution");
            err
        }
    };

    match classify(&err) {
        FailureClass::AccessDenied => {
            warn!(user_id = target.report_user_id(), "Bot blocked by user");
        }
        FailureClass::RateLimited => {
            info!(retry_after = ?err.retry_after, "Rate limited");
        }
        FailureClass::Generic => {
            let reported = AssertUnwindSafe(reporter.report(&target, &err))
                .catch_unwind()
                .await;
            if let Err(payload) = reported {
                error!(
                    user_id = target.report_user_id(),
                    panic = %panic_message(payload.as_ref()),
                    "Panic in error reporter"
                );
            }
        }
    }
    Err(err)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(
            classify(&BotError::new(403, "Forbidden: bot was blocked by the user")),
            FailureClass::AccessDenied
        );
        assert_eq!(
            classify(&BotError::new(429, "Too Many Requests: retry after 3")),
            FailureClass::RateLimited
        );
        assert_eq!(classify(&BotError::bad_request("Bad Request")), FailureClass::Generic);
        assert_eq!(classify(&BotError::internal("boom")), FailureClass::Generic);
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(payload.as_ref()), "static str");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic payload");
    }
}
