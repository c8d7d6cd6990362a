//! Webhook endpoint: one POST route that feeds raw update bodies to the bot.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use hookbot_dispatch::Bot;
use tracing::warn;

/// Router accepting updates on `path`. Other methods on that path get 405 from axum.
pub fn webhook_router(bot: Bot, path: &str) -> Router {
    Router::new()
        .route(path, post(receive_update))
        .with_state(bot)
}

/// 200 for every parsed update, whatever the dispatch outcome; 400 for an unparseable body.
async fn receive_update(State(bot): State<Bot>, body: Bytes) -> StatusCode {
    match bot.handle_payload(&body).await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            warn!(error = %err, body_len = body.len(), "Rejected webhook payload");
            StatusCode::BAD_REQUEST
        }
    }
}
