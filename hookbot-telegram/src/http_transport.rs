//! Bot API transport over HTTPS: `POST {api_url}/bot{token}/{method}` with a JSON body.

use std::time::Duration;

use async_trait::async_trait;
use hookbot_core::{code, ApiTransport, BotError, Params, Result};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::TelegramConfig;

/// Response envelope of every Bot API method.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error_code: Option<u16>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

/// [`ApiTransport`] backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &TelegramConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.api_url, &config.bot_token))
    }

    pub fn with_client(client: reqwest::Client, api_url: &str, bot_token: &str) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), bot_token),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn invoke(&self, method: &str, params: Params) -> Result<Vec<u8>> {
        debug!(method = %method, "POST Bot API");
        // Request errors carry the URL, which embeds the token.
        let response = self
            .client
            .post(self.method_url(method))
            .json(&params)
            .send()
            .await
            .map_err(|e| {
                BotError::internal(format!("{} request failed", method)).with_cause(e.without_url())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            BotError::internal(format!("{} response read failed", method))
                .with_cause(e.without_url())
        })?;

        let envelope: ApiResponse = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(e) => {
                let code = if status.is_success() {
                    code::INTERNAL
                } else {
                    status.as_u16()
                };
                return Err(BotError::new(
                    code,
                    format!("{} returned an invalid response (HTTP {})", method, status),
                )
                .with_cause(e));
            }
        };

        if !envelope.ok {
            let code = envelope.error_code.unwrap_or_else(|| status.as_u16());
            let description = envelope
                .description
                .unwrap_or_else(|| format!("{} failed (HTTP {})", method, status));
            warn!(method = %method, code = code, description = %description, "Bot API error");
            let mut err = BotError::new(code, description);
            if let Some(secs) = envelope.parameters.and_then(|p| p.retry_after) {
                err = err.with_retry_after(secs);
            }
            return Err(err);
        }

        Ok(serde_json::to_vec(&envelope.result.unwrap_or(Value::Null))?)
    }
}
