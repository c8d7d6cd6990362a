//! Connection and server config. Loaded from BOT_TOKEN, TELEGRAM_API_URL, WEBHOOK_URL,
//! WEBHOOK_PATH, LISTEN_ADDR, REQUEST_TIMEOUT_SECS and LOG_FILE.

use anyhow::Result;
use std::env;
use std::net::SocketAddr;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_WEBHOOK_PATH: &str = "/webhook";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL; points at a local Bot API server or a test double.
    pub api_url: String,
    /// WEBHOOK_URL: public URL registered with `setWebhook` on startup. Unset leaves the current registration alone.
    pub webhook_url: Option<String>,
    /// WEBHOOK_PATH the local server accepts updates on.
    pub webhook_path: String,
    /// LISTEN_ADDR
    pub listen_addr: String,
    /// REQUEST_TIMEOUT_SECS for outbound API calls.
    pub request_timeout_secs: u64,
    /// LOG_FILE; stdout only when unset.
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let request_timeout_secs = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!("REQUEST_TIMEOUT_SECS is not a number of seconds: {}", raw)
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            bot_token,
            api_url: env::var("TELEGRAM_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            webhook_url: env::var("WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
            webhook_path: env::var("WEBHOOK_PATH")
                .unwrap_or_else(|_| DEFAULT_WEBHOOK_PATH.to_string()),
            listen_addr: env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string()),
            request_timeout_secs,
            log_file: env::var("LOG_FILE").ok().filter(|s| !s.is_empty()),
        })
    }

    /// Defaults for everything but the token.
    pub fn with_token(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            api_url: DEFAULT_API_URL.to_string(),
            webhook_url: None,
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_file: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if reqwest::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("TELEGRAM_API_URL is not a valid URL: {}", self.api_url);
        }
        if let Some(ref url) = self.webhook_url {
            if reqwest::Url::parse(url).is_err() {
                anyhow::bail!("WEBHOOK_URL is not a valid URL: {}", url);
            }
        }
        if !self.webhook_path.starts_with('/') {
            anyhow::bail!("WEBHOOK_PATH must start with '/': {}", self.webhook_path);
        }
        self.socket_addr()?;
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.listen_addr.parse().map_err(|_| {
            anyhow::anyhow!("LISTEN_ADDR is not a socket address: {}", self.listen_addr)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "WEBHOOK_URL",
        "WEBHOOK_PATH",
        "LISTEN_ADDR",
        "REQUEST_TIMEOUT_SECS",
        "LOG_FILE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");

        let config = TelegramConfig::from_env(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.webhook_url.is_none());
        assert_eq!(config.webhook_path, "/webhook");
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.log_file.is_none());
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("TELEGRAM_API_URL", "http://127.0.0.1:8081");
        env::set_var("WEBHOOK_URL", "https://bot.example.com/hook");
        env::set_var("WEBHOOK_PATH", "/hook");
        env::set_var("LISTEN_ADDR", "127.0.0.1:9000");
        env::set_var("REQUEST_TIMEOUT_SECS", "5");
        env::set_var("LOG_FILE", "logs/hookbot.log");

        let config = TelegramConfig::from_env(Some("cli_token".to_string())).unwrap();
        clear_env();

        assert_eq!(config.bot_token, "cli_token");
        assert_eq!(config.api_url, "http://127.0.0.1:8081");
        assert_eq!(config.webhook_url.as_deref(), Some("https://bot.example.com/hook"));
        assert_eq!(config.webhook_path, "/hook");
        assert_eq!(config.socket_addr().unwrap().port(), 9000);
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.log_file.as_deref(), Some("logs/hookbot.log"));
    }

    #[test]
    #[serial]
    fn test_from_env_requires_token() {
        clear_env();
        let err = TelegramConfig::from_env(None).unwrap_err();
        assert!(err.to_string().contains("BOT_TOKEN"));
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_timeout() {
        clear_env();
        env::set_var("REQUEST_TIMEOUT_SECS", "soon");
        let result = TelegramConfig::from_env(Some("t".to_string()));
        clear_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_invalid_urls_and_paths() {
        let mut config = TelegramConfig::with_token("t");
        config.api_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = TelegramConfig::with_token("t");
        config.webhook_url = Some("::".to_string());
        assert!(config.validate().is_err());

        let mut config = TelegramConfig::with_token("t");
        config.webhook_path = "webhook".to_string();
        assert!(config.validate().is_err());

        let mut config = TelegramConfig::with_token("t");
        config.listen_addr = "localhost".to_string();
        assert!(config.validate().is_err());

        assert!(TelegramConfig::with_token(" ").validate().is_err());
    }
}
