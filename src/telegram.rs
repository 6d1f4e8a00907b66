use crate::config::TelegramConfig;
use crate::error::SendError;
use crate::input::project_name_of;
use crate::message::format_error_alert;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Total time allowed for one API call, connect included.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends one form-encoded POST and returns the HTTP status code.
pub trait Transport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<u16>;
}

/// Blocking HTTP transport backed by reqwest.
pub struct HttpTransport {
    timeout: Duration,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            timeout: SEND_TIMEOUT,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<u16> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .context("cannot create HTTP client")?;

        let start = std::time::Instant::now();
        // without_url keeps the bot token out of the error text
        let response = client
            .post(url)
            .form(form)
            .send()
            .map_err(|e| e.without_url())
            .with_context(|| format!("request failed after {}ms", start.elapsed().as_millis()))?;

        debug!(
            status = response.status().as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "telegram API responded"
        );
        Ok(response.status().as_u16())
    }
}

/// Delivers messages to the chat named in a [`TelegramConfig`].
pub struct Notifier<'a, T: Transport> {
    config: &'a TelegramConfig,
    transport: &'a T,
}

impl<'a, T: Transport> Notifier<'a, T> {
    pub fn new(config: &'a TelegramConfig, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// One `sendMessage` call in HTML parse mode. Anything but 200 is a failure.
    pub fn send_message(&self, text: &str) -> Result<(), SendError> {
        if self.config.bot_token.is_empty() || self.config.chat_id.is_empty() {
            return Err(SendError::MissingCredentials);
        }

        let url = format!(
            "{}/bot{}/sendMessage",
            self.config.api_base, self.config.bot_token
        );
        let form = [
            ("chat_id", self.config.chat_id.as_str()),
            ("text", text),
            ("parse_mode", "HTML"),
        ];

        debug!(chat_id = %self.config.chat_id, len = text.len(), "sending telegram message");
        match self.transport.post_form(&url, &form) {
            Ok(200) => Ok(()),
            Ok(status) => Err(SendError::Status(status)),
            Err(e) => Err(SendError::Transport(e)),
        }
    }

    /// Best-effort alert about a failed hook run. Never fails.
    pub fn send_error_notification(&self, process_dir: &Path, error: &str) {
        let project = project_name_of(process_dir);
        let text = format_error_alert(&project, error, &Local::now());

        if let Err(e) = self.send_message(&text) {
            debug!(error = %e, "error notification not delivered");
        }
    }
}

/// Sends an error alert when credentials can be found from `process_dir`.
pub fn alert_from_dir<T: Transport>(process_dir: &Path, transport: &T, error: &str) {
    match TelegramConfig::load(process_dir) {
        Ok(config) => {
            Notifier::new(&config, transport).send_error_notification(process_dir, error)
        }
        Err(e) => debug!(error = %e, "no telegram config for error alert"),
    }
}
