use super::{Notifier, NotifyMessage};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use serde::Serialize;

pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Telegram Bot API (sendMessage) 通知。
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    api_base: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: &'a str,
    text: String,
    disable_web_page_preview: bool,
}

impl TelegramNotifier {
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// 測試時把 API host 指向 mock server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<()> {
        let payload = SendMessagePayload {
            chat_id: &self.chat_id,
            text: message.render(),
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(self.send_message_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| CliError::Notify(format!("HTTP request failed: {}", e)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(CliError::Notify(format!("http {}: {}", status.as_u16(), body)))
        }
    }

    fn name(&self) -> &'static str {
        "telegram"
    }
}
