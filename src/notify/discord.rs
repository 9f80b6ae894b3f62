use super::{Notifier, NotifyMessage};
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;
use serde::Serialize;

/// Discord webhook 通知。content 形如 "<mention> <title>\n<body>"。
pub struct DiscordNotifier {
    webhook_url: String,
    mention: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct WebhookPayload {
    content: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            mention: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_mention(mut self, mention: impl Into<String>) -> Self {
        self.mention = Some(mention.into());
        self
    }

    fn format_content(&self, message: &NotifyMessage) -> String {
        let mut content = String::new();
        if let Some(mention) = &self.mention {
            content.push_str(mention);
            content.push(' ');
        }
        content.push_str(&message.render());
        content.trim().to_string()
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send(&self, message: &NotifyMessage) -> Result<()> {
        let payload = WebhookPayload {
            content: self.format_content(message),
        };

        let response = self
            .client
            .post(&self.webhook_url)
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
        "discord"
    }
}
