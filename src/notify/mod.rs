pub mod discord;
pub mod telegram;

use crate::config::settings::NotifySettings;
use crate::utils::error::{CliError, Result};
use async_trait::async_trait;

pub use discord::DiscordNotifier;
pub use telegram::TelegramNotifier;

#[derive(Debug, Clone, Default)]
pub struct NotifyMessage {
    pub title: Option<String>,
    pub body: String,
}

impl NotifyMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: None,
            body: body.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// title 與 body 合併成單一文字訊息
    pub fn render(&self) -> String {
        match &self.title {
            Some(title) => format!("{}\n{}", title, self.body),
            None => self.body.clone(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &NotifyMessage) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// 依設定啟用的通知後端集合。逐一送出、收集失敗，
/// 任何後端失敗都不會中斷其他後端。
pub struct NotifyHub {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifyHub {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    pub fn from_settings(settings: &NotifySettings) -> Self {
        let mut notifiers: Vec<Box<dyn Notifier>> = Vec::new();

        if let Some(webhook_url) = settings
            .discord_webhook_url
            .as_ref()
            .filter(|url| !url.is_empty())
        {
            let mut discord = DiscordNotifier::new(webhook_url.clone());
            if let Some(mention) = &settings.discord_mention {
                discord = discord.with_mention(mention.clone());
            }
            notifiers.push(Box::new(discord));
        }

        if let (Some(token), Some(chat_id)) = (
            settings
                .telegram_bot_token
                .as_ref()
                .filter(|token| !token.is_empty()),
            settings
                .telegram_chat_id
                .as_ref()
                .filter(|chat| !chat.is_empty()),
        ) {
            notifiers.push(Box::new(TelegramNotifier::new(
                token.clone(),
                chat_id.clone(),
            )));
        }

        Self { notifiers }
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// 送到所有已啟用的後端。沒有任何後端時退回 stderr。
    pub async fn dispatch(&self, message: &NotifyMessage) -> Result<()> {
        if self.notifiers.is_empty() {
            eprintln!("[notify] {}", message.render());
            return Ok(());
        }

        let mut failures = Vec::new();
        for notifier in &self.notifiers {
            match notifier.send(message).await {
                Ok(()) => {
                    tracing::debug!("Notification delivered via {}", notifier.name());
                }
                Err(e) => {
                    tracing::warn!("Notification via {} failed: {}", notifier.name(), e);
                    failures.push(format!("{}: {}", notifier.name(), e));
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(CliError::Notify(failures.join(" | ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_and_without_title() {
        let message = NotifyMessage::new("session expired");
        assert_eq!(message.render(), "session expired");

        let message = message.with_title("mfcli");
        assert_eq!(message.render(), "mfcli\nsession expired");
    }

    #[test]
    fn test_hub_backend_selection() {
        let hub = NotifyHub::from_settings(&NotifySettings::default());
        assert!(hub.is_empty());

        let hub = NotifyHub::from_settings(&NotifySettings {
            discord_webhook_url: Some("https://discord.test/hook".to_string()),
            ..Default::default()
        });
        assert_eq!(hub.backend_names(), vec!["discord"]);

        // Telegram needs both token and chat id
        let hub = NotifyHub::from_settings(&NotifySettings {
            telegram_bot_token: Some("123:abc".to_string()),
            ..Default::default()
        });
        assert!(hub.is_empty());

        let hub = NotifyHub::from_settings(&NotifySettings {
            discord_webhook_url: Some("https://discord.test/hook".to_string()),
            telegram_bot_token: Some("123:abc".to_string()),
            telegram_chat_id: Some("-100".to_string()),
            ..Default::default()
        });
        assert_eq!(hub.backend_names(), vec!["discord", "telegram"]);
    }

    #[tokio::test]
    async fn test_dispatch_without_backends_falls_back_to_stderr() {
        let hub = NotifyHub::from_settings(&NotifySettings::default());
        let result = hub.dispatch(&NotifyMessage::new("nothing configured")).await;
        assert!(result.is_ok());
    }
}
