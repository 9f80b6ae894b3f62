use crate::config::file::FileConfig;
use crate::config::Cli;
use crate::utils::error::Result;
use crate::utils::paths;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_TARGET_URL: &str = "https://moneyforward.com/";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const BASE_URL_ENV: &str = "MFAPI_BASE_URL";
pub const DISCORD_WEBHOOK_ENV: &str = "DISCORD_WEBHOOK_URL";
pub const DISCORD_MENTION_ENV: &str = "DISCORD_MENTION";
pub const TELEGRAM_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_CHAT_ENV: &str = "TELEGRAM_CHAT_ID";

/// 合併後的執行設定。優先順序：CLI 旗標 > 環境變數 > 設定檔 > 預設值。
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub browser: BrowserSettings,
    pub evidence: EvidenceSettings,
    pub notify: NotifySettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct BrowserSettings {
    pub user_data_dir: PathBuf,
    pub target_url: String,
    pub headless: bool,
}

#[derive(Debug, Clone)]
pub struct EvidenceSettings {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct NotifySettings {
    pub discord_webhook_url: Option<String>,
    pub discord_mention: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

impl Settings {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::load_default()?,
        };
        Ok(Self::merge(cli, file))
    }

    fn merge(cli: &Cli, file: FileConfig) -> Self {
        let file_api = file.api.unwrap_or_default();
        let file_browser = file.browser.unwrap_or_default();
        let file_evidence = file.evidence.unwrap_or_default();
        let file_notify = file.notify.unwrap_or_default();

        let base_url = cli
            .base_url
            .clone()
            .or_else(|| env_non_empty(BASE_URL_ENV))
            .or(file_api.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let api = ApiSettings {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(
                file_api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            ),
        };

        let browser = BrowserSettings {
            user_data_dir: file_browser
                .user_data_dir
                .unwrap_or_else(paths::default_user_data_dir),
            target_url: file_browser
                .target_url
                .unwrap_or_else(|| DEFAULT_TARGET_URL.to_string()),
            headless: file_browser.headless.unwrap_or(false),
        };

        let evidence = EvidenceSettings {
            data_dir: file_evidence.data_dir.unwrap_or_else(paths::default_data_dir),
        };

        let notify = NotifySettings {
            discord_webhook_url: env_non_empty(DISCORD_WEBHOOK_ENV)
                .or(file_notify.discord_webhook_url),
            discord_mention: env_non_empty(DISCORD_MENTION_ENV).or(file_notify.discord_mention),
            telegram_bot_token: env_non_empty(TELEGRAM_TOKEN_ENV)
                .or(file_notify.telegram_bot_token),
            telegram_chat_id: env_non_empty(TELEGRAM_CHAT_ENV).or(file_notify.telegram_chat_id),
        };

        Settings {
            api,
            browser,
            evidence,
            notify,
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        validation::validate_positive_number(
            "api.timeout_seconds",
            self.api.timeout.as_secs(),
            1,
        )?;
        validation::validate_url("browser.target_url", &self.browser.target_url)?;
        validation::validate_path(
            "browser.user_data_dir",
            &self.browser.user_data_dir.to_string_lossy(),
        )?;
        validation::validate_path("evidence.data_dir", &self.evidence.data_dir.to_string_lossy())?;
        Ok(())
    }
}
