use crate::utils::error::{CliError, Result};
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 選用的 TOML 設定檔 (~/.config/mfcli/config.toml)。
/// 所有欄位皆為選填，CLI 旗標與環境變數的優先度較高。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub api: Option<ApiSection>,
    pub browser: Option<BrowserSection>,
    pub evidence: Option<EvidenceSection>,
    pub notify: Option<NotifySection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrowserSection {
    pub user_data_dir: Option<PathBuf>,
    pub target_url: Option<String>,
    pub headless: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvidenceSection {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifySection {
    pub discord_webhook_url: Option<String>,
    pub discord_mention: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl FileConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CliError::Io)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CliError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 載入預設路徑的設定檔，檔案不存在時回傳空設定
    pub fn load_default() -> Result<Self> {
        let path = paths::default_config_file();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 替換環境變數 (例如 ${DISCORD_WEBHOOK_URL})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_config() {
        let toml_content = r#"
[api]
base_url = "http://localhost:3001/api"
timeout_seconds = 10

[browser]
target_url = "https://moneyforward.com/"
headless = true

[evidence]
data_dir = "./evidence"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        let api = config.api.unwrap();
        assert_eq!(api.base_url.as_deref(), Some("http://localhost:3001/api"));
        assert_eq!(api.timeout_seconds, Some(10));

        let browser = config.browser.unwrap();
        assert_eq!(browser.headless, Some(true));
        assert!(config.notify.is_none());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.api.is_none());
        assert!(config.browser.is_none());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MFCLI_TEST_WEBHOOK", "https://discord.test/hook");

        let toml_content = r#"
[notify]
discord_webhook_url = "${MFCLI_TEST_WEBHOOK}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.notify.unwrap().discord_webhook_url.as_deref(),
            Some("https://discord.test/hook")
        );

        std::env::remove_var("MFCLI_TEST_WEBHOOK");
    }

    #[test]
    fn test_unresolved_env_var_left_verbatim() {
        let toml_content = r#"
[notify]
telegram_bot_token = "${MFCLI_TEST_DOES_NOT_EXIST}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.notify.unwrap().telegram_bot_token.as_deref(),
            Some("${MFCLI_TEST_DOES_NOT_EXIST}")
        );
    }

    #[test]
    fn test_invalid_toml_reports_field() {
        let result = FileConfig::from_toml_str("[api\nbase_url = 1");
        match result {
            Err(CliError::ConfigValidation { field, .. }) => assert_eq!(field, "toml_parsing"),
            other => panic!("Expected ConfigValidation error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[api]
base_url = "https://api.example.com"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.api.unwrap().base_url.as_deref(),
            Some("https://api.example.com")
        );
    }
}
