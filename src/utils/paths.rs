use chrono::{DateTime, Local};
use std::path::PathBuf;

/// 預設的 Chrome 設定檔目錄 (~/.config/mfcli/chrome-profile)
pub fn default_user_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mfcli")
        .join("chrome-profile")
}

/// 預設的 config.toml 路徑 (~/.config/mfcli/config.toml)
pub fn default_config_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("mfcli")
        .join("config.toml")
}

pub fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

/// Evidence 檔名用的時間戳標籤，例如 20260806-101530
pub fn timestamp_label(at: DateTime<Local>) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

pub fn now_label() -> String {
    timestamp_label(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_label_format() {
        let at = Local.with_ymd_and_hms(2026, 8, 6, 9, 5, 3).unwrap();
        assert_eq!(timestamp_label(at), "20260806-090503");
    }

    #[test]
    fn test_default_dirs_are_non_empty() {
        assert!(default_user_data_dir().ends_with("chrome-profile"));
        assert!(default_config_file().ends_with("config.toml"));
        assert_eq!(default_data_dir(), PathBuf::from("./data"));
    }
}
