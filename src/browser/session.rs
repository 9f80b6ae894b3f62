use crate::utils::error::Result;
use anyhow::anyhow;
use headless_chrome::{Browser, LaunchOptions, Tab};
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

const WINDOW_SIZE: (u32, u32) = (1400, 900);

/// URL 命中這個模式就直接視為 logged-out
static LOGIN_URL_PATTERN: OnceLock<Regex> = OnceLock::new();

const VISIBLE_PASSWORD_FIELD_JS: &str = r#"
(() => {
  const field = document.querySelector('input[type="password"], input[name*="password" i]');
  if (!field) return false;
  const style = window.getComputedStyle(field);
  if (style.display === 'none' || style.visibility === 'hidden') return false;
  const rect = field.getBoundingClientRect();
  return rect.width > 0 && rect.height > 0;
})()
"#;

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub user_data_dir: PathBuf,
    pub headless: bool,
    pub idle_timeout: Duration,
}

/// 持續性 Chrome profile 的瀏覽器工作階段。
/// Chrome DevTools client 是同步的，呼叫端應包在 spawn_blocking 裡。
pub struct BrowserSession {
    browser: Browser,
}

impl BrowserSession {
    pub fn launch(options: &SessionOptions) -> Result<Self> {
        std::fs::create_dir_all(&options.user_data_dir)?;

        let launch_options = LaunchOptions::default_builder()
            .headless(options.headless)
            .user_data_dir(Some(options.user_data_dir.clone()))
            .window_size(Some(WINDOW_SIZE))
            .idle_browser_timeout(options.idle_timeout)
            .build()
            .map_err(|e| anyhow!("Could not build launch options: {}", e))?;

        tracing::debug!(
            "Launching browser (profile: {}, headless: {})",
            options.user_data_dir.display(),
            options.headless
        );

        let browser = Browser::new(launch_options)?;
        Ok(Self { browser })
    }

    /// 重複使用 profile 既有的分頁，沒有的話開新的
    pub fn page(&self) -> Result<Arc<Tab>> {
        let existing = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|_| anyhow!("tab registry lock poisoned"))?
            .first()
            .cloned();

        match existing {
            Some(tab) => Ok(tab),
            None => Ok(self.browser.new_tab()?),
        }
    }

    pub fn goto(&self, tab: &Arc<Tab>, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        tab.navigate_to(url)?;
        tab.wait_until_navigated()?;
        Ok(())
    }

    /// logged-out 判定：先看 URL 模式，再檢查可見的 password 欄位
    pub fn looks_logged_out(tab: &Arc<Tab>) -> Result<bool> {
        if url_looks_logged_out(&tab.get_url()) {
            return Ok(true);
        }
        has_visible_password_field(tab)
    }
}

pub fn url_looks_logged_out(url: &str) -> bool {
    let pattern = LOGIN_URL_PATTERN
        .get_or_init(|| Regex::new(r"(?i)sign[_-]?in|login").expect("static pattern"));
    pattern.is_match(url)
}

fn has_visible_password_field(tab: &Arc<Tab>) -> Result<bool> {
    let result = tab.evaluate(VISIBLE_PASSWORD_FIELD_JS, false)?;
    Ok(matches!(result.value, Some(serde_json::Value::Bool(true))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_pattern_detects_login_pages() {
        assert!(url_looks_logged_out("https://moneyforward.com/sign_in"));
        assert!(url_looks_logged_out("https://moneyforward.com/sign-in?from=top"));
        assert!(url_looks_logged_out("https://id.moneyforward.com/signin/email"));
        assert!(url_looks_logged_out("https://example.com/users/LOGIN"));
    }

    #[test]
    fn test_url_pattern_passes_normal_pages() {
        assert!(!url_looks_logged_out("https://moneyforward.com/"));
        assert!(!url_looks_logged_out("https://moneyforward.com/bs/portfolio"));
        assert!(!url_looks_logged_out("https://example.com/assign"));
    }
}
