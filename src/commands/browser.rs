use crate::browser::evidence::{self, EvidenceMeta};
use crate::browser::session::{BrowserSession, SessionOptions};
use crate::config::settings::Settings;
use crate::config::{FetchPageArgs, OpenArgs};
use crate::notify::{NotifyHub, NotifyMessage};
use crate::output;
use crate::utils::error::{CliError, Result};
use crate::utils::paths;
use chrono::Utc;
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use std::time::Duration;

// `open` 要撐過手動登入，idle timeout 放寬到一小時
const OPEN_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);
const FETCH_IDLE_TIMEOUT: Duration = Duration::from_secs(120);

/// 啟動持續性 profile 供手動登入，按 Enter 後才關閉瀏覽器
pub async fn open(settings: &Settings, args: OpenArgs) -> Result<()> {
    let options = SessionOptions {
        user_data_dir: args
            .user_data_dir
            .unwrap_or_else(|| settings.browser.user_data_dir.clone()),
        headless: false,
        idle_timeout: OPEN_IDLE_TIMEOUT,
    };
    let target = args
        .url
        .unwrap_or_else(|| settings.browser.target_url.clone());

    tokio::task::spawn_blocking(move || -> Result<()> {
        let session = BrowserSession::launch(&options)?;
        let tab = session.page()?;
        session.goto(&tab, &target)?;

        println!("🌐 Browser ready at {}", target);
        println!("   Log in if needed, then press Enter here to close.");
        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        Ok(())
    })
    .await
    .map_err(|e| CliError::Browser(anyhow::Error::new(e)))?
}

/// 透過持續性 session 抓頁面：存證據、跑 logged-out 判定、必要時送通知
pub async fn fetch_page(settings: &Settings, json: bool, args: FetchPageArgs) -> Result<()> {
    let options = SessionOptions {
        user_data_dir: args
            .user_data_dir
            .unwrap_or_else(|| settings.browser.user_data_dir.clone()),
        headless: args.headless || settings.browser.headless,
        idle_timeout: FETCH_IDLE_TIMEOUT,
    };
    let url = args
        .url
        .unwrap_or_else(|| settings.browser.target_url.clone());
    let data_dir = args
        .data_dir
        .unwrap_or_else(|| settings.evidence.data_dir.clone());
    let label = paths::now_label();

    let meta = tokio::task::spawn_blocking(move || -> Result<EvidenceMeta> {
        let session = BrowserSession::launch(&options)?;
        let tab = session.page()?;
        session.goto(&tab, &url)?;

        let html = tab.get_content()?;
        let screenshot =
            tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)?;
        let title = tab.get_title()?;
        let final_url = tab.get_url();
        let logged_out = BrowserSession::looks_logged_out(&tab)?;

        let files = evidence::evidence_paths(&data_dir, &label);
        let meta = EvidenceMeta {
            label,
            requested_url: url,
            final_url,
            title,
            fetched_at: Utc::now(),
            logged_out,
            html_path: files.html.clone(),
            screenshot_path: files.screenshot.clone(),
        };
        evidence::write_evidence(&files, &meta, &html, &screenshot)?;
        Ok(meta)
    })
    .await
    .map_err(|e| CliError::Browser(anyhow::Error::new(e)))??;

    if meta.logged_out {
        tracing::warn!("Session looks logged out at {}", meta.final_url);
        notify_logged_out(settings, &meta).await;
    }

    output::print_fetch(&meta, json)
}

/// 通知失敗只回報不中斷，fetch 本身照常結束
async fn notify_logged_out(settings: &Settings, meta: &EvidenceMeta) {
    let hub = NotifyHub::from_settings(&settings.notify);
    let message = NotifyMessage::new(format!(
        "Logged-out session detected at {} (evidence {})",
        meta.final_url, meta.label
    ))
    .with_title("mfcli session check");

    if let Err(e) = hub.dispatch(&message).await {
        eprintln!("⚠️  {}", e);
    }
}
