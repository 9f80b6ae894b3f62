use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 一次 fetch 產出的三個檔案：HTML 快照、整頁截圖、metadata sidecar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidencePaths {
    pub html: PathBuf,
    pub screenshot: PathBuf,
    pub metadata: PathBuf,
}

pub fn evidence_paths(data_dir: &Path, label: &str) -> EvidencePaths {
    EvidencePaths {
        html: data_dir.join(format!("{}.html", label)),
        screenshot: data_dir.join(format!("{}.png", label)),
        metadata: data_dir.join(format!("{}.json", label)),
    }
}

/// metadata sidecar 的內容，寫完之後這個工具不會再讀它
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EvidenceMeta {
    pub label: String,
    pub requested_url: String,
    pub final_url: String,
    pub title: String,
    pub fetched_at: DateTime<Utc>,
    pub logged_out: bool,
    pub html_path: PathBuf,
    pub screenshot_path: PathBuf,
}

pub fn write_evidence(
    paths: &EvidencePaths,
    meta: &EvidenceMeta,
    html: &str,
    screenshot: &[u8],
) -> Result<()> {
    if let Some(parent) = paths.metadata.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&paths.html, html)?;
    std::fs::write(&paths.screenshot, screenshot)?;
    std::fs::write(&paths.metadata, serde_json::to_vec_pretty(meta)?)?;

    tracing::debug!("Evidence written under {}", paths.metadata.display());
    Ok(())
}
