pub mod accounts;
pub mod assets;

use crate::config::settings::ApiSettings;
use crate::utils::error::{CliError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use url::Url;

/// mfapi 的 HTTP client。path 片段逐段百分比編碼後接在 base URL 之後。
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub status: u16,
    pub status_text: String,
}

impl StatusReport {
    fn from_status(status: StatusCode) -> Self {
        Self {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
        }
    }
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .default_headers(headers)
            .build()?;

        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, segments: &[&str], ensure: bool) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CliError::Config {
                message: format!("Base URL cannot be used as a base: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        if ensure {
            url.query_pairs_mut().append_pair("ensure", "true");
        }
        Ok(url)
    }

    /// GET，成功時回傳解析後的 JSON
    pub async fn get_json(&self, segments: &[&str]) -> Result<serde_json::Value> {
        let url = self.endpoint(segments, false)?;
        tracing::debug!("GET {}", url);

        let response = self.http.get(url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// 寫入類請求 (POST/PUT/DELETE)，成功時回報 HTTP 狀態
    pub async fn send_mutation<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        ensure: bool,
    ) -> Result<StatusReport> {
        let url = self.endpoint(segments, ensure)?;
        tracing::debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        let response = Self::check_status(response).await?;
        Ok(StatusReport::from_status(response.status()))
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CliError::HttpStatus { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ApiSettings {
            base_url: base.to_string(),
            timeout: Duration::from_secs(30),
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_after_base_path() {
        let client = client("http://localhost:3001/api");
        let url = client.endpoint(&["accounts"], false).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/api/accounts");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client("http://localhost:3001/api");
        let url = client
            .endpoint(&["accounts", "12@ab/cd", "assets"], false)
            .unwrap();
        // '/' inside a segment must not split the path
        assert_eq!(
            url.path(),
            "/api/accounts/12@ab%2Fcd/assets"
        );
    }

    #[test]
    fn test_endpoint_ensure_query() {
        let client = client("http://localhost:3001/api");
        let url = client.endpoint(&["accounts", "1", "assets"], true).unwrap();
        assert_eq!(url.query(), Some("ensure=true"));

        let url = client.endpoint(&["accounts", "1", "assets"], false).unwrap();
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_status_report_text() {
        let report = StatusReport::from_status(StatusCode::CREATED);
        assert_eq!(report.status, 201);
        assert_eq!(report.status_text, "Created");
    }
}
