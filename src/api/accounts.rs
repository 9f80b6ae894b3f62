use crate::api::ApiClient;
use crate::utils::error::Result;

/// GET /accounts — 列出自訂帳戶
pub async fn list(client: &ApiClient) -> Result<serde_json::Value> {
    client.get_json(&["accounts"]).await
}
