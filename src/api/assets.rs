use crate::api::{ApiClient, StatusReport};
use crate::utils::error::Result;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// 資產的請求 payload。欄位名稱沿用 mfapi 的 camelCase；
/// 選填欄位未提供時整個省略，不會序列化成 null。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,

    pub asset_subclass_id: String,

    pub name: String,

    pub value: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entried_price: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entried_at: Option<String>,
}

impl AssetPayload {
    pub fn new(subclass: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            asset_id: None,
            asset_subclass_id: subclass.into(),
            name: name.into(),
            value,
            entried_price: None,
            entried_at: None,
        }
    }

    pub fn with_entried_price(mut self, price: Option<f64>) -> Self {
        self.entried_price = price;
        self
    }

    pub fn with_entried_at(mut self, at: Option<String>) -> Self {
        self.entried_at = at;
        self
    }

    /// update 時 body 需要帶 assetId
    pub fn with_asset_id(mut self, asset_id: impl Into<String>) -> Self {
        self.asset_id = Some(asset_id.into());
        self
    }
}

/// GET /accounts/{account}/assets
pub async fn list(client: &ApiClient, account: &str) -> Result<serde_json::Value> {
    client.get_json(&["accounts", account, "assets"]).await
}

/// POST /accounts/{account}/assets
pub async fn create(
    client: &ApiClient,
    account: &str,
    payload: &AssetPayload,
    ensure: bool,
) -> Result<StatusReport> {
    client
        .send_mutation(
            Method::POST,
            &["accounts", account, "assets"],
            Some(payload),
            ensure,
        )
        .await
}

/// PUT /accounts/{account}/assets/{asset_id}
pub async fn update(
    client: &ApiClient,
    account: &str,
    asset_id: &str,
    payload: &AssetPayload,
    ensure: bool,
) -> Result<StatusReport> {
    client
        .send_mutation(
            Method::PUT,
            &["accounts", account, "assets", asset_id],
            Some(payload),
            ensure,
        )
        .await
}

/// DELETE /accounts/{account}/assets/{asset_id}
pub async fn delete(
    client: &ApiClient,
    account: &str,
    asset_id: &str,
    ensure: bool,
) -> Result<StatusReport> {
    client
        .send_mutation::<()>(
            Method::DELETE,
            &["accounts", account, "assets", asset_id],
            None,
            ensure,
        )
        .await
}
