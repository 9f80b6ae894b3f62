use crate::api::assets::AssetPayload;
use crate::api::{self, ApiClient};
use crate::config::settings::Settings;
use crate::config::{AssetFieldArgs, AssetsCommand};
use crate::output;
use crate::utils::error::Result;

pub async fn accounts(settings: &Settings, json: bool) -> Result<()> {
    let client = ApiClient::new(&settings.api)?;
    let value = api::accounts::list(&client).await?;
    output::print_value(&value, json)
}

pub async fn assets(settings: &Settings, json: bool, command: AssetsCommand) -> Result<()> {
    let client = ApiClient::new(&settings.api)?;

    match command {
        AssetsCommand::List { account } => {
            let value = api::assets::list(&client, &account).await?;
            output::print_value(&value, json)
        }
        AssetsCommand::Create {
            account,
            fields,
            ensure,
        } => {
            let payload = payload_from_args(&fields);
            let report = api::assets::create(&client, &account, &payload, ensure).await?;
            tracing::info!("Asset created in {}", account);
            output::print_status(&report, json)
        }
        AssetsCommand::Update {
            account,
            asset_id,
            fields,
            ensure,
        } => {
            let payload = payload_from_args(&fields).with_asset_id(asset_id.clone());
            let report =
                api::assets::update(&client, &account, &asset_id, &payload, ensure).await?;
            tracing::info!("Asset {} updated", asset_id);
            output::print_status(&report, json)
        }
        AssetsCommand::Delete {
            account,
            asset_id,
            ensure,
        } => {
            let report = api::assets::delete(&client, &account, &asset_id, ensure).await?;
            tracing::info!("Asset {} deleted", asset_id);
            output::print_status(&report, json)
        }
    }
}

fn payload_from_args(fields: &AssetFieldArgs) -> AssetPayload {
    AssetPayload::new(fields.subclass.clone(), fields.name.clone(), fields.value)
        .with_entried_price(fields.entried_price)
        .with_entried_at(fields.entried_at.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_from_args() {
        let fields = AssetFieldArgs {
            subclass: "Cash".to_string(),
            name: "普通預金".to_string(),
            value: 150000.0,
            entried_price: None,
            entried_at: Some("2026/08/06".to_string()),
        };

        let payload = payload_from_args(&fields);
        assert_eq!(payload.asset_subclass_id, "Cash");
        assert_eq!(payload.value, 150000.0);
        assert!(payload.entried_price.is_none());
        assert_eq!(payload.entried_at.as_deref(), Some("2026/08/06"));
        assert!(payload.asset_id.is_none());
    }
}
