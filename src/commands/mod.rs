pub mod api;
pub mod browser;

use crate::config::settings::Settings;
use crate::config::{Cli, Command, FetchCommand};
use crate::utils::error::Result;

pub async fn dispatch(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Command::Accounts => api::accounts(&settings, cli.json).await,
        Command::Assets { command } => api::assets(&settings, cli.json, command).await,
        Command::Open(args) => browser::open(&settings, args).await,
        Command::Fetch {
            command: FetchCommand::Page(args),
        } => browser::fetch_page(&settings, cli.json, args).await,
    }
}
