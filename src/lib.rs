pub mod api;
pub mod browser;
pub mod commands;
pub mod config;
pub mod notify;
pub mod output;
pub mod utils;

pub use api::{ApiClient, StatusReport};
pub use config::settings::Settings;
pub use config::Cli;
pub use utils::error::{CliError, Result};
