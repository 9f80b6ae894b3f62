pub mod file;
pub mod settings;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mfcli")]
#[command(about = "CLI client for the MoneyForward ME automation API", version)]
pub struct Cli {
    #[arg(short = 'j', long, global = true, help = "Output raw JSON")]
    pub json: bool,

    #[arg(
        long,
        global = true,
        value_name = "URL",
        help = "Override API base URL (or set MFAPI_BASE_URL)"
    )]
    pub base_url: Option<String>,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Config file path (default: ~/.config/mfcli/config.toml)"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List custom accounts
    Accounts,

    /// Manage assets under an account
    Assets {
        #[command(subcommand)]
        command: AssetsCommand,
    },

    /// Open the persistent browser profile for manual login
    Open(OpenArgs),

    /// Fetch through the persistent browser session
    Fetch {
        #[command(subcommand)]
        command: FetchCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum AssetsCommand {
    /// List assets in an account
    List {
        /// Account connection string (id@subAccountIdHash)
        account: String,
    },

    /// Create an asset in an account
    Create {
        /// Account connection string (id@subAccountIdHash)
        account: String,

        #[command(flatten)]
        fields: AssetFieldArgs,

        #[arg(long, help = "Enable ensure option (if server supports it)")]
        ensure: bool,
    },

    /// Update an asset (assetSubclassId must remain the same as current)
    Update {
        /// Account connection string (id@subAccountIdHash)
        account: String,

        /// Asset ID
        asset_id: String,

        #[command(flatten)]
        fields: AssetFieldArgs,

        #[arg(long, help = "Enable ensure option (if server supports it)")]
        ensure: bool,
    },

    /// Delete an asset
    Delete {
        /// Account connection string (id@subAccountIdHash)
        account: String,

        /// Asset ID
        asset_id: String,

        #[arg(long, help = "Enable ensure option (if server supports it)")]
        ensure: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct AssetFieldArgs {
    #[arg(
        long,
        value_name = "ID",
        help = "assetSubclassId (e.g. Cash, DomesticStock, InvestmentTrust)"
    )]
    pub subclass: String,

    #[arg(long, help = "Asset name")]
    pub name: String,

    #[arg(long, help = "Asset value (number)")]
    pub value: f64,

    #[arg(long, value_name = "PRICE", help = "Entry price (number)")]
    pub entried_price: Option<f64>,

    #[arg(long, value_name = "YYYY/MM/DD", help = "Entry date as string")]
    pub entried_at: Option<String>,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    #[arg(long, value_name = "DIR", help = "Chrome profile directory")]
    pub user_data_dir: Option<PathBuf>,

    #[arg(long, value_name = "URL", help = "Page to open after launch")]
    pub url: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum FetchCommand {
    /// Navigate to a page, capture evidence, and check the login state
    Page(FetchPageArgs),
}

#[derive(Debug, Args)]
pub struct FetchPageArgs {
    /// Page URL (defaults to the configured target)
    pub url: Option<String>,

    #[arg(long, value_name = "DIR", help = "Chrome profile directory")]
    pub user_data_dir: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Evidence output directory")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, help = "Run the browser headless")]
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_accounts() {
        let cli = Cli::try_parse_from(["mfcli", "accounts"]).unwrap();
        assert!(matches!(cli.command, Command::Accounts));
        assert!(!cli.json);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["mfcli", "accounts", "-j", "--base-url", "http://x/api"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.base_url.as_deref(), Some("http://x/api"));
    }

    #[test]
    fn test_parse_assets_create() {
        let cli = Cli::try_parse_from([
            "mfcli", "assets", "create", "12@abc", "--subclass", "Cash", "--name", "貯金",
            "--value", "1000", "--ensure",
        ])
        .unwrap();

        match cli.command {
            Command::Assets {
                command:
                    AssetsCommand::Create {
                        account,
                        fields,
                        ensure,
                    },
            } => {
                assert_eq!(account, "12@abc");
                assert_eq!(fields.subclass, "Cash");
                assert_eq!(fields.name, "貯金");
                assert_eq!(fields.value, 1000.0);
                assert!(fields.entried_price.is_none());
                assert!(ensure);
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_field_options() {
        let result = Cli::try_parse_from(["mfcli", "assets", "create", "12@abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_fetch_page() {
        let cli = Cli::try_parse_from([
            "mfcli",
            "fetch",
            "page",
            "https://moneyforward.com/bs/portfolio",
            "--headless",
            "--data-dir",
            "/tmp/evidence",
        ])
        .unwrap();

        match cli.command {
            Command::Fetch {
                command: FetchCommand::Page(args),
            } => {
                assert_eq!(
                    args.url.as_deref(),
                    Some("https://moneyforward.com/bs/portfolio")
                );
                assert!(args.headless);
                assert_eq!(args.data_dir.as_deref(), Some(std::path::Path::new("/tmp/evidence")));
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }
}
