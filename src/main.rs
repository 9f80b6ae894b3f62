use clap::Parser;
use mfcli::config::settings::Settings;
use mfcli::config::Cli;
use mfcli::utils::error::{CliError, ErrorSeverity};
use mfcli::utils::{logger, validation::Validate};

#[tokio::main]
async fn main() {
    // .env 沒有也沒關係，通知後端本來就是選配
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::debug!("Starting mfcli");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    if let Err(e) = mfcli::commands::dispatch(cli, settings).await {
        exit_with(e);
    }
}

fn exit_with(e: CliError) -> ! {
    tracing::error!(
        "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // HTTP 錯誤維持 status + body 的精簡輸出
    if let CliError::HttpStatus { status, body } = &e {
        eprintln!("HTTP {}", status.as_u16());
        if !body.is_empty() {
            match serde_json::from_str::<serde_json::Value>(body) {
                Ok(value) => eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.clone())
                ),
                Err(_) => eprintln!("{}", body),
            }
        }
    } else {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
    }

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
