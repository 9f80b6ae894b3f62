use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("HTTP {status}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Browser automation failed: {0}")]
    Browser(#[from] anyhow::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Notification delivery failed: {0}")]
    Notify(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Api,
    Http,
    Io,
    Browser,
    Config,
    Notify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CliError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CliError::Api(_) => ErrorCategory::Api,
            CliError::HttpStatus { .. } => ErrorCategory::Http,
            CliError::Io(_) => ErrorCategory::Io,
            CliError::Serialization(_) => ErrorCategory::Api,
            CliError::Browser(_) => ErrorCategory::Browser,
            CliError::Url(_)
            | CliError::Config { .. }
            | CliError::ConfigValidation { .. }
            | CliError::InvalidConfigValue { .. }
            | CliError::MissingConfig { .. } => ErrorCategory::Config,
            CliError::Notify(_) => ErrorCategory::Notify,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CliError::Notify(_) => ErrorSeverity::Low,
            CliError::Url(_)
            | CliError::Config { .. }
            | CliError::ConfigValidation { .. }
            | CliError::InvalidConfigValue { .. }
            | CliError::MissingConfig { .. } => ErrorSeverity::Medium,
            CliError::Api(_) | CliError::HttpStatus { .. } | CliError::Serialization(_) => {
                ErrorSeverity::High
            }
            CliError::Io(_) | CliError::Browser(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Api => {
                "Check that the API server is running and --base-url / MFAPI_BASE_URL points at it"
                    .to_string()
            }
            ErrorCategory::Http => {
                "Inspect the printed status and body; the request reached the server but was rejected"
                    .to_string()
            }
            ErrorCategory::Io => {
                "Check filesystem permissions and that the output directories are writable"
                    .to_string()
            }
            ErrorCategory::Browser => {
                "Make sure Chrome is installed and the profile directory is not locked by another browser"
                    .to_string()
            }
            ErrorCategory::Config => {
                "Fix the configuration value and re-run; see --help for the expected flags"
                    .to_string()
            }
            ErrorCategory::Notify => {
                "Check DISCORD_WEBHOOK_URL / TELEGRAM_BOT_TOKEN + TELEGRAM_CHAT_ID".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CliError::Api(e) => format!("Could not reach the API: {}", e),
            CliError::HttpStatus { status, .. } => {
                format!("The API rejected the request with status {}", status)
            }
            CliError::Io(e) => format!("File operation failed: {}", e),
            CliError::Serialization(e) => format!("Could not process the response: {}", e),
            CliError::Browser(e) => format!("Browser automation failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let err = CliError::Notify("discord: boom".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert_eq!(err.category(), ErrorCategory::Notify);

        let err = CliError::MissingConfig {
            field: "api.base_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = CliError::HttpStatus {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "{}".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.category(), ErrorCategory::Http);
    }

    #[test]
    fn test_http_status_display() {
        let err = CliError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }
}
