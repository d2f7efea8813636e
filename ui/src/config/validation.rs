use super::app::AppConfig;

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid api.base_url: {configured}")]
    BaseUrl { configured: String },
    #[error("Invalid api.timeout_secs: {configured} (min: {min_limit}, max: {max_limit})")]
    Timeout {
        configured: u64,
        min_limit: u64,
        max_limit: u64,
    },
    #[error("Invalid api.login_path: {configured}")]
    LoginPath { configured: String },
    #[error("Invalid logging.level: {configured}")]
    LogLevel { configured: String },
}

impl ConfigValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ConfigValidationError::BaseUrl { configured } => {
                format!(
                    "API base URL is not valid!\n\n\
                    Your configured value: {configured}\n\n\
                    Please set api.base_url to an http:// or https:// URL."
                )
            }
            ConfigValidationError::Timeout {
                configured,
                min_limit,
                max_limit,
            } => {
                format!(
                    "Request timeout out of range!\n\n\
                    Your configured value: {configured} seconds\n\
                    Valid range: {min_limit} - {max_limit} seconds\n\n\
                    Please update api.timeout_secs."
                )
            }
            ConfigValidationError::LoginPath { configured } => {
                format!(
                    "Login route is not valid!\n\n\
                    Your configured value: {configured}\n\n\
                    Please set api.login_path to a path starting with '/'."
                )
            }
            ConfigValidationError::LogLevel { configured } => {
                format!(
                    "Unknown log level!\n\n\
                    Your configured value: {configured}\n\n\
                    Please use one of: trace, debug, info, warn, error."
                )
            }
        }
    }
}

/// Configuration loading result
pub enum ConfigLoadResult {
    Success(Box<AppConfig>),
    LoadError(String),
    DeserializeError(String),
}

impl ConfigLoadResult {
    pub fn config(&self) -> Result<&AppConfig, &str> {
        match self {
            ConfigLoadResult::Success(config) => Ok(config),
            ConfigLoadResult::LoadError(msg) | ConfigLoadResult::DeserializeError(msg) => Err(msg),
        }
    }
}
