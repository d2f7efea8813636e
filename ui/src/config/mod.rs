use crate::constants::env_vars::{ENV_PREFIX, ENV_SEPARATOR};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

pub mod api;
pub mod app;
pub mod auth;
pub mod limits;
pub mod validation;

pub use api::ApiSettings;
pub use app::AppConfig;
pub use auth::AuthSettings;
pub use validation::{ConfigLoadResult, ConfigValidationError};

/// File read when no explicit `--config` path is given; optional.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Global configuration loading and access
static CONFIG: OnceLock<ConfigLoadResult> = OnceLock::new();

/// Loads configuration from `path` (or `config.toml` when present) layered
/// with `FACEFINDER__SECTION__KEY` environment variables.
///
/// An explicit path must exist; the default file may be absent.
pub fn load_config(path: Option<&Path>) -> ConfigLoadResult {
    dotenv::dotenv().ok();

    let file_source = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let env_source = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true);

    let config = match Config::builder()
        .add_source(file_source)
        .add_source(env_source) // environment entries override file values
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            return ConfigLoadResult::LoadError(format!(
                "Configuration loading failed: {e}. Please check your config file and environment variables."
            ));
        }
    };

    match config.try_deserialize::<AppConfig>() {
        Ok(app_config) => ConfigLoadResult::Success(Box::new(app_config)),
        Err(e) => ConfigLoadResult::DeserializeError(format!("Failed to deserialize config: {e}")),
    }
}

/// Loads the process-wide configuration once; later calls return the cached
/// result and ignore `path`.
pub fn init_config(path: Option<&Path>) -> &'static ConfigLoadResult {
    CONFIG.get_or_init(|| load_config(path))
}

pub fn get_config() -> &'static ConfigLoadResult {
    init_config(None)
}

/// Logging configuration
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl LoggingConfig {
    pub fn new(level: Option<&str>, file: Option<&str>) -> Self {
        Self {
            level: level.map(str::to_string),
            file: file.map(str::to_string),
        }
    }

    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }
}
