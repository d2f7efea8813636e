use super::{
    LoggingConfig, api::ApiSettings, auth::AuthSettings, limits::*,
    validation::ConfigValidationError,
};
use client::validation::Locale;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Language of validation messages
    locale: Option<Locale>,

    #[serde(default)]
    api: ApiSettings,
    #[serde(default)]
    auth: AuthSettings,
    #[serde(default)]
    logging: LoggingConfig,
}

impl AppConfig {
    /// Validate the configuration against defined limits
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let base_url = self.api.base_url();
        if !URL_SCHEMES.iter().any(|scheme| base_url.starts_with(scheme)) {
            errors.push(ConfigValidationError::BaseUrl {
                configured: base_url.to_string(),
            });
        }

        let timeout = self.api.timeout_secs();
        if !(MIN_REQUEST_TIMEOUT_SECS..=MAX_REQUEST_TIMEOUT_SECS).contains(&timeout) {
            errors.push(ConfigValidationError::Timeout {
                configured: timeout,
                min_limit: MIN_REQUEST_TIMEOUT_SECS,
                max_limit: MAX_REQUEST_TIMEOUT_SECS,
            });
        }

        if !self.api.login_path().starts_with('/') {
            errors.push(ConfigValidationError::LoginPath {
                configured: self.api.login_path().to_string(),
            });
        }

        let level = self.logging.level().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigValidationError::LogLevel {
                configured: self.logging.level().to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }

    // Configuration section accessors
    pub fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub fn auth(&self) -> &AuthSettings {
        &self.auth
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> AppConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.locale(), Locale::PtBr);
        assert!(config.auth().persist());
    }

    #[test]
    fn test_every_problem_is_reported() {
        let config = parse(
            r#"
            [api]
            base_url = "localhost:8080"
            timeout_secs = 0
            login_path = "login"

            [logging]
            level = "loud"
            "#,
        );

        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ConfigValidationError::BaseUrl { .. }));
        assert!(matches!(
            errors[1],
            ConfigValidationError::Timeout { configured: 0, .. }
        ));
        assert!(matches!(errors[2], ConfigValidationError::LoginPath { .. }));
        assert!(matches!(errors[3], ConfigValidationError::LogLevel { .. }));
        assert!(errors[1].user_message().contains("Valid range: 1 - 300"));
    }

    #[test]
    fn test_locale_accepts_language_tags() {
        let config = parse(r#"locale = "pt-BR""#);
        assert_eq!(config.locale(), Locale::PtBr);
        let config = parse(r#"locale = "en""#);
        assert_eq!(config.locale(), Locale::En);
    }
}
