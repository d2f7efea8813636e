use client::auth::AuthError;
use client::http::ApiError;
use client::validation::{SchemaError, ValidationReport};
use std::fmt::Display;

/// Application-wide error types for the FaceFinder command-line client.
///
/// Library errors (`ApiError`, `AuthError`, `SchemaError`) convert into this
/// type with `?`; [`user_message`](AppError::user_message) renders the text
/// shown to the user while `Display` keeps the technical detail for logs.
///
/// # Error Categories
///
/// ## External Service Errors
/// - [`Api`] - Backend request failures, including rejected sessions
/// - [`Auth`] - Session persistence failures
/// - [`SignedOut`] - A command needs a session and there is none
///
/// ## Input Errors
/// - [`InvalidInput`] - A form failed validation; carries the full report
/// - [`Schema`] - A rule expression could not be compiled
/// - [`Document`] - A JSON document given on the command line is malformed
/// - [`NotAllowed`] - The record's current status forbids the operation
/// - [`Route`] - A path matched no route
///
/// ## System and Configuration Errors
/// - [`Io`] - File system and I/O operation failures
/// - [`Config`] - Configuration loading and validation errors
///
/// [`Api`]: AppError::Api
/// [`Auth`]: AppError::Auth
/// [`SignedOut`]: AppError::SignedOut
/// [`InvalidInput`]: AppError::InvalidInput
/// [`Schema`]: AppError::Schema
/// [`Document`]: AppError::Document
/// [`NotAllowed`]: AppError::NotAllowed
/// [`Route`]: AppError::Route
/// [`Io`]: AppError::Io
/// [`Config`]: AppError::Config
#[derive(Debug)]
pub enum AppError {
    /// Backend request failures.
    ///
    /// An `Unauthorized` inner error means the local session was already
    /// cleared; the user has to sign in again.
    Api(ApiError),

    /// Session persistence failures (unreadable or corrupt credential file).
    Auth(String),

    /// No valid session for a command that needs one.
    SignedOut,

    /// Form input rejected by the validator.
    InvalidInput(ValidationReport),

    /// Rule expression misconfiguration.
    Schema(String),

    /// Malformed JSON input.
    Document(String),

    /// Operation refused for the record in its current state.
    NotAllowed(String),

    /// No route matches the requested path.
    Route(String),

    /// Configuration loading and validation errors.
    Config(String),

    /// File system and I/O operation failures.
    Io(String),
}

impl AppError {
    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(err) if err.is_unauthorized() => {
                "Your session has expired. Please sign in again with `facefinder login`.".to_string()
            }
            AppError::Api(err @ ApiError::Status { .. }) => match err.detail() {
                Some(detail) => detail,
                None => format!("The server rejected the request ({err})."),
            },
            AppError::Api(ApiError::Timeout { .. }) => {
                "The server did not answer in time. Please try again.".to_string()
            }
            AppError::Api(ApiError::RequestFailed { .. }) => {
                "Could not reach the server. Please check api.base_url and your connection."
                    .to_string()
            }
            AppError::Api(err) => err.to_string(),
            AppError::InvalidInput(report) => report
                .errors
                .iter()
                .map(|(field, messages)| format!("{field}: {}", messages.join("; ")))
                .collect::<Vec<_>>()
                .join("\n"),
            AppError::Auth(msg) => format!("Could not access the stored session: {msg}"),
            AppError::SignedOut => {
                "You are not signed in. Please sign in with `facefinder login`.".to_string()
            }
            AppError::Schema(msg) => format!("Invalid validation rules: {msg}"),
            AppError::Document(msg) => format!("Invalid JSON input: {msg}"),
            AppError::NotAllowed(msg) => msg.clone(),
            AppError::Route(path) => format!("No page matches '{path}'."),
            AppError::Config(msg) => msg.clone(),
            AppError::Io(msg) => msg.clone(),
        }
    }

    /// The user has to sign in (again) before retrying.
    pub fn is_unauthorized(&self) -> bool {
        match self {
            AppError::Api(err) => err.is_unauthorized(),
            AppError::SignedOut => true,
            _ => false,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Api(err) => write!(f, "API Error: {err}"),
            AppError::Auth(msg) => write!(f, "Authentication Error: {msg}"),
            AppError::SignedOut => write!(f, "Authentication Error: no active session"),
            AppError::InvalidInput(report) => {
                write!(f, "Validation Error: {} field(s) rejected", report.errors.len())
            }
            AppError::Schema(msg) => write!(f, "Schema Error: {msg}"),
            AppError::Document(msg) => write!(f, "Document Error: {msg}"),
            AppError::NotAllowed(msg) => write!(f, "Operation Not Allowed: {msg}"),
            AppError::Route(path) => write!(f, "Route Error: no route for {path}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Io(msg) => write!(f, "IO Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err.to_string())
    }
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::Schema(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Document(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use client::validation::{Locale, record, validate};

    #[test]
    fn test_unauthorized_message() {
        let err = AppError::from(ApiError::Unauthorized {
            url: "http://localhost:8080/api/collections/list".to_string(),
        });
        assert!(err.is_unauthorized());
        assert!(err.user_message().contains("facefinder login"));
    }

    #[test]
    fn test_status_message_prefers_detail() {
        let err = AppError::from(ApiError::Status {
            url: "http://localhost:8080/api/auth/login".to_string(),
            status: 500,
            body: r#"{"detail": "Usuário ou senha incorretos"}"#.to_string(),
        });
        assert_eq!(err.user_message(), "Usuário ou senha incorretos");
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_invalid_input_lists_fields() {
        let report = validate(
            record([("email", "")]),
            [("email", "required"), ("name", "required")],
            Locale::En,
        )
        .unwrap();
        let err = AppError::InvalidInput(report);
        let message = err.user_message();
        assert!(message.contains("email: "));
        assert!(message.contains("name: "));
        assert_eq!(err.to_string(), "Validation Error: 2 field(s) rejected");
    }

    #[test]
    fn test_schema_error_conversion() {
        let err: AppError = SchemaError::unknown_rule("bogus").into();
        assert_eq!(err.to_string(), "Schema Error: unknown validation rule: bogus");
    }
}
