use thiserror::Error;

/// Errors raised while compiling a validation schema.
///
/// These are programming errors in the schema itself, not problems with the
/// submitted data. Data problems are reported through
/// [`ValidationReport`](super::ValidationReport) instead.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("unknown validation rule: {name}")]
    UnknownRule { name: String },

    #[error("validation rule '{rule}' requires a parameter")]
    MissingParameter { rule: &'static str },

    #[error("validation rule '{rule}' has an invalid parameter: '{value}'")]
    InvalidParameter { rule: &'static str, value: String },

    #[error("invalid schema document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl SchemaError {
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }
}
