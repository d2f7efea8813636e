//! Single-input rules for immediate feedback while a user types.
//!
//! These complement the record-level [`Validator`](super::Validator): each
//! rule looks at one input in isolation and yields one localised message.

use super::messages::Locale;
use super::rules::EMAIL_PATTERN;
use std::fmt;

/// Core trait implemented by every inline rule.
///
/// # Type Parameters
///
/// * `T` - The type of data being checked (can be unsized like `str`)
///
/// # Examples
///
/// ```no_run
/// use client::validation::inline::InputRule;
///
/// struct NoSpaces;
/// impl InputRule<str> for NoSpaces {
///     type Error = String;
///
///     fn check(&self, input: &str) -> Result<(), Self::Error> {
///         if input.contains(' ') {
///             Err("Spaces are not allowed".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait InputRule<T: ?Sized> {
    type Error;

    /// Check the input and return Ok(()) if valid, or Err with the failure
    fn check(&self, input: &T) -> Result<(), Self::Error>;
}

/// Failure of an inline rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRuleError {
    Empty,
    InvalidEmail,
    TooShort { min_length: usize },
    TooLong { max_length: usize },
    Mismatch,
}

impl InputRuleError {
    /// Get user-facing message in the given language
    pub fn user_message(&self, locale: Locale) -> String {
        match self {
            Self::Empty => locale.required(),
            Self::InvalidEmail => locale.invalid_email(),
            Self::TooShort { min_length } => locale.too_short(*min_length),
            Self::TooLong { max_length } => locale.too_long(*max_length),
            Self::Mismatch => locale.mismatch(),
        }
    }
}

impl fmt::Display for InputRuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message(Locale::default()))
    }
}

impl std::error::Error for InputRuleError {}

pub struct Required;

impl InputRule<str> for Required {
    type Error = InputRuleError;

    fn check(&self, input: &str) -> Result<(), Self::Error> {
        if input.is_empty() {
            Err(InputRuleError::Empty)
        } else {
            Ok(())
        }
    }
}

/// Empty input passes; use together with [`Required`] when needed.
pub struct Email;

impl InputRule<str> for Email {
    type Error = InputRuleError;

    fn check(&self, input: &str) -> Result<(), Self::Error> {
        if input.is_empty() || EMAIL_PATTERN.is_match(input) {
            Ok(())
        } else {
            Err(InputRuleError::InvalidEmail)
        }
    }
}

/// Minimum character count. Unlike the `min` schema rule, empty input fails.
pub struct MinLength(pub usize);

impl InputRule<str> for MinLength {
    type Error = InputRuleError;

    fn check(&self, input: &str) -> Result<(), Self::Error> {
        if input.chars().count() >= self.0 {
            Ok(())
        } else {
            Err(InputRuleError::TooShort { min_length: self.0 })
        }
    }
}

pub struct MaxLength(pub usize);

impl InputRule<str> for MaxLength {
    type Error = InputRuleError;

    fn check(&self, input: &str) -> Result<(), Self::Error> {
        if input.chars().count() <= self.0 {
            Ok(())
        } else {
            Err(InputRuleError::TooLong { max_length: self.0 })
        }
    }
}

/// Input must equal a reference value, e.g. a password confirmation.
pub struct SameAs<'a>(pub &'a str);

impl InputRule<str> for SameAs<'_> {
    type Error = InputRuleError;

    fn check(&self, input: &str) -> Result<(), Self::Error> {
        if input == self.0 {
            Ok(())
        } else {
            Err(InputRuleError::Mismatch)
        }
    }
}

/// Runs `rules` in order and returns the first failure.
pub fn first_failure(
    input: &str,
    rules: &[&dyn InputRule<str, Error = InputRuleError>],
) -> Option<InputRuleError> {
    rules.iter().find_map(|rule| rule.check(input).err())
}

/// Validation state for inline feedback
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationState {
    pub is_valid: bool,
    pub error_message: Option<String>,
}

impl ValidationState {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error_message: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error_message: Some(message.into()),
        }
    }

    pub fn from_result<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => Self::valid(),
            Err(e) => Self::invalid(e.to_string()),
        }
    }

    /// State for `input` after running `rules`, with messages in `locale`.
    pub fn evaluate(
        input: &str,
        rules: &[&dyn InputRule<str, Error = InputRuleError>],
        locale: Locale,
    ) -> Self {
        match first_failure(input, rules) {
            None => Self::valid(),
            Some(error) => Self::invalid(error.user_message(locale)),
        }
    }
}
