//! Declarative, rule-based validation of form records.
//!
//! A [`ValidationSchema`] maps field names to rule expressions such as
//! `"required|min:3"`. A [`Validator`] evaluates a schema against a
//! [`ValidationRecord`] and reports every failing rule per field.
//!
//! ```no_run
//! use client::validation::{ValidationSchema, Validator, record};
//!
//! let schema = ValidationSchema::parse([("name", "required|min:3")])?;
//! let mut validator = Validator::new(record([("name", "")]), schema);
//! let report = validator.validate();
//! assert!(!report.status);
//! # Ok::<(), client::validation::SchemaError>(())
//! ```

pub mod errors;
pub mod inline;
pub mod messages;
pub mod rules;
pub mod schema;
pub mod value;

pub use errors::SchemaError;
pub use messages::Locale;
pub use rules::{Rule, RuleKind};
pub use schema::ValidationSchema;
pub use value::{FieldValue, ValidationRecord, record};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Failing messages per field, in schema order.
pub type FieldErrors = IndexMap<String, Vec<String>>;

/// Outcome of one evaluation.
///
/// `status` is `true` exactly when `errors` is empty. Fields that passed
/// every rule never appear in `errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: FieldErrors,
    pub status: bool,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.status
    }

    /// Messages for a single field, empty when it passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// First message for a field, as shown inline next to an input.
    pub fn first_message(&self, field: &str) -> Option<&str> {
        self.messages(field).first().map(String::as_str)
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            errors: FieldErrors::new(),
            status: true,
        }
    }
}

/// Evaluates a compiled schema against a record.
///
/// Holds the inputs and the latest errors/status snapshot; nothing else.
#[derive(Debug, Clone)]
pub struct Validator {
    record: ValidationRecord,
    schema: ValidationSchema,
    locale: Locale,
    errors: FieldErrors,
    status: bool,
}

impl Validator {
    pub fn new(record: ValidationRecord, schema: ValidationSchema) -> Self {
        Self {
            record,
            schema,
            locale: Locale::default(),
            errors: FieldErrors::new(),
            status: true,
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Runs every rule of every field and returns the resulting report.
    pub fn validate(&mut self) -> ValidationReport {
        let missing = FieldValue::Null;
        let mut errors = FieldErrors::new();

        for (field, rules) in self.schema.iter() {
            let value = self.record.get(field).unwrap_or(&missing);
            let messages: Vec<String> = rules
                .iter()
                .filter_map(|rule| rule.check(value, &self.record, self.locale).err())
                .collect();

            if !messages.is_empty() {
                errors.insert(field.to_string(), messages);
            }
        }

        self.status = errors.is_empty();
        self.errors = errors;

        log::debug!(
            "Validated {} field(s): {} failing",
            self.schema.len(),
            self.errors.len()
        );

        self.report()
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            errors: self.errors.clone(),
            status: self.status,
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn record(&self) -> &ValidationRecord {
        &self.record
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationRecord::new(), ValidationSchema::new())
    }
}

/// Compiles `expressions` and evaluates them against `record` in one call.
///
/// Any schema error (for example an unknown rule name) aborts the whole call;
/// no partial report is produced.
pub fn validate<I, K, V>(
    record: ValidationRecord,
    expressions: I,
    locale: Locale,
) -> Result<ValidationReport, SchemaError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    let schema = ValidationSchema::parse(expressions)?;
    Ok(Validator::new(record, schema).with_locale(locale).validate())
}
