//! Login, registration and record creation forms.
//!
//! Each form validates its fields with the rule-based validator before
//! anything is sent to the backend. Limits follow the backend's models
//! (username up to 50 characters, email and collection name up to 100,
//! search name up to 500).

use client::http::{CreateCollectionRequest, CreateSearchRequest, LoginRequest, RegisterRequest};
use client::validation::inline::{InputRule, SameAs};
use client::validation::{
    FieldValue, Locale, SchemaError, ValidationRecord, ValidationReport, record, validate,
};
use std::path::PathBuf;

pub const LOGIN_RULES: [(&str, &str); 2] = [
    ("email", "required|email|max:100"),
    ("password", "required|min:6"),
];

pub const REGISTER_RULES: [(&str, &str); 4] = [
    ("username", "required|max:50"),
    ("email", "required|email|max:100"),
    ("password", "required|min:6"),
    ("password_confirmation", "required_with:password"),
];

pub const COLLECTION_RULES: [(&str, &str); 1] = [("name", "required|max:100")];

pub const SEARCH_RULES: [(&str, &str); 2] = [
    ("name", "required|max:500"),
    ("collections", "required"),
];

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    fn record(&self) -> ValidationRecord {
        record([
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
        ])
    }

    pub fn validate(&self, locale: Locale) -> Result<ValidationReport, SchemaError> {
        validate(self.record(), LOGIN_RULES, locale)
    }

    pub fn into_request(self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    fn record(&self) -> ValidationRecord {
        record([
            ("username", self.username.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password.as_str()),
            ("password_confirmation", self.password_confirmation.as_str()),
        ])
    }

    /// Rule-based checks plus the confirmation match.
    pub fn validate(&self, locale: Locale) -> Result<ValidationReport, SchemaError> {
        let mut report = validate(self.record(), REGISTER_RULES, locale)?;

        if let Err(mismatch) = SameAs(&self.password).check(&self.password_confirmation) {
            report
                .errors
                .entry("password_confirmation".to_string())
                .or_default()
                .push(mismatch.user_message(locale));
            report.status = false;
        }

        Ok(report)
    }

    pub fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectionForm {
    pub name: String,
}

impl CollectionForm {
    pub fn validate(&self, locale: Locale) -> Result<ValidationReport, SchemaError> {
        validate(record([("name", self.name.as_str())]), COLLECTION_RULES, locale)
    }

    pub fn into_request(self) -> CreateCollectionRequest {
        CreateCollectionRequest {
            name: self.name.trim().to_string(),
        }
    }
}

/// A new face search. The tolerance range (0 to 100) is enforced where the
/// value is parsed.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub name: String,
    pub photo: PathBuf,
    pub tolerance_level: i64,
    pub collections: Vec<i64>,
}

impl SearchForm {
    fn record(&self) -> ValidationRecord {
        record([
            ("name", FieldValue::from(self.name.as_str())),
            ("collections", FieldValue::from(self.collections.clone())),
        ])
    }

    pub fn validate(&self, locale: Locale) -> Result<ValidationReport, SchemaError> {
        validate(self.record(), SEARCH_RULES, locale)
    }

    /// Splits the form into the search parameters and the photo to upload.
    pub fn into_request(self) -> (CreateSearchRequest, PathBuf) {
        let request = CreateSearchRequest {
            name: self.name.trim().to_string(),
            tolerance_level: self.tolerance_level,
            collections: self.collections,
        };
        (request, self.photo)
    }
}
