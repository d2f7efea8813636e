use super::errors::SchemaError;
use super::messages::Locale;
use super::value::{FieldValue, ValidationRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

/// Loose email shape: something, `@`, something, `.`, something.
pub(crate) static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r".+@.+\..+").expect("email pattern is a valid regex"));

/// Name lookup for every registered rule, built on first use.
static RULE_REGISTRY: Lazy<HashMap<&'static str, RuleKind>> = Lazy::new(|| {
    RuleKind::ALL
        .iter()
        .map(|kind| (kind.name(), *kind))
        .collect()
});

/// The registered rule families.
///
/// Adding a rule means adding a variant here and to [`Rule`]; the evaluation
/// loop in [`Validator`](super::Validator) does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Required,
    RequiredWith,
    Email,
    Min,
    Max,
}

impl RuleKind {
    pub const ALL: [RuleKind; 5] = [
        RuleKind::Required,
        RuleKind::RequiredWith,
        RuleKind::Email,
        RuleKind::Min,
        RuleKind::Max,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleKind::Required => "required",
            RuleKind::RequiredWith => "required_with",
            RuleKind::Email => "email",
            RuleKind::Min => "min",
            RuleKind::Max => "max",
        }
    }

    /// Resolves a rule name against the registry.
    pub fn lookup(name: &str) -> Option<RuleKind> {
        RULE_REGISTRY.get(name).copied()
    }

    /// Binds the optional parameter of a specifier to this rule family.
    pub fn bind(self, param: Option<&str>) -> Result<Rule, SchemaError> {
        match self {
            RuleKind::Required => Ok(Rule::Required),
            RuleKind::Email => Ok(Rule::Email),
            RuleKind::RequiredWith => match param {
                Some(field) if !field.is_empty() => Ok(Rule::RequiredWith {
                    field: field.to_string(),
                }),
                _ => Err(SchemaError::MissingParameter { rule: self.name() }),
            },
            RuleKind::Min => self.length_param(param).map(Rule::Min),
            RuleKind::Max => self.length_param(param).map(Rule::Max),
        }
    }

    fn length_param(self, param: Option<&str>) -> Result<usize, SchemaError> {
        let raw = param.ok_or(SchemaError::MissingParameter { rule: self.name() })?;
        raw.trim()
            .parse()
            .map_err(|_| SchemaError::InvalidParameter {
                rule: self.name(),
                value: raw.to_string(),
            })
    }
}

/// A rule with its parameter already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Required unless the referenced field has a value.
    RequiredWith {
        field: String,
    },
    Email,
    Min(usize),
    Max(usize),
}

impl Rule {
    /// Parses one `name` or `name:param` specifier.
    ///
    /// Segments after the parameter are ignored.
    pub fn parse(specifier: &str) -> Result<Rule, SchemaError> {
        let mut segments = specifier.split(':');
        let name = segments.next().unwrap_or_default();
        let param = segments.next();

        let kind = RuleKind::lookup(name).ok_or_else(|| SchemaError::unknown_rule(name))?;
        kind.bind(param)
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Required => RuleKind::Required,
            Rule::RequiredWith { .. } => RuleKind::RequiredWith,
            Rule::Email => RuleKind::Email,
            Rule::Min(_) => RuleKind::Min,
            Rule::Max(_) => RuleKind::Max,
        }
    }

    /// Applies the rule to `value`, returning the failure message on error.
    ///
    /// `record` is only consulted by rules that reference other fields.
    pub fn check(
        &self,
        value: &FieldValue,
        record: &ValidationRecord,
        locale: Locale,
    ) -> Result<(), String> {
        match self {
            Rule::Required => {
                if value.is_truthy() {
                    Ok(())
                } else {
                    Err(locale.required())
                }
            }
            Rule::RequiredWith { field } => {
                let other_present = record.get(field).is_some_and(FieldValue::is_truthy);
                if value.is_truthy() || other_present {
                    Ok(())
                } else {
                    Err(locale.required())
                }
            }
            Rule::Email => {
                if value.is_falsy() || value.as_text().is_some_and(|s| EMAIL_PATTERN.is_match(s))
                {
                    Ok(())
                } else {
                    Err(locale.invalid_email())
                }
            }
            Rule::Min(min) => {
                if value.is_falsy() || value.length().is_some_and(|len| len >= *min) {
                    Ok(())
                } else {
                    Err(locale.too_short(*min))
                }
            }
            Rule::Max(max) => {
                if value.is_falsy() || value.length().is_some_and(|len| len <= *max) {
                    Ok(())
                } else {
                    Err(locale.too_long(*max))
                }
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::RequiredWith { field } => write!(f, "{}:{field}", self.kind().name()),
            Rule::Min(n) | Rule::Max(n) => write!(f, "{}:{n}", self.kind().name()),
            _ => f.write_str(self.kind().name()),
        }
    }
}

/// Parses a full `|`-separated rule expression, preserving rule order.
pub fn parse_expression(expression: &str) -> Result<Vec<Rule>, SchemaError> {
    expression.split('|').map(Rule::parse).collect()
}
