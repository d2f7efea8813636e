use super::errors::SchemaError;
use super::rules::{Rule, parse_expression};
use indexmap::IndexMap;

/// A compiled validation schema.
///
/// Maps each field, in declaration order, to the rules parsed from its rule
/// expression. Expressions are parsed once when the schema is built, so an
/// unknown rule name is reported here rather than on every evaluation.
///
/// # Examples
///
/// ```no_run
/// use client::validation::ValidationSchema;
///
/// let schema = ValidationSchema::parse([
///     ("email", "required|email"),
///     ("password", "required|min:6"),
/// ])?;
/// assert_eq!(schema.len(), 2);
/// # Ok::<(), client::validation::SchemaError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationSchema {
    fields: IndexMap<String, Vec<Rule>>,
}

impl ValidationSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `(field, expression)` pairs in iteration order.
    pub fn parse<I, K, V>(entries: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        entries
            .into_iter()
            .try_fold(Self::new(), |schema, (field, expression)| {
                schema.field(field, expression.as_ref())
            })
    }

    /// Compiles a JSON object of `field: "expression"` entries, keeping the
    /// document's key order.
    pub fn from_json(document: &str) -> Result<Self, SchemaError> {
        let entries: IndexMap<String, String> = serde_json::from_str(document)?;
        Self::parse(entries)
    }

    /// Adds (or redeclares) a field.
    ///
    /// A redeclared field keeps its original position.
    pub fn field(mut self, field: impl Into<String>, expression: &str) -> Result<Self, SchemaError> {
        let field = field.into();
        let rules = parse_expression(expression).inspect_err(|e| {
            log::error!("Invalid rule expression '{expression}' for field '{field}': {e}");
        })?;
        self.fields.insert(field, rules);
        Ok(self)
    }

    pub fn rules(&self, field: &str) -> Option<&[Rule]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_field_order() {
        let schema =
            ValidationSchema::parse([("b", "required"), ("a", "email"), ("c", "max:3")]).unwrap();
        let fields: Vec<&str> = schema.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_redeclared_field_keeps_position() {
        let schema = ValidationSchema::parse([("a", "required"), ("b", "email"), ("a", "min:2")])
            .unwrap();
        let fields: Vec<&str> = schema.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["a", "b"]);
        assert_eq!(schema.rules("a"), Some(&[Rule::Min(2)][..]));
    }

    #[test]
    fn test_unknown_rule_fails_the_whole_schema() {
        let result = ValidationSchema::parse([("name", "required"), ("x", "bogus")]);
        assert!(matches!(result, Err(SchemaError::UnknownRule { name }) if name == "bogus"));
    }

    #[test]
    fn test_from_json_keeps_document_order() {
        let schema =
            ValidationSchema::from_json(r#"{"zeta": "required", "alpha": "min:1|max:2"}"#)
                .unwrap();
        let fields: Vec<&str> = schema.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec!["zeta", "alpha"]);
        assert_eq!(schema.rules("alpha"), Some(&[Rule::Min(1), Rule::Max(2)][..]));
    }

    #[test]
    fn test_from_json_rejects_non_string_expressions() {
        assert!(matches!(
            ValidationSchema::from_json(r#"{"a": 1}"#),
            Err(SchemaError::InvalidDocument(_))
        ));
    }
}
