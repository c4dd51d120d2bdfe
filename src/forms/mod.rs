//! Declarative form validation.
//!
//! Rules are attached per field and re-evaluated on every change, not
//! only at submit time. A [`FormState`] blocks submission while any
//! field fails or while a prior submission is still in flight, and it
//! never discards entered values on failure. Validation failures stay
//! local; they are not [`crate::ApiError`]s and never reach the
//! network.

pub mod schemas;

use std::collections::HashMap;

use regex::Regex;

/// A single field's current value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    #[default]
    Missing,
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            FieldValue::Missing => true,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::Flag(_) => false,
        }
    }
}

/// One declarative rule. Length and pattern rules only apply to
/// non-empty text; emptiness is `Required`'s concern.
#[derive(Debug, Clone)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern { regex: Regex, message: String },
    Min(f64),
    Max(f64),
}

impl Rule {
    fn check(&self, field: &str, value: &FieldValue) -> Option<FieldError> {
        let fail = |message: String| Some(FieldError::new(field, message));
        match self {
            Rule::Required => value
                .is_empty()
                .then(|| FieldError::new(field, format!("{field} is required"))),
            Rule::MinLength(min) => match value.as_text() {
                Some(text) if !text.trim().is_empty() && text.chars().count() < *min => {
                    fail(format!("{field} must be at least {min} characters"))
                }
                _ => None,
            },
            Rule::MaxLength(max) => match value.as_text() {
                Some(text) if text.chars().count() > *max => {
                    fail(format!("{field} must be at most {max} characters"))
                }
                _ => None,
            },
            Rule::Pattern { regex, message } => match value.as_text() {
                Some(text) if !text.trim().is_empty() && !regex.is_match(text) => {
                    fail(message.clone())
                }
                _ => None,
            },
            Rule::Min(min) => match value.as_number() {
                Some(number) if number < *min => fail(format!("{field} must be at least {min}")),
                _ => None,
            },
            Rule::Max(max) => match value.as_number() {
                Some(number) if number > *max => fail(format!("{field} must be at most {max}")),
                _ => None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Cross-field rule evaluated against the whole value map.
pub type CrossRule = fn(&HashMap<String, FieldValue>) -> Option<FieldError>;

/// A form's declared fields and rules.
#[derive(Debug, Clone, Default)]
pub struct FormSchema {
    fields: Vec<(String, Vec<Rule>)>,
    cross: Vec<CrossRule>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rules: impl Into<Vec<Rule>>) -> Self {
        self.fields.push((name.into(), rules.into()));
        self
    }

    pub fn cross_rule(mut self, rule: CrossRule) -> Self {
        self.cross.push(rule);
        self
    }

    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter(|(field, _)| field == name)
            .flat_map(|(field, rules)| {
                rules.iter().filter_map(|rule| rule.check(field, value))
            })
            .collect()
    }

    pub fn validate(&self, values: &HashMap<String, FieldValue>) -> Vec<FieldError> {
        let missing = FieldValue::Missing;
        let mut errors: Vec<FieldError> = self
            .fields
            .iter()
            .flat_map(|(field, rules)| {
                let value = values.get(field).unwrap_or(&missing);
                rules
                    .iter()
                    .filter_map(move |rule| rule.check(field, value))
            })
            .collect();
        errors.extend(self.cross.iter().filter_map(|rule| rule(values)));
        errors
    }
}

/// Typed form state bound to a schema.
#[derive(Debug, Clone)]
pub struct FormState {
    schema: FormSchema,
    values: HashMap<String, FieldValue>,
    errors: Vec<FieldError>,
    submit_error: Option<String>,
    in_flight: bool,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Self {
        Self {
            schema,
            values: HashMap::new(),
            errors: Vec::new(),
            submit_error: None,
            in_flight: false,
        }
    }

    /// Set a field and re-validate immediately.
    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        self.values.insert(field, value);
        self.errors = self.schema.validate(&self.values);
    }

    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn field_errors(&self, field: &str) -> Vec<&FieldError> {
        self.errors.iter().filter(|err| err.field == field).collect()
    }

    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    pub fn is_valid(&self) -> bool {
        self.schema.validate(&self.values).is_empty()
    }

    pub fn can_submit(&self) -> bool {
        !self.in_flight && self.is_valid()
    }

    /// Mark a submission as started. Returns `false` (and does
    /// nothing) while the form is invalid or a submission is already
    /// in flight.
    pub fn begin_submit(&mut self) -> bool {
        self.errors = self.schema.validate(&self.values);
        if self.in_flight || !self.errors.is_empty() {
            return false;
        }
        self.in_flight = true;
        self.submit_error = None;
        true
    }

    /// Record the submission outcome. Entered values survive a
    /// failure so the user can resubmit.
    pub fn finish_submit(&mut self, outcome: Result<(), String>) {
        self.in_flight = false;
        self.submit_error = outcome.err();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FormSchema {
        FormSchema::new()
            .field("name", vec![Rule::Required, Rule::MinLength(2)])
            .field(
                "email",
                vec![
                    Rule::Required,
                    Rule::Pattern {
                        regex: Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap(),
                        message: "email must be a valid address".into(),
                    },
                ],
            )
            .field("quantity", vec![Rule::Min(1.0), Rule::Max(99.0)])
    }

    #[test]
    fn required_fails_on_missing_and_blank() {
        let schema = schema();
        assert!(!schema.validate_field("name", &FieldValue::Missing).is_empty());
        assert!(!schema.validate_field("name", &FieldValue::text("   ")).is_empty());
        assert!(schema.validate_field("name", &FieldValue::text("Ada")).is_empty());
    }

    #[test]
    fn pattern_only_applies_to_non_empty_text() {
        let schema = schema();
        let errors = schema.validate_field("email", &FieldValue::text("not-an-email"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, "email must be a valid address");

        // Blank text trips Required, not the pattern.
        let errors = schema.validate_field("email", &FieldValue::text(""));
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("required"));
    }

    #[test]
    fn numeric_bounds() {
        let schema = schema();
        assert!(!schema.validate_field("quantity", &FieldValue::Number(0.0)).is_empty());
        assert!(!schema.validate_field("quantity", &FieldValue::Number(100.0)).is_empty());
        assert!(schema.validate_field("quantity", &FieldValue::Number(5.0)).is_empty());
    }

    #[test]
    fn set_revalidates_on_every_change() {
        let mut form = FormState::new(schema());
        form.set("name", FieldValue::text("A"));
        assert!(!form.field_errors("name").is_empty());

        form.set("name", FieldValue::text("Ada"));
        assert!(form.field_errors("name").is_empty());
    }

    #[test]
    fn submission_blocked_while_invalid_or_in_flight() {
        let mut form = FormState::new(schema());
        assert!(!form.begin_submit());

        form.set("name", FieldValue::text("Ada"));
        form.set("email", FieldValue::text("ada@example.com"));
        assert!(form.begin_submit());

        // Second submission while the first is in flight.
        assert!(!form.begin_submit());

        form.finish_submit(Err("server rejected".into()));
        assert_eq!(form.submit_error(), Some("server rejected"));
        // Values survive the failure; resubmission is possible.
        assert_eq!(form.value("name"), Some(&FieldValue::text("Ada")));
        assert!(form.begin_submit());
    }
}
