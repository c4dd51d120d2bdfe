//! The concrete form schemas the site submits through.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::{FieldError, FieldValue, FormSchema, Rule};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("constant pattern"));

/// `<number> <unit>`, e.g. "6 weeks" or "3 months".
static TIME_ESTIMATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s+[A-Za-z]+$").expect("constant pattern"));

fn email_rule() -> Rule {
    Rule::Pattern {
        regex: EMAIL.clone(),
        message: "email must be a valid address".into(),
    }
}

/// The public contact form.
pub fn contact_form() -> FormSchema {
    FormSchema::new()
        .field("name", vec![Rule::Required, Rule::MaxLength(120)])
        .field("email", vec![Rule::Required, email_rule()])
        .field("subject", vec![Rule::MaxLength(200)])
        .field(
            "message",
            vec![Rule::Required, Rule::MinLength(10), Rule::MaxLength(5000)],
        )
}

/// The production-line inquiry form.
pub fn inquiry_form() -> FormSchema {
    FormSchema::new()
        .field("full_name", vec![Rule::Required, Rule::MaxLength(120)])
        .field("company_name", vec![Rule::Required, Rule::MaxLength(200)])
        .field("email_address", vec![Rule::Required, email_rule()])
        .field("phone_number", vec![Rule::Required, Rule::MaxLength(40)])
        .field("production_line_name", vec![Rule::Required])
        .field(
            "message",
            vec![Rule::Required, Rule::MinLength(10), Rule::MaxLength(5000)],
        )
}

/// The admin project editor.
pub fn project_form() -> FormSchema {
    FormSchema::new()
        .field("name", vec![Rule::Required, Rule::MaxLength(200)])
        .field("company_name", vec![Rule::Required, Rule::MaxLength(200)])
        .field("capacity", vec![Rule::Required, Rule::MaxLength(120)])
        .field(
            "time_estimate",
            vec![
                Rule::Required,
                Rule::Pattern {
                    regex: TIME_ESTIMATE.clone(),
                    message: "time estimate must look like \"6 weeks\"".into(),
                },
            ],
        )
}

/// The admin production-line editor. An unavailable line must say when
/// it is expected back; an available one must not carry a date.
pub fn production_line_form() -> FormSchema {
    FormSchema::new()
        .field("company", vec![Rule::Required, Rule::MaxLength(200)])
        .field("full_name", vec![Rule::Required, Rule::MaxLength(120)])
        .field("email", vec![Rule::Required, email_rule()])
        .field("phone", vec![Rule::Required, Rule::MaxLength(40)])
        .field("product_type", vec![Rule::Required])
        .field("capacity", vec![Rule::Required, Rule::MaxLength(120)])
        .field(
            "manufacturing_year",
            vec![Rule::Min(1950.0), Rule::Max(2100.0)],
        )
        .field("price", vec![Rule::Required, Rule::Min(0.0)])
        .field("available_now", vec![Rule::Required])
        .cross_rule(availability_rule)
}

fn availability_rule(values: &HashMap<String, FieldValue>) -> Option<FieldError> {
    let available = matches!(values.get("available_now"), Some(FieldValue::Flag(true)));
    let has_date = match values.get("expected_available") {
        Some(FieldValue::Text(text)) => !text.trim().is_empty(),
        Some(FieldValue::Missing) | None => false,
        Some(_) => true,
    };
    match (available, has_date) {
        (false, false) => Some(FieldError::new(
            "expected_available",
            "an unavailable line needs an expected availability date",
        )),
        (true, true) => Some(FieldError::new(
            "expected_available",
            "an available line cannot carry an expected availability date",
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::FormState;

    #[test]
    fn contact_form_accepts_a_complete_submission() {
        let mut form = FormState::new(contact_form());
        form.set("name", FieldValue::text("Ada Lovelace"));
        form.set("email", FieldValue::text("ada@example.com"));
        form.set("subject", FieldValue::text("Quotation"));
        form.set("message", FieldValue::text("We would like a quotation."));
        assert!(form.can_submit());
    }

    #[test]
    fn contact_form_rejects_short_messages() {
        let mut form = FormState::new(contact_form());
        form.set("message", FieldValue::text("hi"));
        assert!(!form.field_errors("message").is_empty());
    }

    #[test]
    fn time_estimate_pattern() {
        let schema = project_form();
        assert!(schema
            .validate_field("time_estimate", &FieldValue::text("6 weeks"))
            .is_empty());
        assert!(schema
            .validate_field("time_estimate", &FieldValue::text("3  months"))
            .is_empty());
        assert!(!schema
            .validate_field("time_estimate", &FieldValue::text("six weeks"))
            .is_empty());
        assert!(!schema
            .validate_field("time_estimate", &FieldValue::text("6"))
            .is_empty());
    }

    fn filled_line_form() -> FormState {
        let mut form = FormState::new(production_line_form());
        form.set("company", FieldValue::text("Acme Filling"));
        form.set("full_name", FieldValue::text("Jordan Example"));
        form.set("email", FieldValue::text("sales@example.com"));
        form.set("phone", FieldValue::text("+20 100 000 0000"));
        form.set("product_type", FieldValue::text("carbonated drinks"));
        form.set("capacity", FieldValue::text("12000 bottles/hour"));
        form.set("manufacturing_year", FieldValue::Number(2019.0));
        form.set("price", FieldValue::Number(250_000.0));
        form
    }

    #[test]
    fn unavailable_line_requires_expected_date() {
        let mut form = filled_line_form();
        form.set("available_now", FieldValue::Flag(false));
        assert!(!form.field_errors("expected_available").is_empty());

        form.set("expected_available", FieldValue::text("2026-11-01"));
        assert!(form.can_submit());
    }

    #[test]
    fn available_line_must_not_carry_a_date() {
        let mut form = filled_line_form();
        form.set("available_now", FieldValue::Flag(true));
        form.set("expected_available", FieldValue::text("2026-11-01"));
        assert!(!form.field_errors("expected_available").is_empty());

        form.set("expected_available", FieldValue::Missing);
        assert!(form.can_submit());
    }
}
