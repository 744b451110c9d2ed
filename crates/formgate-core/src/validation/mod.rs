//! Field response validation.
//!
//! [`validate_field`] checks one response against one declared field:
//!
//! 1. The response's field type must equal the field's type.
//! 2. The raw answer must have the shape the type expects.
//! 3. A hidden field must not carry an answer.
//! 4. A blank answer fails only when the field is required and visible.
//! 5. A non-blank answer must satisfy the type-specific rule.
//!
//! Validation is a pure function of the field, the response and the
//! [`ValidationContext`].

mod attachment;
mod choice;
mod contact;
mod countries;
mod date;
mod identity;
mod number;
mod rating;
mod table;
mod text;

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use formgate_types::{FieldKind, FieldResponse, FormField};
use regex::Regex;

use crate::answer::Answer;
use crate::error::ValidateFieldError;

pub use countries::COUNTRY_REGIONS;
pub use identity::{is_nric_valid, is_uen_valid};

/// Ambient inputs for date-dependent rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    today: NaiveDate,
}

impl ValidationContext {
    /// Validate as if the current date were `today`.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Read today's date from the local clock.
    #[must_use]
    pub fn from_clock() -> Self {
        Self::new(Local::now().date_naive())
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.today.year()
    }
}

/// Validate one response against its field and return the typed answer.
pub fn process_field(
    field: &FormField,
    response: FieldResponse,
    ctx: &ValidationContext,
) -> Result<Answer, ValidateFieldError> {
    let field_type = field.field_type();
    if response.field_type != field_type {
        return Err(ValidateFieldError::response_shape(
            "response field type does not match form field",
        ));
    }

    let is_visible = response.is_visible;
    let answer = Answer::from_response(field_type, response)?;

    if answer.is_empty() {
        if !field.required || !is_visible {
            return Ok(answer);
        }
        // Table requiredness is per column.
        if let (FieldKind::Table(options), Answer::Rows(rows)) = (&field.kind, &answer) {
            table::validate_table(options, rows)?;
            return Ok(answer);
        }
        return Err(ValidateFieldError::invalid_answer(
            "required field has no answer",
        ));
    }

    if !is_visible {
        return Err(ValidateFieldError::hidden_field(
            "answer submitted for hidden field",
        ));
    }

    check_answer(&field.kind, &answer, ctx)?;
    Ok(answer)
}

/// Validate one response against its field.
pub fn validate_field(
    field: &FormField,
    response: &FieldResponse,
    ctx: &ValidationContext,
) -> Result<(), ValidateFieldError> {
    process_field(field, response.clone(), ctx).map(drop)
}

fn check_answer(
    kind: &FieldKind,
    answer: &Answer,
    ctx: &ValidationContext,
) -> Result<(), ValidateFieldError> {
    match (kind, answer) {
        (FieldKind::Section | FieldKind::Statement | FieldKind::Image, _) => Ok(()),
        (FieldKind::ShortText(options) | FieldKind::LongText(options), Answer::Single(a)) => {
            text::validate(options, a)
        }
        (FieldKind::Number(options), Answer::Single(a)) => number::validate_number(options, a),
        (FieldKind::Decimal(options), Answer::Single(a)) => number::validate_decimal(options, a),
        (FieldKind::Email(options), Answer::Single(a)) => contact::validate_email(options, a),
        (FieldKind::Mobile(options), Answer::Single(a)) => {
            contact::validate_phone(options, contact::PhoneKind::Mobile, a)
        }
        (FieldKind::HomeNo(options), Answer::Single(a)) => {
            contact::validate_phone(options, contact::PhoneKind::Home, a)
        }
        (FieldKind::Date(options), Answer::Single(a)) => date::validate(options, a, ctx),
        (FieldKind::Dropdown(options), Answer::Single(a)) => choice::validate_dropdown(options, a),
        (FieldKind::Radio(options), Answer::Single(a)) => choice::validate_radio(options, a),
        (FieldKind::Checkbox(options), Answer::Multiple(a)) => choice::validate_checkbox(options, a),
        (FieldKind::Rating(options), Answer::Single(a)) => rating::validate(options, a),
        (FieldKind::YesNo, Answer::Single(a)) => choice::validate_yes_no(a),
        (FieldKind::Nric, Answer::Single(a)) => identity::validate_nric(a),
        (FieldKind::Uen, Answer::Single(a)) => identity::validate_uen(a, ctx),
        (FieldKind::CountryRegion, Answer::Single(a)) => choice::validate_country_region(a),
        (FieldKind::Table(options), Answer::Rows(rows)) => table::validate_table(options, rows),
        (FieldKind::Children(options), Answer::Rows(rows)) => {
            table::validate_children(options, rows)
        }
        (
            FieldKind::Attachment(options),
            Answer::File {
                answer,
                filename,
                content,
            },
        ) => attachment::validate(options, answer, filename, content),
        _ => Err(ValidateFieldError::response_shape(
            "answer shape does not match field type",
        )),
    }
}

/// Match against a lazily compiled constant pattern. A pattern that failed to
/// compile matches nothing.
fn pattern_matches(pattern: &LazyLock<Result<Regex, regex::Error>>, haystack: &str) -> bool {
    pattern
        .as_ref()
        .is_ok_and(|regex| regex.is_match(haystack))
}
