use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use formgate_types::{DateFieldOptions, DateRule};
use regex::Regex;

use super::{ValidationContext, pattern_matches};
use crate::error::ValidateFieldError;

/// Dates are submitted as `DD MMM YYYY`, e.g. `09 Jan 2024`.
static DATE_FORMAT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\d{2} [A-Z][a-z]{2} \d{4}$"));

const DATE_PATTERN: &str = "%d %b %Y";

pub(super) fn validate(
    options: &DateFieldOptions,
    answer: &str,
    ctx: &ValidationContext,
) -> Result<(), ValidateFieldError> {
    if !pattern_matches(&DATE_FORMAT, answer) {
        return Err(ValidateFieldError::invalid_answer(
            "DateValidator: answer is not in DD MMM YYYY format",
        ));
    }
    let date = NaiveDate::parse_from_str(answer, DATE_PATTERN).map_err(|_| {
        ValidateFieldError::invalid_answer("DateValidator: answer is not a calendar date")
    })?;

    let validation = &options.date_validation;
    let in_bounds = match validation.selected_date_validation {
        Some(DateRule::NoPast) => date >= ctx.today(),
        Some(DateRule::NoFuture) => date <= ctx.today(),
        Some(DateRule::Custom) => {
            validation.custom_min_date.is_none_or(|min| min <= date)
                && validation.custom_max_date.is_none_or(|max| date <= max)
        }
        None => true,
    };
    if !in_bounds {
        return Err(ValidateFieldError::invalid_answer(
            "DateValidator: answer does not fall within the allowed dates",
        ));
    }

    if options.invalid_days.contains(&date.weekday()) {
        return Err(ValidateFieldError::invalid_answer(
            "DateValidator: answer falls on an invalid day",
        ));
    }
    Ok(())
}
