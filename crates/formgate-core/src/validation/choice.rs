use std::collections::HashSet;

use formgate_types::{CheckboxFieldOptions, ChoiceFieldOptions};

use super::countries::COUNTRY_REGIONS;
use crate::error::ValidateFieldError;

/// Prefix the client puts in front of free-text "Others" answers.
const OTHERS_PREFIX: &str = "Others: ";

fn is_other_option(others_enabled: bool, answer: &str) -> bool {
    others_enabled && answer.starts_with(OTHERS_PREFIX)
}

pub(super) fn validate_dropdown(
    options: &ChoiceFieldOptions,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    if options.field_options.iter().any(|option| option == answer) {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "DropdownValidator: answer is not a valid dropdown option",
        ))
    }
}

pub(super) fn validate_radio(
    options: &ChoiceFieldOptions,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    let listed = options.field_options.iter().any(|option| option == answer);
    if listed || is_other_option(options.others_radio_button, answer) {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "RadioButtonValidator: answer is not a valid radio button option",
        ))
    }
}

/// Checkbox answers are split into "other" answers (prefixed, with others
/// enabled) and the rest. The rest must be listed options without repeats. At
/// most one other answer may fall outside the listed options, and other
/// answers that happen to be listed must not repeat either.
pub(super) fn validate_checkbox(
    options: &CheckboxFieldOptions,
    answers: &[String],
) -> Result<(), ValidateFieldError> {
    let selected = answers.len();
    let bounds = &options.validation_options;
    if options.validate_by_value {
        if let Some(min) = bounds.custom_min.filter(|&min| min > 0) {
            if selected < min {
                return Err(ValidateFieldError::invalid_answer(
                    "CheckboxValidator: fewer options selected than minimum",
                ));
            }
        }
        if let Some(max) = bounds.custom_max.filter(|&max| max > 0) {
            if selected > max {
                return Err(ValidateFieldError::invalid_answer(
                    "CheckboxValidator: more options selected than maximum",
                ));
            }
        }
    }

    let others_enabled = options.others_radio_button;

    if !answers
        .iter()
        .all(|answer| is_listed(options, answer) || is_other_option(others_enabled, answer))
    {
        return Err(ValidateFieldError::invalid_answer(
            "CheckboxValidator: answer is not valid",
        ));
    }

    let (others, regular): (Vec<&str>, Vec<&str>) = answers
        .iter()
        .map(String::as_str)
        .partition(|answer| is_other_option(others_enabled, answer));

    if has_duplicates(&regular) {
        return Err(ValidateFieldError::invalid_answer(
            "CheckboxValidator: duplicate non-other answers",
        ));
    }

    let (listed_others, free_others): (Vec<&str>, Vec<&str>) =
        others.into_iter().partition(|answer| is_listed(options, answer));
    if free_others.len() > 1 || has_duplicates(&listed_others) {
        return Err(ValidateFieldError::invalid_answer(
            "CheckboxValidator: duplicate other answers",
        ));
    }
    Ok(())
}

fn is_listed(options: &CheckboxFieldOptions, answer: &str) -> bool {
    options.field_options.iter().any(|option| option == answer)
}

fn has_duplicates(values: &[&str]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    !values.iter().all(|value| seen.insert(*value))
}

pub(super) fn validate_yes_no(answer: &str) -> Result<(), ValidateFieldError> {
    match answer {
        "Yes" | "No" => Ok(()),
        _ => Err(ValidateFieldError::invalid_answer(
            "YesNoValidator: answer is not Yes or No",
        )),
    }
}

/// Country names are matched in their upper-case form.
pub(super) fn validate_country_region(answer: &str) -> Result<(), ValidateFieldError> {
    if COUNTRY_REGIONS.contains(&answer) {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "CountryRegionValidator: answer is not a valid country or region",
        ))
    }
}
