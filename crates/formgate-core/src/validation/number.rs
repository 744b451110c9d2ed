use std::sync::LazyLock;

use formgate_types::{
    DecimalFieldOptions, LengthRule, NumberFieldOptions, NumberRule, RangeValidationOptions,
};
use regex::Regex;

use super::pattern_matches;
use crate::error::ValidateFieldError;

/// Optional sign, no leading zeroes, optional fraction with at least one digit.
static DECIMAL_FORMAT: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?$"));

pub(super) fn validate_number(
    options: &NumberFieldOptions,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    if !answer.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidateFieldError::invalid_answer(
            "NumberValidator: answer is not a valid number format",
        ));
    }

    let validation = &options.validation_options;
    match validation.selected_validation {
        Some(NumberRule::Length) => {
            let length_options = &validation.length_validation_options;
            let (Some(rule), Some(custom)) = (
                length_options.selected_length_validation,
                length_options.custom_val,
            ) else {
                return Ok(());
            };
            if custom == 0 {
                return Ok(());
            }
            let ok = match rule {
                LengthRule::Min => answer.len() >= custom,
                LengthRule::Max => answer.len() <= custom,
                LengthRule::Exact => answer.len() == custom,
            };
            if ok {
                Ok(())
            } else {
                Err(ValidateFieldError::invalid_answer(
                    "NumberValidator: answer length outside configured bound",
                ))
            }
        }
        Some(NumberRule::Range) => {
            let value: f64 = answer.parse().map_err(|_| {
                ValidateFieldError::invalid_answer("NumberValidator: answer is not a number")
            })?;
            if within_range(&validation.range_validation_options, value) {
                Ok(())
            } else {
                Err(ValidateFieldError::invalid_answer(
                    "NumberValidator: answer does not fall within specified range",
                ))
            }
        }
        None => Ok(()),
    }
}

pub(super) fn validate_decimal(
    options: &DecimalFieldOptions,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    if !pattern_matches(&DECIMAL_FORMAT, answer) {
        return Err(ValidateFieldError::invalid_answer(
            "DecimalValidator: answer is not a valid decimal",
        ));
    }
    if !options.validate_by_value {
        return Ok(());
    }

    let value: f64 = answer.parse().map_err(|_| {
        ValidateFieldError::invalid_answer("DecimalValidator: answer is not a number")
    })?;
    if within_range(&options.validation_options, value) {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "DecimalValidator: answer does not fall within specified range",
        ))
    }
}

fn within_range(range: &RangeValidationOptions, value: f64) -> bool {
    range.custom_min.is_none_or(|min| min <= value) && range.custom_max.is_none_or(|max| value <= max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_types::{LengthValidationOptions, NumberValidationOptions};

    fn length(rule: LengthRule, value: usize) -> NumberFieldOptions {
        NumberFieldOptions {
            validation_options: NumberValidationOptions {
                selected_validation: Some(NumberRule::Length),
                length_validation_options: LengthValidationOptions {
                    selected_length_validation: Some(rule),
                    custom_val: Some(value),
                },
                ..NumberValidationOptions::default()
            },
        }
    }

    fn range(min: Option<f64>, max: Option<f64>) -> RangeValidationOptions {
        RangeValidationOptions {
            custom_min: min,
            custom_max: max,
        }
    }

    #[test]
    fn test_number_format() {
        let options = NumberFieldOptions::default();
        assert!(validate_number(&options, "0123").is_ok());
        assert!(validate_number(&options, "-1").is_err());
        assert!(validate_number(&options, "1.5").is_err());
        assert!(validate_number(&options, "1e3").is_err());
        assert!(validate_number(&options, "١٢").is_err());
    }

    #[test]
    fn test_number_length_rules() {
        assert!(validate_number(&length(LengthRule::Min, 3), "123").is_ok());
        assert!(validate_number(&length(LengthRule::Min, 3), "12").is_err());
        assert!(validate_number(&length(LengthRule::Max, 3), "1234").is_err());
        assert!(validate_number(&length(LengthRule::Exact, 2), "12").is_ok());
        assert!(validate_number(&length(LengthRule::Exact, 2), "123").is_err());
    }

    #[test]
    fn test_number_range_is_inclusive() {
        let options = NumberFieldOptions {
            validation_options: NumberValidationOptions {
                selected_validation: Some(NumberRule::Range),
                range_validation_options: range(Some(10.0), Some(20.0)),
                ..NumberValidationOptions::default()
            },
        };
        assert!(validate_number(&options, "10").is_ok());
        assert!(validate_number(&options, "20").is_ok());
        assert!(validate_number(&options, "9").is_err());
        assert!(validate_number(&options, "21").is_err());
    }

    #[test]
    fn test_decimal_format() {
        let options = DecimalFieldOptions::default();
        for ok in ["0", "5", "-5.0", "123.456", "0.3"] {
            assert!(validate_decimal(&options, ok).is_ok(), "{ok} should pass");
        }
        for bad in ["001.3", ".3", "-.3", "1.", "abc", "1,000", "+1"] {
            assert!(validate_decimal(&options, bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_decimal_range_only_when_enabled() {
        let mut options = DecimalFieldOptions {
            validate_by_value: false,
            validation_options: range(Some(1.5), Some(2.5)),
        };
        assert!(validate_decimal(&options, "100").is_ok());

        options.validate_by_value = true;
        assert!(validate_decimal(&options, "1.5").is_ok());
        assert!(validate_decimal(&options, "2.5").is_ok());
        assert!(validate_decimal(&options, "2.51").is_err());
        assert!(validate_decimal(&options, "-1").is_err());
    }

    #[test]
    fn test_decimal_open_bounds() {
        let options = DecimalFieldOptions {
            validate_by_value: true,
            validation_options: range(None, Some(0.0)),
        };
        assert!(validate_decimal(&options, "-9999.5").is_ok());
        assert!(validate_decimal(&options, "0.1").is_err());
    }
}
