use std::sync::LazyLock;

use formgate_types::{EmailFieldOptions, PhoneFieldOptions};
use phonenumber::Type;
use phonenumber::metadata::DATABASE;
use regex::Regex;

use super::pattern_matches;
use crate::error::ValidateFieldError;

static EMAIL_FORMAT: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
});

const MAX_EMAIL_LEN: usize = 254;

/// Singapore country calling code.
const SG_CALLING_CODE: &str = "65";

pub(super) fn validate_email(
    options: &EmailFieldOptions,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    if answer.len() > MAX_EMAIL_LEN || !pattern_matches(&EMAIL_FORMAT, answer) {
        return Err(ValidateFieldError::invalid_answer(
            "EmailValidator: answer is not a valid email",
        ));
    }

    if !options.has_allowed_email_domains || options.allowed_email_domains.is_empty() {
        return Ok(());
    }

    let Some((_, domain)) = answer.rsplit_once('@') else {
        return Err(ValidateFieldError::invalid_answer(
            "EmailValidator: answer has no domain",
        ));
    };
    let domain = format!("@{}", domain.to_ascii_lowercase());
    let allowed = options
        .allowed_email_domains
        .iter()
        .any(|entry| entry.trim().eq_ignore_ascii_case(&domain));
    if allowed {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "EmailValidator: email domain is not allowed",
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PhoneKind {
    Mobile,
    Home,
}

/// Phone numbers are E.164 strings. Singapore numbers are eight digits after
/// `+65`; mobiles start with 8 or 9, fixed lines with 3 or 6. Other countries
/// are accepted only when the field allows international numbers, and then
/// must be assigned numbers of the field's line type.
pub(super) fn validate_phone(
    options: &PhoneFieldOptions,
    kind: PhoneKind,
    answer: &str,
) -> Result<(), ValidateFieldError> {
    let Some(digits) = answer.strip_prefix('+') else {
        return Err(ValidateFieldError::invalid_answer(
            "PhoneValidator: answer is missing the + prefix",
        ));
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidateFieldError::invalid_answer(
            "PhoneValidator: answer contains non-digit characters",
        ));
    }

    if let Some(local) = digits.strip_prefix(SG_CALLING_CODE) {
        return if is_valid_sg_number(kind, local) {
            Ok(())
        } else {
            Err(ValidateFieldError::invalid_answer(
                "PhoneValidator: answer is not a valid Singapore number for this field",
            ))
        };
    }

    if !options.allow_intl_numbers {
        return Err(ValidateFieldError::invalid_answer(
            "PhoneValidator: international numbers are not allowed",
        ));
    }
    let Ok(number) = phonenumber::parse(None, answer) else {
        return Err(ValidateFieldError::invalid_answer(
            "PhoneValidator: answer is not a parseable international number",
        ));
    };
    if !phonenumber::is_valid(&number) {
        return Err(ValidateFieldError::invalid_answer(
            "PhoneValidator: answer is not an assigned international number",
        ));
    }
    let number_type = number.number_type(&DATABASE);
    let matches_kind = match kind {
        PhoneKind::Mobile => matches!(number_type, Type::Mobile | Type::FixedLineOrMobile),
        PhoneKind::Home => matches!(number_type, Type::FixedLine | Type::FixedLineOrMobile),
    };
    if matches_kind {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "PhoneValidator: international number is the wrong line type for this field",
        ))
    }
}

fn is_valid_sg_number(kind: PhoneKind, local: &str) -> bool {
    if local.len() != 8 {
        return false;
    }
    match (kind, local.as_bytes()[0]) {
        (PhoneKind::Mobile, b'8' | b'9') | (PhoneKind::Home, b'3' | b'6') => true,
        _ => false,
    }
}
