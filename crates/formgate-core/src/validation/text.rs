use formgate_types::{TextFieldOptions, TextLengthRule};

use crate::error::ValidateFieldError;

/// Character-count rules for short and long text.
pub(super) fn validate(options: &TextFieldOptions, answer: &str) -> Result<(), ValidateFieldError> {
    let rule = &options.validation_options;
    let (Some(selected), Some(custom)) = (rule.selected_validation, rule.custom_val) else {
        return Ok(());
    };
    if custom == 0 {
        return Ok(());
    }

    let length = answer.chars().count();
    let ok = match selected {
        TextLengthRule::Exact => length == custom,
        TextLengthRule::Minimum => length >= custom,
        TextLengthRule::Maximum => length <= custom,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidateFieldError::invalid_answer(
            "TextValidator: answer length outside configured bound",
        ))
    }
}
