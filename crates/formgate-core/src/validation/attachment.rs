use formgate_types::AttachmentFieldOptions;

use crate::error::ValidateFieldError;

/// An attachment needs an answer, a filename and non-empty content no larger
/// than the field's size tier.
pub(super) fn validate(
    options: &AttachmentFieldOptions,
    answer: &str,
    filename: &str,
    content: &[u8],
) -> Result<(), ValidateFieldError> {
    if content.is_empty() {
        return Err(ValidateFieldError::invalid_answer(
            "AttachmentValidator: attachment is empty",
        ));
    }
    if answer.trim().is_empty() {
        return Err(ValidateFieldError::invalid_answer(
            "AttachmentValidator: content uploaded without an answer",
        ));
    }
    if filename.trim().is_empty() {
        return Err(ValidateFieldError::invalid_answer(
            "AttachmentValidator: attachment has no filename",
        ));
    }
    if content.len() > options.attachment_size.bytes() {
        return Err(ValidateFieldError::invalid_answer(
            "AttachmentValidator: attachment exceeds field size limit",
        ));
    }
    Ok(())
}
