//! Validation error types.
//!
//! Every field-level failure surfaces to clients as one of three fixed
//! messages (see [`ValidateFieldErrorKind::message`]). The more specific
//! reason a validator rejected an answer is kept in
//! [`ValidateFieldError::detail`] for logs and is never shown to respondents.

use std::fmt;

use thiserror::Error;

/// Category of a field validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidateFieldErrorKind {
    /// The answer is empty when required or breaks a field rule.
    InvalidAnswer,
    /// The response does not fit the field's type or answer shape.
    ResponseShape,
    /// An answer was submitted for a field the respondent could not see.
    HiddenField,
}

impl ValidateFieldErrorKind {
    /// The fixed client-facing message for this kind.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidAnswer => "Invalid answer submitted",
            Self::ResponseShape => "Response has invalid shape",
            Self::HiddenField => "Attempted to submit response on a hidden field",
        }
    }

    /// Short identifier used in log events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidAnswer => "invalid_answer",
            Self::ResponseShape => "response_shape",
            Self::HiddenField => "hidden_field",
        }
    }
}

impl fmt::Display for ValidateFieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A field failed validation.
///
/// `Display` yields only the fixed message for the kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ValidateFieldError {
    kind: ValidateFieldErrorKind,
    detail: &'static str,
}

impl ValidateFieldError {
    #[must_use]
    pub fn new(kind: ValidateFieldErrorKind, detail: &'static str) -> Self {
        Self { kind, detail }
    }

    #[must_use]
    pub fn invalid_answer(detail: &'static str) -> Self {
        Self::new(ValidateFieldErrorKind::InvalidAnswer, detail)
    }

    #[must_use]
    pub fn response_shape(detail: &'static str) -> Self {
        Self::new(ValidateFieldErrorKind::ResponseShape, detail)
    }

    #[must_use]
    pub fn hidden_field(detail: &'static str) -> Self {
        Self::new(ValidateFieldErrorKind::HiddenField, detail)
    }

    #[must_use]
    pub fn kind(&self) -> ValidateFieldErrorKind {
        self.kind
    }

    /// The fixed client-facing message.
    #[must_use]
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Internal reason, for logs only.
    #[must_use]
    pub fn detail(&self) -> &'static str {
        self.detail
    }
}

/// The orchestrator rejected a submission at `field_id`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field {field_id}: {error}")]
pub struct SubmissionValidationError {
    pub field_id: String,
    #[source]
    pub error: ValidateFieldError,
}

impl SubmissionValidationError {
    #[must_use]
    pub fn kind(&self) -> ValidateFieldErrorKind {
        self.error.kind()
    }
}
