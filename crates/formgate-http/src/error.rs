//! Receiver failures and their HTTP mapping.

use formgate_core::{LimitsError, MultipartError};
use thiserror::Error;

/// Terminal outcome of a failed receive.
///
/// Internal details stay in the `Display` output for logs.
/// [`ReceiverError::public_message`] is what clients see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ReceiverError {
    /// The receiver could not be constructed from the request headers.
    #[error("failed to initialise receiver: {detail}")]
    Initialise { detail: String },

    /// A field, file or the request as a whole exceeded its size ceiling.
    #[error("content limit exceeded: {source}")]
    ContentLimit {
        #[source]
        source: MultipartError,
    },

    /// The `body` field did not decode as a submission.
    #[error("failed to parse submission body: {detail}")]
    ContentParsing { detail: String },

    /// Any other terminal stream or parser error.
    #[error("multipart error: {detail}")]
    Multipart { detail: String },
}

impl ReceiverError {
    /// HTTP status for this error: 413 for size violations, 400 otherwise.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::ContentLimit { .. } => 413,
            Self::Initialise { .. } | Self::ContentParsing { .. } | Self::Multipart { .. } => 400,
        }
    }

    /// Message safe to return to the client.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Initialise { .. } => "Required headers are missing",
            Self::ContentLimit { .. } => "Your submission is too large.",
            Self::ContentParsing { .. } => "Invalid form data",
            Self::Multipart { .. } => "Submission could not be read",
        }
    }

    /// Short identifier used in log events.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Initialise { .. } => "initialise",
            Self::ContentLimit { .. } => "content_limit",
            Self::ContentParsing { .. } => "content_parsing",
            Self::Multipart { .. } => "multipart",
        }
    }

    pub(crate) fn multipart(detail: impl Into<String>) -> Self {
        Self::Multipart {
            detail: detail.into(),
        }
    }
}

impl From<MultipartError> for ReceiverError {
    fn from(err: MultipartError) -> Self {
        if err.is_limit() {
            Self::ContentLimit { source: err }
        } else {
            Self::multipart(err.to_string())
        }
    }
}

impl From<LimitsError> for ReceiverError {
    fn from(err: LimitsError) -> Self {
        Self::Initialise {
            detail: err.to_string(),
        }
    }
}
