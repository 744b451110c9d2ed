//! Byte-size guard.
//!
//! [`SizeLimits`] expresses the maximum sizes enforced while a multipart body
//! streams in. It is resolved once at startup and only read afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One mebibyte.
pub const MB: usize = 1024 * 1024;

/// Default maximum size of a non-file field value (3MB).
pub const DEFAULT_MAX_FIELD_BYTES: usize = 3 * MB;

/// Default maximum size of a single attachment (7MB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 7 * MB;

/// Default maximum total part payload per request (50MB).
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 50 * MB;

/// Default maximum number of parts per request.
pub const DEFAULT_MAX_PARTS: usize = 100;

/// Errors for inconsistent size configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LimitsError {
    #[error("{name} must be greater than zero")]
    Zero { name: &'static str },
    #[error("{name} ({value} bytes) exceeds maxRequestBytes ({max} bytes)")]
    ExceedsRequest {
        name: &'static str,
        value: usize,
        max: usize,
    },
}

/// Maximum sizes enforced while receiving a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SizeLimits {
    max_field_bytes: usize,
    max_attachment_bytes: usize,
    max_request_bytes: usize,
    max_parts: usize,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            max_field_bytes: DEFAULT_MAX_FIELD_BYTES,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            max_parts: DEFAULT_MAX_PARTS,
        }
    }
}

impl SizeLimits {
    /// Create limits with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum size of a non-file field value.
    #[must_use]
    pub fn max_field_bytes(mut self, size: usize) -> Self {
        self.max_field_bytes = size;
        self
    }

    /// Set the maximum size of a single attachment.
    #[must_use]
    pub fn max_attachment_bytes(mut self, size: usize) -> Self {
        self.max_attachment_bytes = size;
        self
    }

    /// Set the maximum total part payload per request.
    #[must_use]
    pub fn max_request_bytes(mut self, size: usize) -> Self {
        self.max_request_bytes = size;
        self
    }

    /// Set the maximum number of parts per request.
    #[must_use]
    pub fn max_parts(mut self, count: usize) -> Self {
        self.max_parts = count;
        self
    }

    #[must_use]
    pub fn get_max_field_bytes(&self) -> usize {
        self.max_field_bytes
    }

    #[must_use]
    pub fn get_max_attachment_bytes(&self) -> usize {
        self.max_attachment_bytes
    }

    #[must_use]
    pub fn get_max_request_bytes(&self) -> usize {
        self.max_request_bytes
    }

    #[must_use]
    pub fn get_max_parts(&self) -> usize {
        self.max_parts
    }

    /// Check that the limits are usable together.
    pub fn validate(&self) -> Result<(), LimitsError> {
        for (name, value) in [
            ("maxFieldBytes", self.max_field_bytes),
            ("maxAttachmentBytes", self.max_attachment_bytes),
            ("maxRequestBytes", self.max_request_bytes),
            ("maxParts", self.max_parts),
        ] {
            if value == 0 {
                return Err(LimitsError::Zero { name });
            }
        }

        for (name, value) in [
            ("maxFieldBytes", self.max_field_bytes),
            ("maxAttachmentBytes", self.max_attachment_bytes),
        ] {
            if value > self.max_request_bytes {
                return Err(LimitsError::ExceedsRequest {
                    name,
                    value,
                    max: self.max_request_bytes,
                });
            }
        }
        Ok(())
    }
}
