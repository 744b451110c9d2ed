//! Submission-wide attachment policy.
//!
//! Per-field size tiers are enforced by the field validator. This module adds
//! the checks that span a whole submission: the total upload size for the
//! form's response mode and the permitted file extensions.

use formgate_types::ParsedMultipartForm;
use thiserror::Error;

/// How a form delivers its responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    /// Responses are mailed to the form owner.
    #[default]
    Email,
    /// Responses are stored encrypted.
    Storage,
}

impl ResponseMode {
    /// Ceiling on the combined size of all attachments in one submission.
    #[must_use]
    pub fn max_total_attachment_bytes(self) -> usize {
        match self {
            Self::Email => 7_000_000,
            Self::Storage => 20_000_000,
        }
    }
}

/// Extensions accepted when no custom list is configured.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &[
    ".asc", ".avi", ".bmp", ".csv", ".dgn", ".docx", ".dwf", ".dwg", ".dxf", ".ent", ".gif",
    ".jpeg", ".jpg", ".mpeg", ".mov", ".mp3", ".mp4", ".mpg", ".msg", ".odb", ".odf", ".odg",
    ".odp", ".ods", ".odt", ".pdf", ".png", ".ppt", ".pptx", ".rtf", ".sxc", ".sxd", ".sxi",
    ".sxw", ".tif", ".tiff", ".txt", ".wmv", ".xml", ".xls", ".xlsx", ".zip", ".heic", ".heif",
    ".jfif", ".mpp", ".wav", ".webp",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum AttachmentPolicyError {
    #[error("attachments total {size} bytes, exceeding limit of {max} bytes")]
    TooLarge { size: usize, max: usize },
    #[error("attachment '{filename}' has a file type that is not allowed")]
    InvalidExtension { filename: String },
}

impl AttachmentPolicyError {
    /// Client-facing message.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::TooLarge { .. } => "Please keep the size of your attachments under the limit.",
            Self::InvalidExtension { .. } => {
                "Some files were invalid. Try uploading another file."
            }
        }
    }
}

/// Attachment rules for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPolicy {
    max_total_bytes: usize,
    allowed_extensions: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self::for_mode(ResponseMode::default())
    }
}

impl AttachmentPolicy {
    /// Default extensions with the total ceiling for `mode`.
    #[must_use]
    pub fn for_mode(mode: ResponseMode) -> Self {
        Self {
            max_total_bytes: mode.max_total_attachment_bytes(),
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// Override the total size ceiling.
    #[must_use]
    pub fn max_total_bytes(mut self, max: usize) -> Self {
        self.max_total_bytes = max;
        self
    }

    /// Replace the extension allow-list. Entries are matched
    /// case-insensitively and may be written with or without the dot.
    #[must_use]
    pub fn allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_ascii_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{ext}")
                }
            })
            .collect();
        self
    }

    #[must_use]
    pub fn get_max_total_bytes(&self) -> usize {
        self.max_total_bytes
    }

    /// Whether `filename` ends in a permitted extension.
    #[must_use]
    pub fn is_extension_allowed(&self, filename: &str) -> bool {
        let Some(dot) = filename.rfind('.') else {
            return false;
        };
        let extension = filename[dot..].to_ascii_lowercase();
        self.allowed_extensions.iter().any(|allowed| *allowed == extension)
    }

    /// Check every uploaded attachment in a received form.
    pub fn check(&self, form: &ParsedMultipartForm) -> Result<(), AttachmentPolicyError> {
        let mut total = 0usize;
        for response in form.attachments() {
            let filename = response.filename.as_deref().unwrap_or_default();
            if !self.is_extension_allowed(filename) {
                tracing::warn!(field_id = %response.id, "attachment extension rejected");
                return Err(AttachmentPolicyError::InvalidExtension {
                    filename: filename.to_string(),
                });
            }
            total = total.saturating_add(response.content.len());
        }
        if total > self.max_total_bytes {
            tracing::warn!(size = total, max = self.max_total_bytes, "attachments too large");
            return Err(AttachmentPolicyError::TooLarge {
                size: total,
                max: self.max_total_bytes,
            });
        }
        Ok(())
    }
}
