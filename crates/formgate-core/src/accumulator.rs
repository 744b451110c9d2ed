//! Per-part byte accumulation under the byte-size guard.
//!
//! A [`FieldAccumulator`] buffers a single multipart part in memory as the
//! transport delivers it. Each append is checked against the part's ceiling
//! (field or attachment) and against the request-wide budget before any bytes
//! are copied, so an oversized part is rejected while it is still arriving.

use crate::limits::SizeLimits;
use crate::multipart::{MultipartError, Part};

/// Whether a part is a plain form field or a file upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    /// No `filename` parameter in Content-Disposition.
    Field,
    /// A `filename` parameter is present, possibly empty.
    File,
}

/// Buffers one streamed part, enforcing its size ceiling on every append.
#[derive(Debug, Clone)]
pub struct FieldAccumulator {
    name: String,
    filename: Option<String>,
    content_type: Option<String>,
    limit: usize,
    data: Vec<u8>,
}

impl FieldAccumulator {
    /// Start accumulating a part. The ceiling is picked from `limits` by kind.
    #[must_use]
    pub fn new(
        name: String,
        filename: Option<String>,
        content_type: Option<String>,
        limits: &SizeLimits,
    ) -> Self {
        let limit = if filename.is_some() {
            limits.get_max_attachment_bytes()
        } else {
            limits.get_max_field_bytes()
        };
        Self {
            name,
            filename,
            content_type,
            limit,
            data: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PartKind {
        if self.filename.is_some() {
            PartKind::File
        } else {
            PartKind::Field
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bytes accumulated so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The ceiling this part is held to.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Append a chunk of part data.
    ///
    /// `total_size` is the running payload size of the whole request; it is
    /// only advanced when the append succeeds.
    pub fn append(
        &mut self,
        chunk: &[u8],
        total_size: &mut usize,
        limits: &SizeLimits,
    ) -> Result<(), MultipartError> {
        if chunk.is_empty() {
            return Ok(());
        }

        let next_size = self.data.len().saturating_add(chunk.len());
        if next_size > self.limit {
            return Err(match self.kind() {
                PartKind::File => MultipartError::FileTooLarge {
                    name: self.name.clone(),
                    size: next_size,
                    max: self.limit,
                },
                PartKind::Field => MultipartError::FieldTooLarge {
                    name: self.name.clone(),
                    size: next_size,
                    max: self.limit,
                },
            });
        }

        let next_total = total_size.saturating_add(chunk.len());
        if next_total > limits.get_max_request_bytes() {
            return Err(MultipartError::TotalTooLarge {
                size: next_total,
                max: limits.get_max_request_bytes(),
            });
        }

        self.data.extend_from_slice(chunk);
        *total_size = next_total;
        Ok(())
    }

    /// Finish the part.
    #[must_use]
    pub fn finish(self) -> Part {
        Part {
            name: self.name,
            filename: self.filename,
            content_type: self.content_type,
            data: self.data,
        }
    }
}
