//! Streaming form submission intake and validation.
//!
//! formgate takes a `multipart/form-data` submission off the wire and decides
//! whether it can be trusted:
//!
//! - **Streaming receive** — the body is pulled chunk by chunk; fields and
//!   files are size-checked while they arrive
//! - **Reconciliation** — uploaded files are merged into the JSON `body`
//!   responses by field id
//! - **Field validation** — every answer is checked against its form field,
//!   with one fixed client-facing message per failure category
//!
//! # Quick Start
//!
//! ```ignore
//! use formgate::prelude::*;
//!
//! let fields: Vec<FormField> = serde_json::from_str(form_json)?;
//! let gate = SubmissionGate::new(fields);
//! match gate.process(&headers, body_stream).await {
//!     Ok(responses) => store(responses),
//!     Err(err) => reply(err.status_code(), err.public_message()),
//! }
//! ```
//!
//! # Crate Structure
//!
//! - [`formgate_types`] — form fields and submitted responses
//! - [`formgate_core`] — multipart parser, validators, orchestrator
//! - [`formgate_http`] — header map and streaming receiver

#![forbid(unsafe_code)]

// Re-export crates
pub use formgate_core as core;
pub use formgate_http as http;
pub use formgate_types as types;

// Re-export commonly used types
pub use formgate_core::{
    Answer, AttachmentPolicy, AttachmentPolicyError, ProcessedResponse, ResponseMode, SizeLimits,
    SubmissionValidationError, ValidateFieldError, ValidateFieldErrorKind, ValidationContext,
    validate_field, validate_submission,
};
pub use formgate_http::{Headers, MultipartReceiver, ReceiverError};
pub use formgate_types::{
    FieldKind, FieldResponse, FieldType, FormField, ParsedMultipartForm, SubmissionBody,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        Answer, AttachmentPolicy, FieldKind, FieldResponse, FieldType, FormField, Headers,
        MultipartReceiver, ProcessedResponse, ReceiverError, ResponseMode, SizeLimits,
        SubmissionError, SubmissionGate, ValidationContext, validate_submission,
    };
    pub use serde::{Deserialize, Serialize};
}

mod gate;

pub use gate::{SubmissionError, SubmissionGate};
