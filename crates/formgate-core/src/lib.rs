//! Core engine for formgate.
//!
//! This crate provides the transport-independent pieces of submission intake:
//! - [`MultipartParser`]: an incremental `multipart/form-data` parser with a
//!   per-part [`FieldAccumulator`] enforcing [`SizeLimits`]
//! - [`reconcile_attachments`]: merging uploaded files into the JSON responses
//! - [`validate_field`]: validation of one response against its [`FormField`]
//! - [`validate_submission`]: validation of a whole submission, stopping at
//!   the first failing field
//! - [`AttachmentPolicy`]: submission-wide attachment size and type rules
//!
//! # Design Principles
//!
//! - Validation is pure: the only ambient input is the [`ValidationContext`]
//! - Client-facing errors carry one fixed message per category
//! - No state is shared between requests
//!
//! [`FormField`]: formgate_types::FormField

#![forbid(unsafe_code)]

mod accumulator;
pub mod answer;
pub mod attachments;
pub mod error;
pub mod limits;
pub mod multipart;
pub mod reconcile;
pub mod submission;
pub mod validation;

pub use accumulator::{FieldAccumulator, PartKind};
pub use answer::Answer;
pub use attachments::{
    AttachmentPolicy, AttachmentPolicyError, DEFAULT_ALLOWED_EXTENSIONS, ResponseMode,
};
pub use error::{SubmissionValidationError, ValidateFieldError, ValidateFieldErrorKind};
pub use limits::{
    DEFAULT_MAX_ATTACHMENT_BYTES, DEFAULT_MAX_FIELD_BYTES, DEFAULT_MAX_PARTS,
    DEFAULT_MAX_REQUEST_BYTES, LimitsError, MB, SizeLimits,
};
pub use multipart::{
    MAX_PART_HEADER_BYTES, MultipartError, MultipartParser, MultipartStreamState, Part,
    parse_boundary,
};
pub use reconcile::{dedupe_by_field_id, reconcile_attachments, rename_duplicate_filenames};
pub use submission::{ProcessedResponse, validate_submission};
pub use validation::{
    COUNTRY_REGIONS, ValidationContext, is_nric_valid, is_uen_valid, process_field,
    validate_field,
};
