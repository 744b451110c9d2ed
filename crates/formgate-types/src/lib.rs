//! Shared data model for formgate.
//!
//! This crate holds the plain data types exchanged between the multipart
//! receiver and the validation engine:
//!
//! - [`FormField`] and its per-type options ([`FieldKind`])
//! - [`FieldResponse`], the untrusted response shape submitted by clients
//! - [`Attachment`] and [`ParsedMultipartForm`], produced by the receiver
//!
//! Types here carry no behavior beyond construction helpers and serde
//! mappings. Validation lives in `formgate-core`.

#![forbid(unsafe_code)]

mod field;
mod response;

pub use field::{
    AttachmentFieldOptions, AttachmentSize, CheckboxFieldOptions, ChildrenFieldOptions,
    ChoiceFieldOptions, ColumnKind, DateFieldOptions, DateRule, DateValidationOptions,
    DecimalFieldOptions, EmailFieldOptions, FieldKind, FieldType, FormField, LengthRule,
    LengthValidationOptions, NumberFieldOptions, NumberRule, NumberValidationOptions,
    PhoneFieldOptions, RangeValidationOptions, RatingFieldOptions, RatingOptions,
    SelectionBounds, TableColumn, TableFieldOptions, TextFieldOptions, TextLengthRule,
    TextValidationOptions,
};
pub use response::{Attachment, FieldResponse, ParsedMultipartForm, SubmissionBody};
