//! Multipart form data parser.
//!
//! `formgate-http` re-exports the canonical multipart implementation from
//! `formgate-core` so the receiver and direct callers share identical behavior.

pub use formgate_core::multipart::{
    MAX_PART_HEADER_BYTES, MultipartError, MultipartParser, MultipartStreamState, Part,
    parse_boundary,
};
pub use formgate_core::{FieldAccumulator, PartKind};
