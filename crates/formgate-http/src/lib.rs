//! HTTP-facing submission receiver.
//!
//! This crate adapts a host server's request (headers plus a body byte
//! stream) to the formgate core:
//!
//! - [`Headers`]: a case-insensitive header map
//! - [`MultipartReceiver`]: pulls the body stream through the incremental
//!   multipart parser and reconciles uploads into the submitted responses
//! - [`ReceiverError`]: terminal receive failures with their HTTP status
//!
//! The receiver is runtime-agnostic: any [`futures_core::Stream`] of
//! [`bytes::Bytes`] can feed it.

#![forbid(unsafe_code)]

pub mod error;
mod headers;
pub mod multipart;
mod receiver;

pub use error::ReceiverError;
pub use headers::Headers;
pub use receiver::{BODY_FIELD, MultipartReceiver, ReceiverPhase};
