//! Streaming multipart submission receiver.
//!
//! [`MultipartReceiver`] pulls a request body chunk by chunk from any
//! [`Stream`] of [`Bytes`], feeding each chunk to the incremental
//! [`MultipartParser`]. Nothing is read ahead: the next chunk is requested only
//! after the previous one has been parsed and its bytes accounted against the
//! [`SizeLimits`], so an oversized part stops the pull immediately.
//!
//! Once the closing boundary is seen the receiver decodes nothing further from
//! the stream and reconciles uploaded files into the `body` responses.
//!
//! ```ignore
//! let mut receiver = MultipartReceiver::new(&headers, SizeLimits::default())?;
//! let form = receiver.receive(body_stream).await?;
//! ```

use std::fmt;
use std::pin::pin;
use std::time::Instant;

use bytes::Bytes;
use formgate_core::{
    MultipartParser, MultipartStreamState, Part, SizeLimits, parse_boundary,
    reconcile_attachments,
};
use formgate_types::{Attachment, ParsedMultipartForm, SubmissionBody};
use futures_core::Stream;
use futures_util::StreamExt;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::ReceiverError;
use crate::headers::Headers;

/// Name of the part carrying the JSON submission.
pub const BODY_FIELD: &str = "body";

/// Lifecycle of a receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverPhase {
    /// Constructed; no bytes pulled yet.
    AwaitingParts,
    /// Pulling chunks and emitting parts.
    PartsInFlight,
    /// Stream complete; merging attachments into responses.
    Reconciling,
    /// Finished, successfully or not.
    Done,
}

impl fmt::Display for ReceiverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingParts => "awaiting_parts",
            Self::PartsInFlight => "parts_in_flight",
            Self::Reconciling => "reconciling",
            Self::Done => "done",
        })
    }
}

/// Parts collected so far.
#[derive(Debug, Default)]
struct Collected {
    body: Option<SubmissionBody>,
    attachments: Vec<Attachment>,
}

/// Receives one `multipart/form-data` submission.
#[derive(Debug)]
pub struct MultipartReceiver {
    parser: MultipartParser,
    declared_length: Option<usize>,
    phase: ReceiverPhase,
}

impl MultipartReceiver {
    /// Create a receiver for a request with the given headers.
    ///
    /// Fails with [`ReceiverError::Initialise`] when the limits are invalid or
    /// the content type is missing, not multipart or has no usable boundary.
    pub fn new(headers: &Headers, limits: SizeLimits) -> Result<Self, ReceiverError> {
        limits.validate()?;
        let content_type = headers
            .content_type()
            .ok_or_else(|| ReceiverError::Initialise {
                detail: "missing Content-Type header".to_string(),
            })?;
        let boundary = parse_boundary(content_type).map_err(|err| ReceiverError::Initialise {
            detail: err.to_string(),
        })?;

        Ok(Self {
            parser: MultipartParser::new(&boundary, limits),
            declared_length: headers.content_length(),
            phase: ReceiverPhase::AwaitingParts,
        })
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ReceiverPhase {
        self.phase
    }

    /// The limits this receiver enforces.
    #[must_use]
    pub fn limits(&self) -> &SizeLimits {
        self.parser.limits()
    }

    /// Consume `stream` and produce the reconciled form.
    ///
    /// Stops pulling at the first error. Partially accumulated parts are
    /// dropped with the receiver state and never reach the caller.
    pub async fn receive<S, E>(&mut self, stream: S) -> Result<ParsedMultipartForm, ReceiverError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: fmt::Display,
    {
        let span = info_span!("receive_submission");
        let start = Instant::now();
        let result = self.drive(stream).instrument(span.clone()).await;
        self.transition(ReceiverPhase::Done);

        let _guard = span.enter();
        match &result {
            Ok(form) => info!(
                responses = form.len(),
                attachments = form.attachments().count(),
                elapsed_micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
                "submission received"
            ),
            Err(err) => warn!(kind = err.kind(), error = %err, "submission receive failed"),
        }
        result
    }

    async fn drive<S, E>(&mut self, stream: S) -> Result<ParsedMultipartForm, ReceiverError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: fmt::Display,
    {
        if self.phase != ReceiverPhase::AwaitingParts {
            return Err(ReceiverError::multipart("receiver has already been used"));
        }
        let max_request = self.limits().get_max_request_bytes();
        if let Some(declared) = self.declared_length.filter(|&len| len > max_request) {
            return Err(ReceiverError::ContentLimit {
                source: formgate_core::MultipartError::TotalTooLarge {
                    size: declared,
                    max: max_request,
                },
            });
        }
        self.transition(ReceiverPhase::PartsInFlight);

        let mut stream = pin!(stream);
        let mut buffer: Vec<u8> = Vec::new();
        let mut state = MultipartStreamState::default();
        let mut collected = Collected::default();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| ReceiverError::multipart(format!("stream error: {err}")))?;
            buffer.extend_from_slice(&chunk);
            let parts = self.parser.parse_incremental(&mut buffer, &mut state, false)?;
            accept_parts(parts, &mut collected)?;
            if state.is_done() {
                break;
            }
        }
        if !state.is_done() {
            let parts = self.parser.parse_incremental(&mut buffer, &mut state, true)?;
            accept_parts(parts, &mut collected)?;
        }

        self.transition(ReceiverPhase::Reconciling);
        let Some(body) = collected.body else {
            return Err(ReceiverError::multipart("no body field received"));
        };
        Ok(reconcile_attachments(body.responses, collected.attachments))
    }

    fn transition(&mut self, next: ReceiverPhase) {
        debug!(from = %self.phase, to = %next, "receiver phase");
        self.phase = next;
    }
}

fn accept_parts(parts: Vec<Part>, collected: &mut Collected) -> Result<(), ReceiverError> {
    for part in parts {
        debug!(
            name = %part.name,
            file = part.is_file(),
            size = part.size(),
            "multipart part received"
        );
        match part.filename {
            Some(filename) if !filename.is_empty() => {
                collected
                    .attachments
                    .push(Attachment::new(part.name, filename, part.data));
            }
            Some(_) => {}
            None if part.name == BODY_FIELD => {
                let body: SubmissionBody =
                    serde_json::from_slice(&part.data).map_err(|err| {
                        ReceiverError::ContentParsing {
                            detail: err.to_string(),
                        }
                    })?;
                collected.body = Some(body);
            }
            None => {}
        }
    }
    Ok(())
}
