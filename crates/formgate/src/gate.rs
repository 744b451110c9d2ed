//! End-to-end submission processing.

use std::fmt;

use bytes::Bytes;
use formgate_core::{
    AttachmentPolicy, AttachmentPolicyError, ProcessedResponse, SizeLimits,
    SubmissionValidationError, ValidationContext, validate_submission,
};
use formgate_http::{Headers, MultipartReceiver, ReceiverError};
use formgate_types::FormField;
use futures_core::Stream;
use thiserror::Error;

/// Any failure between the first byte and a validated submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Receive(#[from] ReceiverError),
    #[error(transparent)]
    Attachments(#[from] AttachmentPolicyError),
    #[error(transparent)]
    Validation(#[from] SubmissionValidationError),
}

impl SubmissionError {
    /// HTTP status to answer with.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Receive(err) => err.status_code(),
            Self::Attachments(AttachmentPolicyError::TooLarge { .. }) => 422,
            Self::Attachments(_) | Self::Validation(_) => 400,
        }
    }

    /// Message safe to return to the client.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Receive(err) => err.public_message(),
            Self::Attachments(err) => err.public_message(),
            Self::Validation(err) => err.error.message(),
        }
    }
}

/// Receive, police and validate submissions for one form.
///
/// Holds the form definition and the resolved configuration. Each call to
/// [`SubmissionGate::process`] owns its own receiver, so one gate can serve
/// concurrent requests.
#[derive(Debug, Clone)]
pub struct SubmissionGate {
    fields: Vec<FormField>,
    limits: SizeLimits,
    policy: AttachmentPolicy,
}

impl SubmissionGate {
    /// Gate with default limits and the email-mode attachment policy.
    #[must_use]
    pub fn new(fields: Vec<FormField>) -> Self {
        Self {
            fields,
            limits: SizeLimits::default(),
            policy: AttachmentPolicy::default(),
        }
    }

    /// Set the multipart size limits.
    #[must_use]
    pub fn limits(mut self, limits: SizeLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Set the attachment policy.
    #[must_use]
    pub fn attachment_policy(mut self, policy: AttachmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The form's fields, in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Process a submission, reading today's date from the local clock.
    pub async fn process<S, E>(
        &self,
        headers: &Headers,
        stream: S,
    ) -> Result<Vec<ProcessedResponse>, SubmissionError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: fmt::Display,
    {
        self.process_with(headers, stream, &ValidationContext::from_clock())
            .await
    }

    /// Process a submission against an explicit validation context.
    pub async fn process_with<S, E>(
        &self,
        headers: &Headers,
        stream: S,
        ctx: &ValidationContext,
    ) -> Result<Vec<ProcessedResponse>, SubmissionError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: fmt::Display,
    {
        let mut receiver = MultipartReceiver::new(headers, self.limits)?;
        let form = receiver.receive(stream).await?;
        self.policy.check(&form)?;
        let processed = validate_submission(&self.fields, form.into_responses(), ctx)?;
        Ok(processed)
    }
}
