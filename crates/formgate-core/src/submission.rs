//! Whole-submission validation.
//!
//! [`validate_submission`] walks the form's fields in declaration order,
//! pairs each with the client's response for the same id and validates it.
//! The first failure aborts the walk.

use std::collections::HashMap;
use std::time::Instant;

use formgate_types::{FieldResponse, FieldType, FormField};
use tracing::{debug, info, info_span, warn};

use crate::answer::Answer;
use crate::error::SubmissionValidationError;
use crate::validation::{ValidationContext, process_field};

/// A response that passed validation, in the shape downstream consumers use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedResponse {
    pub field_id: String,
    /// The field's question title.
    pub question: String,
    pub field_type: FieldType,
    pub is_visible: bool,
    pub answer: Answer,
}

/// Validate every answerable field of a form against the submitted responses.
///
/// Display-only fields are skipped. A field with no matching response is
/// treated as an empty visible response. Responses for ids the form does not
/// declare are ignored. When several responses share an id the last one wins.
///
/// Returns the processed responses in field order, or the first failure
/// attributed to its field id.
pub fn validate_submission(
    fields: &[FormField],
    responses: Vec<FieldResponse>,
    ctx: &ValidationContext,
) -> Result<Vec<ProcessedResponse>, SubmissionValidationError> {
    let span = info_span!("validate_submission", fields = fields.len());
    let _guard = span.enter();
    let start = Instant::now();

    let submitted = responses.len();
    let mut by_id: HashMap<String, FieldResponse> = responses
        .into_iter()
        .map(|response| (response.id.clone(), response))
        .collect();

    let mut processed = Vec::with_capacity(fields.len());
    for field in fields {
        let field_type = field.field_type();
        if field_type.is_display_only() {
            continue;
        }

        let response = by_id
            .remove(&field.id)
            .unwrap_or_else(|| FieldResponse::empty(field.id.clone(), field_type));
        let is_visible = response.is_visible;

        match process_field(field, response, ctx) {
            Ok(answer) => processed.push(ProcessedResponse {
                field_id: field.id.clone(),
                question: field.title.clone(),
                field_type,
                is_visible,
                answer,
            }),
            Err(error) => {
                warn!(
                    field_id = %field.id,
                    field_type = %field_type,
                    kind = error.kind().as_str(),
                    detail = error.detail(),
                    "submission rejected"
                );
                return Err(SubmissionValidationError {
                    field_id: field.id.clone(),
                    error,
                });
            }
        }
    }

    if !by_id.is_empty() {
        debug!(ignored = by_id.len(), "responses for undeclared fields ignored");
    }
    info!(
        submitted,
        accepted = processed.len(),
        elapsed_micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
        "submission validated"
    );
    Ok(processed)
}
