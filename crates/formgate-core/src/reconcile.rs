//! Merging received attachments into submitted responses.
//!
//! Files and the JSON `body` arrive as independent multipart parts. Once the
//! stream is drained, [`reconcile_attachments`] pairs every file with the
//! attachment response of the same field id.

use std::collections::{HashMap, HashSet};

use formgate_types::{Attachment, FieldResponse, FieldType, ParsedMultipartForm};
use serde_json::Value;

/// Keep only the last attachment received for each field id, preserving the
/// order of those survivors.
#[must_use]
pub fn dedupe_by_field_id(attachments: Vec<Attachment>) -> Vec<Attachment> {
    let mut last_index: HashMap<&str, usize> = HashMap::with_capacity(attachments.len());
    for (index, attachment) in attachments.iter().enumerate() {
        last_index.insert(attachment.field_id.as_str(), index);
    }
    let keep: HashSet<usize> = last_index.into_values().collect();

    attachments
        .into_iter()
        .enumerate()
        .filter_map(|(index, attachment)| keep.contains(&index).then_some(attachment))
        .collect()
}

/// Give every attachment a distinct filename.
///
/// The last attachment with a given name keeps it; earlier ones are renamed
/// `1-name`, `2-name`, ... counting back from the end. A generated name never
/// collides with a name already in use.
pub fn rename_duplicate_filenames(attachments: &mut [Attachment]) {
    let mut taken: HashSet<String> = HashSet::with_capacity(attachments.len());
    let mut counters: HashMap<String, usize> = HashMap::new();

    for attachment in attachments.iter_mut().rev() {
        if taken.insert(attachment.filename.clone()) {
            continue;
        }
        let counter = counters.entry(attachment.filename.clone()).or_insert(0);
        let renamed = loop {
            *counter += 1;
            let candidate = format!("{}-{}", counter, attachment.filename);
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(renamed.clone());
        attachment.filename = renamed;
    }
}

/// Splice attachment content into the attachment responses that reference
/// them. Attachments whose field id matches no attachment response are
/// dropped.
#[must_use]
pub fn reconcile_attachments(
    mut responses: Vec<FieldResponse>,
    attachments: Vec<Attachment>,
) -> ParsedMultipartForm {
    let mut attachments = dedupe_by_field_id(attachments);
    rename_duplicate_filenames(&mut attachments);

    let mut by_field: HashMap<String, Attachment> = attachments
        .into_iter()
        .map(|attachment| (attachment.field_id.clone(), attachment))
        .collect();

    for response in &mut responses {
        if response.field_type != FieldType::Attachment {
            continue;
        }
        if let Some(attachment) = by_field.remove(&response.id) {
            response.answer = Some(Value::String(attachment.filename.clone()));
            response.filename = Some(attachment.filename);
            response.content = attachment.content;
        }
    }

    if !by_field.is_empty() {
        tracing::debug!(
            unmatched = by_field.len(),
            "dropping attachments with no matching response"
        );
    }

    ParsedMultipartForm::new(responses)
}
