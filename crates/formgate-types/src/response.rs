//! Submitted responses and received attachments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::field::FieldType;

/// One untrusted response as submitted by the client.
///
/// The answer payload is kept loosely typed (`answer` / `answer_array` as raw
/// JSON) so that a payload of the wrong shape can be reported as a validation
/// failure on the owning field instead of failing the whole body decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_array: Option<Value>,
    #[serde(default = "visible_by_default")]
    pub is_visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Uploaded bytes, spliced in by the receiver. Never read from JSON.
    #[serde(skip)]
    pub content: Vec<u8>,
}

fn visible_by_default() -> bool {
    true
}

impl FieldResponse {
    fn bare(id: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            question: None,
            field_type,
            answer: None,
            answer_array: None,
            is_visible: true,
            filename: None,
            content: Vec::new(),
        }
    }

    /// A visible response with no answer at all.
    #[must_use]
    pub fn empty(id: impl Into<String>, field_type: FieldType) -> Self {
        Self::bare(id, field_type)
    }

    /// A single-string answer.
    #[must_use]
    pub fn single(id: impl Into<String>, field_type: FieldType, answer: impl Into<String>) -> Self {
        let mut response = Self::bare(id, field_type);
        response.answer = Some(Value::String(answer.into()));
        response
    }

    /// A multi-select answer (checkbox).
    #[must_use]
    pub fn multiple<I, S>(id: impl Into<String>, field_type: FieldType, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut response = Self::bare(id, field_type);
        response.answer_array = Some(Value::Array(
            answers
                .into_iter()
                .map(|a| Value::String(a.into()))
                .collect(),
        ));
        response
    }

    /// A row-based answer (table, children).
    #[must_use]
    pub fn rows<R, C, S>(id: impl Into<String>, field_type: FieldType, rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut response = Self::bare(id, field_type);
        response.answer_array = Some(Value::Array(
            rows.into_iter()
                .map(|row| {
                    Value::Array(row.into_iter().map(|c| Value::String(c.into())).collect())
                })
                .collect(),
        ));
        response
    }

    /// An attachment answer carrying its uploaded content.
    #[must_use]
    pub fn attachment(
        id: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        let filename = filename.into();
        let mut response = Self::bare(id, FieldType::Attachment);
        response.answer = Some(Value::String(filename.clone()));
        response.filename = Some(filename);
        response.content = content.into();
        response
    }

    /// Mark the response as submitted for a hidden field.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

/// The decoded `body` part of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionBody {
    pub responses: Vec<FieldResponse>,
}

/// A file received over multipart, keyed by the field it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field_id: String,
    pub filename: String,
    pub content: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn new(
        field_id: impl Into<String>,
        filename: impl Into<String>,
        content: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            field_id: field_id.into(),
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Size of the content in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Output of the multipart receiver: the submitted responses, in submission
/// order, with uploaded attachment content merged in by field id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedMultipartForm {
    responses: Vec<FieldResponse>,
}

impl ParsedMultipartForm {
    #[must_use]
    pub fn new(responses: Vec<FieldResponse>) -> Self {
        Self { responses }
    }

    #[must_use]
    pub fn responses(&self) -> &[FieldResponse] {
        &self.responses
    }

    #[must_use]
    pub fn into_responses(self) -> Vec<FieldResponse> {
        self.responses
    }

    /// Find the response for a field id.
    #[must_use]
    pub fn get(&self, field_id: &str) -> Option<&FieldResponse> {
        self.responses.iter().find(|r| r.id == field_id)
    }

    /// Iterate over attachment responses that carry uploaded content.
    pub fn attachments(&self) -> impl Iterator<Item = &FieldResponse> {
        self.responses
            .iter()
            .filter(|r| r.field_type == FieldType::Attachment && !r.content.is_empty())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_body_defaults_visibility() {
        let body: SubmissionBody = serde_json::from_value(json!({
            "responses": [
                { "_id": "f1", "fieldType": "nric", "answer": "S9912345A" },
                { "_id": "f2", "fieldType": "yes_no", "answer": "Yes", "isVisible": false }
            ],
            "version": 2
        }))
        .unwrap();
        assert_eq!(body.responses.len(), 2);
        assert!(body.responses[0].is_visible);
        assert!(!body.responses[1].is_visible);
        assert!(body.responses[0].content.is_empty());
    }

    #[test]
    fn test_decode_body_ignores_content_key() {
        let body: SubmissionBody = serde_json::from_value(json!({
            "responses": [
                { "_id": "a", "fieldType": "attachment", "answer": "x.pdf", "content": [1, 2, 3] }
            ]
        }))
        .unwrap();
        assert!(body.responses[0].content.is_empty());
    }

    #[test]
    fn test_constructors_shape_answers() {
        let single = FieldResponse::single("f", FieldType::ShortText, "hi");
        assert_eq!(single.answer, Some(json!("hi")));

        let multi = FieldResponse::multiple("f", FieldType::Checkbox, ["a", "b"]);
        assert_eq!(multi.answer_array, Some(json!(["a", "b"])));

        let rows = FieldResponse::rows("f", FieldType::Table, [["a", "b"], ["c", "d"]]);
        assert_eq!(rows.answer_array, Some(json!([["a", "b"], ["c", "d"]])));

        let file = FieldResponse::attachment("f", "doc.pdf", b"%PDF".to_vec()).hidden();
        assert_eq!(file.filename.as_deref(), Some("doc.pdf"));
        assert_eq!(file.content, b"%PDF");
        assert!(!file.is_visible);
    }

    #[test]
    fn test_parsed_form_lookup() {
        let form = ParsedMultipartForm::new(vec![
            FieldResponse::single("f1", FieldType::Nric, "S9912345A"),
            FieldResponse::attachment("f2", "a.txt", b"abc".to_vec()),
            FieldResponse::empty("f3", FieldType::Attachment),
        ]);
        assert_eq!(form.len(), 3);
        assert!(form.get("f2").is_some());
        assert!(form.get("zz").is_none());
        assert_eq!(form.attachments().count(), 1);
    }
}
