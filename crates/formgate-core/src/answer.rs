//! Typed answers.
//!
//! Clients submit answers as loosely shaped JSON. [`Answer::from_response`]
//! converts a raw [`FieldResponse`] into the shape its field type expects,
//! rejecting anything else as a response-shape error.

use formgate_types::{FieldResponse, FieldType};
use serde_json::Value;

use crate::error::ValidateFieldError;

/// An answer in the shape its field type expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Display-only fields carry no answer.
    None,
    /// Text-like and single-choice fields.
    Single(String),
    /// Checkbox selections.
    Multiple(Vec<String>),
    /// Table and children-list rows.
    Rows(Vec<Vec<String>>),
    /// An uploaded file. `answer` is what the client submitted, `filename`
    /// and `content` what the upload carried.
    File {
        answer: String,
        filename: String,
        content: Vec<u8>,
    },
}

impl Answer {
    /// Convert a raw response into the answer shape for `field_type`.
    pub fn from_response(
        field_type: FieldType,
        response: FieldResponse,
    ) -> Result<Self, ValidateFieldError> {
        match field_type {
            FieldType::Section | FieldType::Statement | FieldType::Image => Ok(Self::None),
            FieldType::Checkbox => string_array(response.answer_array).map(Self::Multiple),
            FieldType::Table | FieldType::Children => rows(response.answer_array).map(Self::Rows),
            FieldType::Attachment => {
                let answer = single_string(response.answer)?;
                Ok(Self::File {
                    answer,
                    filename: response.filename.unwrap_or_default(),
                    content: response.content,
                })
            }
            FieldType::ShortText
            | FieldType::LongText
            | FieldType::Number
            | FieldType::Decimal
            | FieldType::Email
            | FieldType::Mobile
            | FieldType::HomeNo
            | FieldType::Date
            | FieldType::Dropdown
            | FieldType::Radio
            | FieldType::Rating
            | FieldType::YesNo
            | FieldType::Nric
            | FieldType::Uen
            | FieldType::CountryRegion => single_string(response.answer).map(Self::Single),
        }
    }

    /// Whether the respondent effectively left the field blank.
    ///
    /// Whitespace-only text counts as blank. A table is blank only when every
    /// cell is blank. A file is blank when it has no answer, name or content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Single(answer) => answer.trim().is_empty(),
            Self::Multiple(answers) => answers.is_empty(),
            Self::Rows(rows) => rows
                .iter()
                .all(|row| row.iter().all(|cell| cell.trim().is_empty())),
            Self::File {
                answer,
                filename,
                content,
            } => answer.trim().is_empty() && filename.trim().is_empty() && content.is_empty(),
        }
    }

    /// Returns the single-string answer, if this is one.
    #[must_use]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(answer) => Some(answer),
            _ => None,
        }
    }
}

fn single_string(value: Option<Value>) -> Result<String, ValidateFieldError> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(answer)) => Ok(answer),
        Some(_) => Err(ValidateFieldError::response_shape(
            "answer is not a single string",
        )),
    }
}

fn string_array(value: Option<Value>) -> Result<Vec<String>, ValidateFieldError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                _ => Err(ValidateFieldError::response_shape(
                    "answerArray contains a non-string value",
                )),
            })
            .collect(),
        Some(_) => Err(ValidateFieldError::response_shape(
            "answerArray is not an array",
        )),
    }
}

fn rows(value: Option<Value>) -> Result<Vec<Vec<String>>, ValidateFieldError> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(rows)) => rows
            .into_iter()
            .map(|row| match row {
                Value::Array(_) => string_array(Some(row)),
                _ => Err(ValidateFieldError::response_shape(
                    "answerArray row is not an array",
                )),
            })
            .collect(),
        Some(_) => Err(ValidateFieldError::response_shape(
            "answerArray is not an array",
        )),
    }
}
