//! Form field schema.
//!
//! A form is an ordered list of [`FormField`]s. Each field has a stable id, a
//! `required` flag and a [`FieldKind`] carrying the per-type constraint data.
//! On the wire the kind is flattened into the field object and discriminated
//! by its `fieldType` key:
//!
//! ```json
//! { "_id": "f1", "title": "NRIC", "required": true, "fieldType": "nric" }
//! ```

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Field-type tag shared by form fields and submitted responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "statement")]
    Statement,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "textfield")]
    ShortText,
    #[serde(rename = "textarea")]
    LongText,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "mobile")]
    Mobile,
    #[serde(rename = "homeno")]
    HomeNo,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "dropdown")]
    Dropdown,
    #[serde(rename = "radiobutton")]
    Radio,
    #[serde(rename = "checkbox")]
    Checkbox,
    #[serde(rename = "rating")]
    Rating,
    #[serde(rename = "yes_no")]
    YesNo,
    #[serde(rename = "nric")]
    Nric,
    #[serde(rename = "uen")]
    Uen,
    #[serde(rename = "country_region")]
    CountryRegion,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "attachment")]
    Attachment,
    #[serde(rename = "children")]
    Children,
}

impl FieldType {
    /// Returns the wire name of this field type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Statement => "statement",
            Self::Image => "image",
            Self::ShortText => "textfield",
            Self::LongText => "textarea",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::Email => "email",
            Self::Mobile => "mobile",
            Self::HomeNo => "homeno",
            Self::Date => "date",
            Self::Dropdown => "dropdown",
            Self::Radio => "radiobutton",
            Self::Checkbox => "checkbox",
            Self::Rating => "rating",
            Self::YesNo => "yes_no",
            Self::Nric => "nric",
            Self::Uen => "uen",
            Self::CountryRegion => "country_region",
            Self::Table => "table",
            Self::Attachment => "attachment",
            Self::Children => "children",
        }
    }

    /// Returns true for fields that only display content and never take an answer.
    #[must_use]
    pub fn is_display_only(self) -> bool {
        matches!(self, Self::Section | Self::Statement | Self::Image)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Stable field id, matched against `FieldResponse::id`.
    #[serde(rename = "_id")]
    pub id: String,
    /// Question text shown to respondents.
    #[serde(default)]
    pub title: String,
    /// Whether a visible field must be answered.
    #[serde(default = "required_by_default")]
    pub required: bool,
    /// Field type and its constraint data.
    #[serde(flatten)]
    pub kind: FieldKind,
}

fn required_by_default() -> bool {
    true
}

impl FormField {
    /// Create a required field with an empty title.
    #[must_use]
    pub fn new(id: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            required: true,
            kind,
        }
    }

    /// Set the question title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set whether the field must be answered when visible.
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Returns the field's type tag.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }
}

/// Field type together with its type-specific constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "fieldType")]
pub enum FieldKind {
    #[serde(rename = "section")]
    Section,
    #[serde(rename = "statement")]
    Statement,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "textfield")]
    ShortText(TextFieldOptions),
    #[serde(rename = "textarea")]
    LongText(TextFieldOptions),
    #[serde(rename = "number")]
    Number(NumberFieldOptions),
    #[serde(rename = "decimal")]
    Decimal(DecimalFieldOptions),
    #[serde(rename = "email")]
    Email(EmailFieldOptions),
    #[serde(rename = "mobile")]
    Mobile(PhoneFieldOptions),
    #[serde(rename = "homeno")]
    HomeNo(PhoneFieldOptions),
    #[serde(rename = "date")]
    Date(DateFieldOptions),
    #[serde(rename = "dropdown")]
    Dropdown(ChoiceFieldOptions),
    #[serde(rename = "radiobutton")]
    Radio(ChoiceFieldOptions),
    #[serde(rename = "checkbox")]
    Checkbox(CheckboxFieldOptions),
    #[serde(rename = "rating")]
    Rating(RatingFieldOptions),
    #[serde(rename = "yes_no")]
    YesNo,
    #[serde(rename = "nric")]
    Nric,
    #[serde(rename = "uen")]
    Uen,
    #[serde(rename = "country_region")]
    CountryRegion,
    #[serde(rename = "table")]
    Table(TableFieldOptions),
    #[serde(rename = "attachment")]
    Attachment(AttachmentFieldOptions),
    #[serde(rename = "children")]
    Children(ChildrenFieldOptions),
}

impl FieldKind {
    /// Returns the type tag for this kind.
    #[must_use]
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Section => FieldType::Section,
            Self::Statement => FieldType::Statement,
            Self::Image => FieldType::Image,
            Self::ShortText(_) => FieldType::ShortText,
            Self::LongText(_) => FieldType::LongText,
            Self::Number(_) => FieldType::Number,
            Self::Decimal(_) => FieldType::Decimal,
            Self::Email(_) => FieldType::Email,
            Self::Mobile(_) => FieldType::Mobile,
            Self::HomeNo(_) => FieldType::HomeNo,
            Self::Date(_) => FieldType::Date,
            Self::Dropdown(_) => FieldType::Dropdown,
            Self::Radio(_) => FieldType::Radio,
            Self::Checkbox(_) => FieldType::Checkbox,
            Self::Rating(_) => FieldType::Rating,
            Self::YesNo => FieldType::YesNo,
            Self::Nric => FieldType::Nric,
            Self::Uen => FieldType::Uen,
            Self::CountryRegion => FieldType::CountryRegion,
            Self::Table(_) => FieldType::Table,
            Self::Attachment(_) => FieldType::Attachment,
            Self::Children(_) => FieldType::Children,
        }
    }
}

// ============================================================================
// Text
// ============================================================================

/// Options for short and long text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextFieldOptions {
    pub validation_options: TextValidationOptions,
}

/// Character-count constraint for text answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextValidationOptions {
    pub selected_validation: Option<TextLengthRule>,
    pub custom_val: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextLengthRule {
    Exact,
    Minimum,
    Maximum,
}

// ============================================================================
// Number / Decimal
// ============================================================================

/// Options for whole-number fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberFieldOptions {
    pub validation_options: NumberValidationOptions,
}

/// Number fields validate either digit count or numeric range, never both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberValidationOptions {
    pub selected_validation: Option<NumberRule>,
    pub length_validation_options: LengthValidationOptions,
    pub range_validation_options: RangeValidationOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberRule {
    Length,
    Range,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LengthValidationOptions {
    pub selected_length_validation: Option<LengthRule>,
    pub custom_val: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthRule {
    Min,
    Max,
    Exact,
}

/// Inclusive numeric bounds. A missing bound is unbounded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RangeValidationOptions {
    pub custom_min: Option<f64>,
    pub custom_max: Option<f64>,
}

/// Options for decimal fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecimalFieldOptions {
    pub validate_by_value: bool,
    pub validation_options: RangeValidationOptions,
}

// ============================================================================
// Contact
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailFieldOptions {
    pub has_allowed_email_domains: bool,
    /// Domains written with a leading `@`, e.g. `@agency.gov.sg`.
    pub allowed_email_domains: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhoneFieldOptions {
    pub allow_intl_numbers: bool,
}

// ============================================================================
// Date
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateFieldOptions {
    pub date_validation: DateValidationOptions,
    /// Weekdays respondents may not pick.
    pub invalid_days: Vec<Weekday>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DateValidationOptions {
    pub selected_date_validation: Option<DateRule>,
    pub custom_min_date: Option<NaiveDate>,
    pub custom_max_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRule {
    #[serde(rename = "Disallow past dates", alias = "NoPast")]
    NoPast,
    #[serde(rename = "Disallow future dates", alias = "NoFuture")]
    NoFuture,
    #[serde(rename = "Custom date range", alias = "Custom")]
    Custom,
}

// ============================================================================
// Choice
// ============================================================================

/// Options for dropdown and radio fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChoiceFieldOptions {
    pub field_options: Vec<String>,
    /// Radio only: accept a free-text `Others: ...` answer.
    pub others_radio_button: bool,
}

impl ChoiceFieldOptions {
    #[must_use]
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            field_options: options.into_iter().map(Into::into).collect(),
            others_radio_button: false,
        }
    }

    #[must_use]
    pub fn with_others(mut self) -> Self {
        self.others_radio_button = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckboxFieldOptions {
    pub field_options: Vec<String>,
    pub others_radio_button: bool,
    /// Gates the selection-count bounds in `validation_options`.
    pub validate_by_value: bool,
    #[serde(rename = "ValidationOptions", alias = "validationOptions")]
    pub validation_options: SelectionBounds,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectionBounds {
    pub custom_min: Option<usize>,
    pub custom_max: Option<usize>,
}

// ============================================================================
// Rating
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingFieldOptions {
    pub rating_options: RatingOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingOptions {
    pub steps: u32,
}

impl Default for RatingOptions {
    fn default() -> Self {
        Self { steps: 5 }
    }
}

// ============================================================================
// Table / Children
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableFieldOptions {
    pub minimum_rows: usize,
    pub add_more_rows: bool,
    pub maximum_rows: Option<usize>,
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableColumn {
    #[serde(default)]
    pub title: String,
    #[serde(default = "required_by_default")]
    pub required: bool,
    #[serde(flatten)]
    pub kind: ColumnKind,
}

impl TableColumn {
    #[must_use]
    pub fn short_text(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            required: true,
            kind: ColumnKind::ShortText,
        }
    }

    #[must_use]
    pub fn dropdown<I, S>(title: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            required: true,
            kind: ColumnKind::Dropdown {
                field_options: options.into_iter().map(Into::into).collect(),
            },
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "columnType")]
pub enum ColumnKind {
    #[serde(rename = "textfield")]
    ShortText,
    #[serde(rename = "dropdown", rename_all = "camelCase")]
    Dropdown { field_options: Vec<String> },
}

/// Options for a children-list field: one row per child, one value per sub-field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildrenFieldOptions {
    pub children_sub_fields: Vec<String>,
    pub allow_multiple: bool,
}

// ============================================================================
// Attachment
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttachmentFieldOptions {
    pub attachment_size: AttachmentSize,
}

/// Per-field attachment ceiling, in mebibytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentSize {
    #[default]
    #[serde(rename = "1")]
    OneMb,
    #[serde(rename = "2")]
    TwoMb,
    #[serde(rename = "3")]
    ThreeMb,
    #[serde(rename = "7")]
    SevenMb,
    #[serde(rename = "10")]
    TenMb,
    #[serde(rename = "20")]
    TwentyMb,
}

impl AttachmentSize {
    /// Returns the ceiling in mebibytes.
    #[must_use]
    pub fn megabytes(self) -> usize {
        match self {
            Self::OneMb => 1,
            Self::TwoMb => 2,
            Self::ThreeMb => 3,
            Self::SevenMb => 7,
            Self::TenMb => 10,
            Self::TwentyMb => 20,
        }
    }

    /// Returns the ceiling in bytes.
    #[must_use]
    pub fn bytes(self) -> usize {
        self.megabytes() * 1024 * 1024
    }
}
