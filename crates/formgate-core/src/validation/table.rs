use formgate_types::{ChildrenFieldOptions, ColumnKind, TableFieldOptions};

use crate::error::ValidateFieldError;

/// Row-count bounds, then per-row cell checks. Requiredness is carried by
/// each column rather than by the field.
pub(super) fn validate_table(
    options: &TableFieldOptions,
    rows: &[Vec<String>],
) -> Result<(), ValidateFieldError> {
    let count = rows.len();
    if count < options.minimum_rows {
        return Err(ValidateFieldError::invalid_answer(
            "TableValidator: fewer rows than minimum",
        ));
    }
    if options.add_more_rows {
        if options.maximum_rows.is_some_and(|max| count > max) {
            return Err(ValidateFieldError::invalid_answer(
                "TableValidator: more rows than maximum",
            ));
        }
    } else if options.minimum_rows > 0 && count != options.minimum_rows {
        return Err(ValidateFieldError::invalid_answer(
            "TableValidator: row count differs from configured rows",
        ));
    }

    for row in rows {
        if row.len() != options.columns.len() {
            return Err(ValidateFieldError::invalid_answer(
                "TableValidator: row does not match column count",
            ));
        }
        for (cell, column) in row.iter().zip(&options.columns) {
            let blank = cell.trim().is_empty();
            if blank {
                if column.required {
                    return Err(ValidateFieldError::invalid_answer(
                        "TableValidator: required column left blank",
                    ));
                }
                continue;
            }
            if let ColumnKind::Dropdown { field_options } = &column.kind {
                if !field_options.iter().any(|option| option == cell) {
                    return Err(ValidateFieldError::invalid_answer(
                        "TableValidator: cell is not a valid dropdown option",
                    ));
                }
            }
        }
    }
    Ok(())
}

pub(super) fn validate_children(
    options: &ChildrenFieldOptions,
    rows: &[Vec<String>],
) -> Result<(), ValidateFieldError> {
    if !options.allow_multiple && rows.len() > 1 {
        return Err(ValidateFieldError::invalid_answer(
            "ChildrenValidator: multiple children not allowed",
        ));
    }
    let width = options.children_sub_fields.len();
    if rows.iter().any(|row| row.len() != width) {
        return Err(ValidateFieldError::invalid_answer(
            "ChildrenValidator: row does not match sub-field count",
        ));
    }
    Ok(())
}
