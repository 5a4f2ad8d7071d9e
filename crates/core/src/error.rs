use std::collections::BTreeMap;

use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::types::DbId;

/// Per-field validation messages, keyed by the submitted field name.
///
/// A `BTreeMap` keeps the serialized order stable for clients and tests.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A submitted form failed validation; the form should be shown again
    /// with these messages next to the offending fields.
    #[error("Form validation failed on {} field(s)", .0.len())]
    InvalidForm(FieldErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        CoreError::InvalidForm(field_errors(&errors))
    }
}

/// Flatten `validator` output into [`FieldErrors`].
///
/// Errors inside nested structs and lists are reported under dotted keys,
/// e.g. `genres[0].name`.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    collect(errors, "", &mut fields);
    fields
}

fn collect(errors: &ValidationErrors, prefix: &str, fields: &mut FieldErrors) {
    for (field, kind) in errors.errors() {
        let key = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(errs) => {
                fields
                    .entry(key)
                    .or_default()
                    .extend(errs.iter().map(describe));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &format!("{key}."), fields),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{key}[{index}]."), fields);
                }
            }
        }
    }
}

fn describe(error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => match error.code.as_ref() {
            "required" => "This field is required.".to_string(),
            "email" => "Enter a valid email address.".to_string(),
            "length" => "Ensure this value has a valid length.".to_string(),
            "range" => "Ensure this value is within the allowed range.".to_string(),
            code => format!("Invalid value ({code})."),
        },
    }
}
