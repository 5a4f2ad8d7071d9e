//! Form validation glue: declarative `validator` rules plus the checks a
//! handler can only make against the database (uniqueness, references).

use pantry_core::error::{field_errors, CoreError, FieldErrors};
use pantry_core::types::DbId;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Field errors collected while checking one form submission.
#[derive(Debug, Default)]
pub struct FormErrors(FieldErrors);

impl FormErrors {
    /// Start from the form's declarative validation result.
    pub fn validate<T: Validate>(form: &T) -> Self {
        match form.validate() {
            Ok(()) => Self::default(),
            Err(errors) => Self(field_errors(&errors)),
        }
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Whether `field` already has an error, so costlier checks can be skipped.
    pub fn has(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Report every referenced id in `requested` missing from `existing`.
    pub fn require_choices(&mut self, field: &str, requested: &[DbId], existing: &[DbId]) {
        for id in requested.iter().filter(|id| !existing.contains(id)) {
            self.add(field, invalid_choice(*id));
        }
    }

    /// `Ok` when nothing was reported, otherwise the collected errors.
    pub fn finish(self) -> AppResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::InvalidForm(self.0)))
        }
    }
}

/// Message for a submitted id that matches no row.
pub fn invalid_choice(id: DbId) -> String {
    format!("Select a valid choice. {id} is not one of the available choices.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[derive(Validate)]
    struct NameOnly {
        #[validate(length(min = 1, message = "This field is required."))]
        name: String,
    }

    #[test]
    fn declarative_and_manual_errors_merge() {
        let mut errors = FormErrors::validate(&NameOnly {
            name: String::new(),
        });
        assert!(errors.has("name"));
        errors.add("name", "Also taken.");

        let err = errors.finish().unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidForm(fields)) => {
            assert_eq!(fields["name"].len(), 2);
        });
    }

    #[test]
    fn missing_choices_reported_per_id() {
        let mut errors = FormErrors::default();
        errors.require_choices("tags", &[1, 2, 3], &[2]);

        let err = errors.finish().unwrap_err();
        assert_matches!(err, AppError::Core(CoreError::InvalidForm(fields)) => {
            assert_eq!(fields["tags"], vec![invalid_choice(1), invalid_choice(3)]);
        });
    }

    #[test]
    fn clean_form_passes() {
        let errors = FormErrors::validate(&NameOnly { name: "ok".into() });
        assert!(errors.finish().is_ok());
    }
}
