//! Client-side form gate, run before a note is submitted.
//!
//! Stricter than the store's own validation: it may reject input the server
//! would accept. The server stays the final authority.

use super::note::NoteInput;
use super::validation::{ValidationErrors, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};

pub const MIN_FORM_TITLE_LENGTH: usize = 3;
pub const MIN_FORM_DESCRIPTION_LENGTH: usize = 10;

/// What the user typed into the note form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub description: String,
}

impl NoteForm {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Run the form gate and, if it passes, produce the request payload.
    pub fn submit(&self) -> Result<NoteInput, ValidationErrors> {
        validate_form(self)?;
        Ok(NoteInput::new(self.title.clone(), self.description.clone()))
    }
}

pub fn validate_form(form: &NoteForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check(
        &mut errors,
        "title",
        "Title",
        &form.title,
        MIN_FORM_TITLE_LENGTH,
        MAX_TITLE_LENGTH,
    );
    check(
        &mut errors,
        "description",
        "Description",
        &form.description,
        MIN_FORM_DESCRIPTION_LENGTH,
        MAX_DESCRIPTION_LENGTH,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    text: &str,
    min: usize,
    max: usize,
) {
    // Blank means missing, but the length check runs on the untrimmed text.
    let len = text.chars().count();
    if text.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    } else if len < min {
        errors.add(field, format!("{label} must be at least {min} characters long"));
    } else if len > max {
        errors.add(field, format!("{label} must not exceed {max} characters"));
    }
}
