//! Contact form validation.
//!
//! Each rule is a plain function returning a typed outcome. [`validate_contact`]
//! runs them in a fixed order: presence, email grammar, sanitization, then the
//! length limits on the values that will actually be stored.

use crate::{
    constants::{EMAIL_MAX_LEN, MESSAGE_MAX_LEN, NAME_MAX_LEN},
    entities::contact_me::{ContactForm, SanitizedContact},
    errors::{ContactField, ValidationError},
    utils::{
        email::{is_valid_email, normalize_email},
        html::escape_html,
    },
};

/// Trimmed, non-empty value of a field.
pub fn require_present(value: Option<&str>) -> Result<&str, ValidationError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField),
    }
}

pub fn require_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

pub fn require_max_len(value: &str, field: ContactField, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub fn validate_contact(form: &ContactForm) -> Result<SanitizedContact, ValidationError> {
    let name = require_present(form.name.as_deref())?;
    let email = require_present(form.email.as_deref())?;
    let message = require_present(form.message.as_deref())?;

    require_email(email)?;

    let contact = SanitizedContact {
        name: escape_html(name).trim().to_string(),
        email: normalize_email(email).ok_or(ValidationError::InvalidEmail)?,
        message: escape_html(message).trim().to_string(),
    };

    require_max_len(&contact.name, ContactField::Name, NAME_MAX_LEN)?;
    require_max_len(&contact.email, ContactField::Email, EMAIL_MAX_LEN)?;
    require_max_len(&contact.message, ContactField::Message, MESSAGE_MAX_LEN)?;

    Ok(contact)
}
