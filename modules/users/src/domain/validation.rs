//! Field rules shared by `NewUser` and `UserPatch`.
//!
//! Custom checks set their own message so that the derive attributes stay short.

use std::borrow::Cow;
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// Optional leading `+`, then 10 to 15 digits.
pub static PHONE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern is valid"));

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

pub fn first_name_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("blank", "First name must not be blank."));
    }
    Ok(())
}

pub fn last_name_present(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("blank", "Last name must not be blank."));
    }
    Ok(())
}

/// Required email: blank and malformed values get distinct messages.
pub fn email_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(with_message("blank", "Email must not be blank"));
    }
    email_format(value)
}

pub fn email_format(value: &str) -> Result<(), ValidationError> {
    if !value.trim().to_string().validate_email() {
        return Err(with_message("email", "Email must be valid"));
    }
    Ok(())
}

/// Flatten validator output into `field -> message`, keeping the first message per field.
pub fn collect_field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{field} is invalid"));
            (field.to_string(), message)
        })
        .collect()
}
