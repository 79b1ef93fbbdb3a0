//! Required-field validation for listing input.

use crate::error::CoreError;

/// Ensure a required text field is present and not blank.
///
/// `field` is the field name used in the error message.
pub fn require_non_blank(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Like [`require_non_blank`], but only checks fields that are being set.
///
/// Used for partial updates: `None` leaves the stored value untouched and
/// is always accepted.
pub fn require_non_blank_if_set(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => require_non_blank(field, v),
        None => Ok(()),
    }
}
