//! Input validation helpers for chapters, characters and cards.
//!
//! Required text fields are trimmed and must be non-empty. Optional text
//! fields are trimmed too; on create an empty value collapses to `None`,
//! on update it is kept as `Some("")` which the store reads as "clear".

use crate::error::CoreError;
use crate::palette;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length for a chapter title or character name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for descriptions, roles and card content.
pub const MAX_TEXT_LEN: usize = 5000;

/// Maximum length for a card tag or an order rank.
pub const MAX_LABEL_LEN: usize = 64;

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Trim a required field and check it is non-empty and within `max` chars.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<String, CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    check_len(field, trimmed, max)?;
    Ok(trimmed.to_string())
}

/// Trim an optional field for an insert. Blank values become `None`.
pub fn optional_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            check_len(field, trimmed, max)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Trim an optional field for a partial update.
///
/// `None` leaves the stored value untouched, `Some("")` clears it.
pub fn patch_text(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, CoreError> {
    match value {
        None => Ok(None),
        Some(v) => {
            let trimmed = v.trim();
            check_len(field, trimmed, max)?;
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Validate an optional color for an insert. Blank values become `None`.
pub fn optional_color(value: Option<String>) -> Result<Option<String>, CoreError> {
    let value = optional_text("color", value, MAX_LABEL_LEN)?;
    if let Some(color) = &value {
        palette::validate_hex_color(color)?;
    }
    Ok(value.map(|c| c.to_ascii_uppercase()))
}

/// Validate an optional color for a partial update. `Some("")` clears it.
pub fn patch_color(value: Option<String>) -> Result<Option<String>, CoreError> {
    let value = patch_text("color", value, MAX_LABEL_LEN)?;
    if let Some(color) = value.as_deref().filter(|c| !c.is_empty()) {
        palette::validate_hex_color(color)?;
    }
    Ok(value.map(|c| c.to_ascii_uppercase()))
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} too long: {len} chars (max {max})"
        )));
    }
    Ok(())
}
