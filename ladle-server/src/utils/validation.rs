//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! booking handlers. Limits are UX-reasonable caps; the document store has
//! no built-in length enforcement.

use crate::utils::error::FieldError;

// ── Text length limits ──────────────────────────────────────────────

/// Contact / recipient names
pub const MAX_NAME_LEN: usize = 200;

/// Notes, rejection reasons, item-modification reasons
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, vehicle details, coupon codes
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Delivery addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Field-error accumulation ────────────────────────────────────────

/// Collects field errors so a request reports everything wrong at once.
#[derive(Debug, Default)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Require a present, non-empty string within the length limit.
    pub fn require_text(&mut self, value: Option<&str>, field: &str, max_len: usize) {
        match value {
            None => self.push(field, format!("{field} is required")),
            Some(v) if v.trim().is_empty() => self.push(field, format!("{field} must not be empty")),
            Some(v) if v.len() > max_len => self.push(
                field,
                format!("{field} is too long ({} chars, max {max_len})", v.len()),
            ),
            Some(_) => {}
        }
    }

    /// Validate an optional string's length if present.
    pub fn optional_text(&mut self, value: Option<&str>, field: &str, max_len: usize) {
        if let Some(v) = value
            && v.len() > max_len
        {
            self.push(
                field,
                format!("{field} is too long ({} chars, max {max_len})", v.len()),
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume into the error list for [`crate::utils::AppError::Validation`].
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
