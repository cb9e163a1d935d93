//! Validation error types and field helpers
//!
//! Required fields are checked for presence and length before a row is
//! constructed; the storage layer's NOT NULL constraints are a backstop,
//! not the primary check.

use std::fmt;

/// Validation error for form fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is missing or empty
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field is not a valid integer id
    InvalidId { field: &'static str, value: String },

    /// Field is not a parseable timestamp
    InvalidTimestamp { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidId { field, value } => {
                write!(f, "{} is not a valid id: '{}'", field, value)
            }
            Self::InvalidTimestamp { field, value } => {
                write!(f, "{} is not a valid timestamp: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a required text field: present, non-empty after trimming,
/// within `max` characters.
pub fn required(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.map(|v| v.trim().to_owned()).unwrap_or_default();
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(value)
}

/// Validate an optional text field: empty or absent maps to `None`.
pub fn optional(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let value = value.map(|v| v.trim().to_owned()).unwrap_or_default();
    if value.is_empty() {
        return Ok(None);
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(Some(value))
}

/// Parse a required integer id field.
pub fn required_id(
    field: &'static str,
    value: Option<String>,
) -> Result<i64, ValidationError> {
    let value = required(field, value, 20)?;
    value.parse::<i64>().map_err(|_| ValidationError::InvalidId {
        field,
        value,
    })
}
