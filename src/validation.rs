//! Request validation errors.

/// Why a request was rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        value: i64,
    },

    #[error("{field} must be a positive number, got {value}")]
    NotPositive { field: &'static str, value: i64 },

    #[error("category {0} does not exist")]
    UnknownCategory(i64),

    /// Body, query or path could not be decoded into the expected shape.
    #[error("{0}")]
    Malformed(String),
}

/// Trimmed, non-empty text field.
pub fn required_text(field: &'static str, value: Option<String>) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

pub fn in_range(
    field: &'static str,
    value: Option<i64>,
    min: i64,
    max: i64,
) -> Result<i64, ValidationError> {
    let value = value.ok_or(ValidationError::Missing { field })?;
    if !(min..=max).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            value,
        });
    }
    Ok(value)
}
