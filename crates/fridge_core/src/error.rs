//! crates/fridge_core/src/error.rs
//!
//! Errors raised when caller-supplied values break a domain rule.

/// Rejected input for one of the core state containers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },
    #[error("{field} must be at least {min}, got {actual}")]
    TooSmall {
        field: &'static str,
        min: i64,
        actual: i64,
    },
    #[error("{field} must be at most {max}, got {actual}")]
    TooLarge {
        field: &'static str,
        max: i64,
        actual: i64,
    },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(())
}

pub(crate) fn require_at_least(field: &'static str, min: i64, actual: i64) -> ValidationResult<()> {
    if actual < min {
        return Err(ValidationError::TooSmall { field, min, actual });
    }
    Ok(())
}

pub(crate) fn require_at_most(field: &'static str, max: i64, actual: i64) -> ValidationResult<()> {
    if actual > max {
        return Err(ValidationError::TooLarge { field, max, actual });
    }
    Ok(())
}
