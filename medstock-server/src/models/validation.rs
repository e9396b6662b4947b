//! Validation error types

use std::fmt;

/// Validation error for request input and write payloads
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Numeric field is below zero
    Negative { field: &'static str },

    /// Field or payload is empty when it shouldn't be
    Empty { field: &'static str },

    /// Query parameter is not a positive integer
    NotPositive { field: &'static str, value: String },

    /// Numeric value above what the field accepts
    TooLarge { field: &'static str, max: u64 },

    /// Value doesn't match the required format
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { field } => write!(f, "{} must not be less than 0", field),
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::NotPositive { field, value } => {
                write!(f, "{} must be a positive integer, got '{}'", field, value)
            }
            Self::TooLarge { field, max } => write!(f, "{} must not be greater than {}", field, max),
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::Negative { field: "price" };
        assert_eq!(err.to_string(), "price must not be less than 0");

        let err = ValidationError::NotPositive {
            field: "page",
            value: "0".into(),
        };
        assert_eq!(err.to_string(), "page must be a positive integer, got '0'");

        let err = ValidationError::TooLarge {
            field: "limit",
            max: 4294967295,
        };
        assert_eq!(err.to_string(), "limit must not be greater than 4294967295");
    }
}
