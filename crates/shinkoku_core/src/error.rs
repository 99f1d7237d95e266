use std::fmt;

/// Errors raised while constructing or validating input value objects.
///
/// Calculators themselves never fail; every rejection happens before a
/// calculation runs.
#[derive(Debug, Clone)]
pub enum ValidationError {
    /// A yen amount that must be non-negative was negative
    NegativeAmount { field: &'static str, value: i64 },
    /// A date string did not have the `YYYY-MM-DD` shape
    MalformedDate { field: &'static str, value: String },
    /// A date string had the right shape but is not a real calendar date
    InvalidDate {
        field: &'static str,
        value: String,
        source: jiff::Error,
    },
    /// An enumerated field held a value outside its domain
    UnknownVariant { field: &'static str, value: String },
    /// A numeric field fell outside its permitted range
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// A field required by the builder was never set
    MissingField { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NegativeAmount { field, value } => {
                write!(f, "{field} must be non-negative (got {value})")
            }
            ValidationError::MalformedDate { field, value } => {
                write!(f, "{field} must be a YYYY-MM-DD date (got {value:?})")
            }
            ValidationError::InvalidDate { field, value, .. } => {
                write!(f, "{field} is not a valid calendar date ({value:?})")
            }
            ValidationError::UnknownVariant { field, value } => {
                write!(f, "unknown value {value:?} for {field}")
            }
            ValidationError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be between {min} and {max} (got {value})"),
            ValidationError::MissingField { field } => write!(f, "{field} is required"),
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationError::InvalidDate { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;

/// Reject a negative amount for a field that only admits zero or more yen.
#[inline]
pub fn non_negative(field: &'static str, value: i64) -> Result<i64> {
    if value < 0 {
        Err(ValidationError::NegativeAmount { field, value })
    } else {
        Ok(value)
    }
}
