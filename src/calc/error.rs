//! Calculation errors.

use thiserror::Error;

/// Why a calculation was refused. Every variant is recoverable: the caller
/// fixes the offending field and asks again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// A required field is missing, blank or not a number.
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A numeric field is outside its allowed range.
    #[error("{field} out of range: {reason}")]
    InvalidRange { field: &'static str, reason: String },

    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),
}

impl CalcError {
    pub fn missing(field: &'static str) -> Self {
        CalcError::InvalidInput {
            field,
            reason: "value is required".to_string(),
        }
    }

    pub fn not_positive(field: &'static str) -> Self {
        CalcError::InvalidRange {
            field,
            reason: "must be greater than 0".to_string(),
        }
    }

    pub fn overflow(field: &'static str) -> Self {
        CalcError::InvalidRange {
            field,
            reason: "value too large to calculate with".to_string(),
        }
    }

    /// Name of the field at fault, if the error concerns one.
    #[cfg(test)]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::InvalidRange { field, .. } => {
                Some(field)
            }
            CalcError::UnknownInstrument(_) => None,
        }
    }
}
