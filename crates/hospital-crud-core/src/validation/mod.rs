//! Field-level validation for patient data.
//!
//! Every validator is a plain function that either accepts the value or
//! returns a [`ValidationError`] naming the field and the reason. Validators
//! run before any store interaction.

mod cpf;
mod fields;

pub use cpf::*;
pub use fields::*;

use thiserror::Error;

use crate::models::PatientField;

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// Mandatory field missing or blank.
    Required,
    /// Longer than the column allows.
    TooLong { max: usize },
    /// CPF does not have exactly 11 digits after normalization.
    InvalidCpfLength,
    /// CPF contains non-digits or fails the check-digit test.
    InvalidCpfFormat,
    InvalidEmail,
    InvalidPhone,
    /// Date of birth is the zero sentinel, today, or in the future.
    InvalidDateOfBirth,
}

impl std::fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationReason::Required => write!(f, "is required"),
            ValidationReason::TooLong { max } => {
                write!(f, "must be at most {} characters long", max)
            }
            ValidationReason::InvalidCpfLength => {
                write!(f, "invalid CPF length (exactly 11 digits required)")
            }
            ValidationReason::InvalidCpfFormat => write!(f, "invalid CPF"),
            ValidationReason::InvalidEmail => write!(f, "invalid email address"),
            ValidationReason::InvalidPhone => write!(f, "invalid phone format"),
            ValidationReason::InvalidDateOfBirth => write!(f, "invalid date of birth"),
        }
    }
}

/// A field-level rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: PatientField,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: PatientField, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;
