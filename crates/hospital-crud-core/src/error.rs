//! Domain error taxonomy and store-signal translation.

use thiserror::Error;

use crate::models::{Patient, PatientField};
use crate::store::StoreError;
use crate::validation::ValidationError;

/// Key used to look a patient up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientKey {
    Id(i64),
    Cpf(String),
}

impl std::fmt::Display for PatientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatientKey::Id(id) => write!(f, "id {}", id),
            PatientKey::Cpf(cpf) => write!(f, "CPF {}", cpf),
        }
    }
}

/// Errors returned by [`crate::service::PatientService`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatientError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("A patient with CPF {cpf} already exists")]
    DuplicateCpf { cpf: String },

    #[error("Patient not found with {key}")]
    NotFound { key: PatientKey },

    #[error("The id required for this operation was not provided")]
    MissingId,

    #[error("An id must not be provided when registering a new patient")]
    IdNotAllowed,

    #[error("Value too long for {field}")]
    ValueTooLong { field: PatientField },

    #[error("Patient storage is not initialized: relation {relation} does not exist")]
    SchemaNotReady { relation: String },

    #[error("Unexpected storage error: {cause}")]
    Unexpected { cause: String },
}

impl PatientError {
    /// The field an error should be reported against, if any.
    pub fn field(&self) -> Option<PatientField> {
        match self {
            PatientError::Validation(err) => Some(err.field),
            PatientError::DuplicateCpf { .. } => Some(PatientField::Cpf),
            PatientError::NotFound { key: PatientKey::Id(_) } => Some(PatientField::Id),
            PatientError::NotFound { key: PatientKey::Cpf(_) } => Some(PatientField::Cpf),
            PatientError::MissingId | PatientError::IdNotAllowed => Some(PatientField::Id),
            PatientError::ValueTooLong { field } => Some(*field),
            PatientError::SchemaNotReady { .. } | PatientError::Unexpected { .. } => None,
        }
    }
}

pub type PatientResult<T> = Result<T, PatientError>;

/// Translate a store signal into the domain taxonomy.
///
/// `cpf` is the normalized CPF being written, reported on duplicates; `key`
/// is what a not-found refers to. A not-found with no key is unexpected.
pub fn translate_store_error(err: StoreError, cpf: Option<&str>, key: Option<PatientKey>) -> PatientError {
    match err {
        StoreError::UniqueViolation { constraint } if constraint == Patient::UNIQUE_CPF_CONSTRAINT => {
            PatientError::DuplicateCpf {
                cpf: cpf.unwrap_or_default().to_string(),
            }
        }
        StoreError::ValueTooLong { column } => match PatientField::from_column(&column) {
            Some(field) => PatientError::ValueTooLong { field },
            None => PatientError::Unexpected {
                cause: format!("value too long for column {}", column),
            },
        },
        StoreError::NotFound(raw) => match key {
            Some(key) => PatientError::NotFound { key },
            None => PatientError::Unexpected {
                cause: format!("record not found: {}", raw),
            },
        },
        StoreError::UndefinedTable { relation } => PatientError::SchemaNotReady { relation },
        other => PatientError::Unexpected {
            cause: other.to_string(),
        },
    }
}
