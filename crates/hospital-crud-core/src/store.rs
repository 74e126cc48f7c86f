//! Persistence gateway for patient records.
//!
//! [`PatientStore`] is the CRUD surface the service depends on. Failures are
//! reported as [`StoreError`] signals that carry no backend-specific types;
//! the SQLite implementation lives in [`crate::db`].

use thiserror::Error;

use crate::models::Patient;

/// Structured failure signals raised by a store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation { constraint: String },

    /// A value exceeded the column's length bound.
    #[error("Value too long for column: {column}")]
    ValueTooLong { column: String },

    /// The expected relation does not exist (schema not initialized).
    #[error("Relation does not exist: {relation}")]
    UndefinedTable { relation: String },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Store failure: {0}")]
    Other(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD capability over patient records.
pub trait PatientStore {
    /// Insert a patient without an id; returns it with the assigned id.
    fn add(&self, patient: &Patient) -> StoreResult<Patient>;

    /// Overwrite the stored record with the same id.
    fn update(&self, patient: &Patient) -> StoreResult<()>;

    /// Hard-delete by id. Fails `NotFound` if absent.
    fn delete(&self, id: i64) -> StoreResult<()>;

    fn get_by_id(&self, id: i64) -> StoreResult<Patient>;

    /// Lookup by normalized CPF. Fails `NotFound` on zero matches.
    fn get_by_cpf(&self, cpf: &str) -> StoreResult<Patient>;

    fn get_all(&self) -> StoreResult<Vec<Patient>>;
}

impl<S: PatientStore + ?Sized> PatientStore for &S {
    fn add(&self, patient: &Patient) -> StoreResult<Patient> {
        (**self).add(patient)
    }

    fn update(&self, patient: &Patient) -> StoreResult<()> {
        (**self).update(patient)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        (**self).delete(id)
    }

    fn get_by_id(&self, id: i64) -> StoreResult<Patient> {
        (**self).get_by_id(id)
    }

    fn get_by_cpf(&self, cpf: &str) -> StoreResult<Patient> {
        (**self).get_by_cpf(cpf)
    }

    fn get_all(&self) -> StoreResult<Vec<Patient>> {
        (**self).get_all()
    }
}
