//! Patient service: validation, merge and persistence orchestration.
//!
//! Validation fails fast before the store is touched. Store signals are
//! translated into [`PatientError`]; the service itself does not log.

use crate::error::{translate_store_error, PatientError, PatientKey, PatientResult};
use crate::merge::{apply_update, prepare_new_patient};
use crate::models::{NewPatient, Patch, Patient, PatientUpdate};
use crate::store::{PatientStore, StoreError};
use crate::validation::normalize_cpf;

/// Orchestrates patient CRUD over a [`PatientStore`].
pub struct PatientService<S> {
    store: S,
}

impl<S: PatientStore> PatientService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new patient and return it with its assigned id.
    pub fn create(&self, payload: NewPatient) -> PatientResult<Patient> {
        if payload.id.is_some() {
            return Err(PatientError::IdNotAllowed);
        }

        let patient = prepare_new_patient(payload)?;

        self.store
            .add(&patient)
            .map_err(|err| translate_store_error(err, Some(&patient.cpf), None))
    }

    /// Every stored patient. A store without its schema yields an empty list.
    pub fn get_all(&self) -> PatientResult<Vec<Patient>> {
        match self.store.get_all() {
            Ok(patients) => Ok(patients),
            Err(StoreError::UndefinedTable { .. }) => Ok(Vec::new()),
            Err(err) => Err(translate_store_error(err, None, None)),
        }
    }

    pub fn get_by_id(&self, id: i64) -> PatientResult<Patient> {
        self.store
            .get_by_id(id)
            .map_err(|err| translate_store_error(err, None, Some(PatientKey::Id(id))))
    }

    /// Lookup by CPF, normalized the same way it is stored.
    pub fn get_by_cpf(&self, cpf: &str) -> PatientResult<Patient> {
        let cpf = normalize_cpf(cpf);
        self.store
            .get_by_cpf(&cpf)
            .map_err(|err| translate_store_error(err, None, Some(PatientKey::Cpf(cpf.clone()))))
    }

    /// Apply a partial update and return the stored result.
    pub fn update(&self, update: PatientUpdate) -> PatientResult<Patient> {
        let id = update.id.ok_or(PatientError::MissingId)?;
        let current = self.get_by_id(id)?;

        let merged = apply_update(&current, update)?;

        self.store.update(&merged).map_err(|err| {
            translate_store_error(err, Some(&merged.cpf), Some(PatientKey::Id(id)))
        })?;
        Ok(merged)
    }

    /// Replace every field of an existing patient.
    ///
    /// Validation and normalization are the same as [`Self::update`] with all
    /// fields set; absent optional fields are cleared. The target id comes
    /// from `id` or, failing that, the payload; a payload id naming a
    /// different patient is rejected.
    pub fn replace(&self, id: Option<i64>, payload: NewPatient) -> PatientResult<Patient> {
        let id = id.or(payload.id).ok_or(PatientError::MissingId)?;
        if payload.id.is_some_and(|payload_id| payload_id != id) {
            return Err(PatientError::IdNotAllowed);
        }
        let update = PatientUpdate {
            id: Some(id),
            first_name: Patch::Set(payload.first_name),
            last_name: Patch::Set(payload.last_name),
            cpf: Patch::Set(payload.cpf),
            email: Patch::Set(payload.email.unwrap_or_default()),
            phone: Patch::Set(payload.phone.unwrap_or_default()),
            date_of_birth: payload.date_of_birth.into(),
        };
        let clear_date = payload.date_of_birth.is_none();

        let current = self.get_by_id(id)?;
        let mut merged = apply_update(&current, update)?;
        if clear_date {
            merged.date_of_birth = None;
        }

        self.store.update(&merged).map_err(|err| {
            translate_store_error(err, Some(&merged.cpf), Some(PatientKey::Id(id)))
        })?;
        Ok(merged)
    }

    /// Hard-delete a patient.
    pub fn delete(&self, id: Option<i64>) -> PatientResult<()> {
        let id = id.ok_or(PatientError::MissingId)?;
        self.store
            .delete(id)
            .map_err(|err| translate_store_error(err, None, Some(PatientKey::Id(id))))
    }
}
