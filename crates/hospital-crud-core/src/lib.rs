//! Hospital CRUD Core Library
//!
//! Patient record management for a small clinic: registration, lookup,
//! partial update and deletion, with CPF uniqueness enforced by the store.
//!
//! # Architecture
//!
//! ```text
//!   FFI host (HospitalCrudCore)
//!            │
//!            ▼
//!     PatientService ──► validation (reject early)
//!            │       └─► merge (partial updates)
//!            ▼
//!       PatientStore ──► Database (SQLite)
//!            │
//!   StoreError ──► PatientError ──► HospitalCrudError
//! ```
//!
//! # Modules
//!
//! - [`validation`]: CPF, email, phone and date-of-birth validators
//! - [`models`]: Domain types (Patient, NewPatient, PatientUpdate, Patch)
//! - [`merge`]: Creation-time normalization and the partial-update merge
//! - [`store`]: Persistence gateway trait and its failure signals
//! - [`db`]: SQLite implementation of the gateway
//! - [`service`]: Orchestration and error translation
//! - [`config`]: Environment configuration

pub mod config;
pub mod db;
pub mod error;
pub mod merge;
pub mod models;
pub mod service;
pub mod store;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use db::Database;
pub use error::{PatientError, PatientKey, PatientResult};
pub use models::{NewPatient, Patch, Patient, PatientField, PatientUpdate};
pub use service::PatientService;
pub use store::{PatientStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum HospitalCrudError {
    #[error("Invalid {field}: {message}")]
    BadRequest { field: String, message: String },

    #[error("Conflict on {field}: {message}")]
    Conflict { field: String, message: String },

    #[error("Not found: {message}")]
    NotFound { field: String, message: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl From<PatientError> for HospitalCrudError {
    fn from(e: PatientError) -> Self {
        let message = e.to_string();
        let field = e.field().map(|f| f.as_str().to_string()).unwrap_or_default();
        match e {
            PatientError::DuplicateCpf { .. } => HospitalCrudError::Conflict { field, message },
            PatientError::NotFound { .. } => HospitalCrudError::NotFound { field, message },
            PatientError::Validation(_)
            | PatientError::MissingId
            | PatientError::IdNotAllowed
            | PatientError::ValueTooLong { .. } => HospitalCrudError::BadRequest { field, message },
            PatientError::SchemaNotReady { .. } | PatientError::Unexpected { .. } => {
                tracing::warn!(error = %message, "patient operation failed");
                HospitalCrudError::Unexpected { message }
            }
        }
    }
}

impl From<db::DbError> for HospitalCrudError {
    fn from(e: db::DbError) -> Self {
        HospitalCrudError::Unexpected {
            message: e.to_string(),
        }
    }
}

impl From<config::ConfigError> for HospitalCrudError {
    fn from(e: config::ConfigError) -> Self {
        HospitalCrudError::Unexpected {
            message: e.to_string(),
        }
    }
}

impl From<serde_json::Error> for HospitalCrudError {
    fn from(e: serde_json::Error) -> Self {
        HospitalCrudError::Unexpected {
            message: e.to_string(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for HospitalCrudError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        HospitalCrudError::Unexpected {
            message: format!("Lock poisoned: {}", e),
        }
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install a tracing subscriber. `filter` uses `RUST_LOG` syntax; defaults
/// to `hospital_crud_core=info`. Calling again has no effect.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    let filter = filter.unwrap_or_else(|| "hospital_crud_core=info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .try_init();
}

/// Open or create a database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<HospitalCrudCore>, HospitalCrudError> {
    let db = Database::open(&path)?;
    Ok(HospitalCrudCore::with_database(db))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<HospitalCrudCore>, HospitalCrudError> {
    let db = Database::open_in_memory()?;
    Ok(HospitalCrudCore::with_database(db))
}

/// Open the database described by the environment (see [`config`]).
#[uniffi::export]
pub fn open_database_from_env() -> Result<Arc<HospitalCrudCore>, HospitalCrudError> {
    let config = Config::from_env()?;
    let db = config.open_database()?;
    Ok(HospitalCrudCore::with_database(db))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe patient service wrapper for FFI.
#[derive(uniffi::Object)]
pub struct HospitalCrudCore {
    service: Arc<Mutex<PatientService<Database>>>,
}

impl HospitalCrudCore {
    fn with_database(db: Database) -> Arc<Self> {
        Arc::new(Self {
            service: Arc::new(Mutex::new(PatientService::new(db))),
        })
    }
}

#[uniffi::export]
impl HospitalCrudCore {
    /// Register a new patient.
    pub fn add_patient(&self, patient: FfiNewPatient) -> Result<FfiPatient, HospitalCrudError> {
        let payload: NewPatient = patient.try_into()?;
        let service = self.service.lock()?;
        let created = service.create(payload)?;
        tracing::info!(id = ?created.id, "patient registered");
        Ok(created.into())
    }

    /// List all patients.
    pub fn list_patients(&self) -> Result<Vec<FfiPatient>, HospitalCrudError> {
        let service = self.service.lock()?;
        let patients = service.get_all()?;
        Ok(patients.into_iter().map(|p| p.into()).collect())
    }

    /// Get a patient by database id.
    pub fn get_patient_by_id(&self, id: i64) -> Result<FfiPatient, HospitalCrudError> {
        let service = self.service.lock()?;
        Ok(service.get_by_id(id)?.into())
    }

    /// Get a patient by CPF (punctuation allowed).
    pub fn get_patient_by_cpf(&self, cpf: String) -> Result<FfiPatient, HospitalCrudError> {
        let service = self.service.lock()?;
        Ok(service.get_by_cpf(&cpf)?.into())
    }

    /// Apply a partial update; `None` fields are left unchanged.
    pub fn update_patient(&self, update: FfiPatientUpdate) -> Result<FfiPatient, HospitalCrudError> {
        let update: PatientUpdate = update.try_into()?;
        let service = self.service.lock()?;
        let updated = service.update(update)?;
        tracing::info!(id = ?updated.id, "patient updated");
        Ok(updated.into())
    }

    /// Replace every field of a patient; `None` optional fields are cleared.
    pub fn replace_patient(
        &self,
        id: Option<i64>,
        patient: FfiNewPatient,
    ) -> Result<FfiPatient, HospitalCrudError> {
        let payload: NewPatient = patient.try_into()?;
        let service = self.service.lock()?;
        let replaced = service.replace(id, payload)?;
        tracing::info!(id = ?replaced.id, "patient replaced");
        Ok(replaced.into())
    }

    /// Delete a patient by database id.
    pub fn delete_patient(&self, id: Option<i64>) -> Result<(), HospitalCrudError> {
        let service = self.service.lock()?;
        service.delete(id)?;
        tracing::info!(?id, "patient deleted");
        Ok(())
    }

    /// Export all patients as JSON.
    pub fn export_patients_json(&self) -> Result<String, HospitalCrudError> {
        let service = self.service.lock()?;
        let patients = service.get_all()?;
        Ok(serde_json::to_string_pretty(&patients)?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

fn parse_date_of_birth(value: Option<String>) -> Result<Option<NaiveDate>, HospitalCrudError> {
    let Some(value) = value else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(Some)
        .map_err(|e| HospitalCrudError::BadRequest {
            field: PatientField::DateOfBirth.as_str().to_string(),
            message: format!("expected YYYY-MM-DD: {}", e),
        })
}

/// FFI-safe patient. Dates are `YYYY-MM-DD`.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
}

impl From<Patient> for FfiPatient {
    fn from(patient: Patient) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            cpf: patient.cpf,
            email: patient.email,
            phone: patient.phone,
            date_of_birth: patient.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// FFI-safe registration payload.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNewPatient {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
}

impl TryFrom<FfiNewPatient> for NewPatient {
    type Error = HospitalCrudError;

    fn try_from(patient: FfiNewPatient) -> Result<Self, Self::Error> {
        Ok(NewPatient {
            id: patient.id,
            first_name: patient.first_name,
            last_name: patient.last_name,
            cpf: patient.cpf,
            email: patient.email,
            phone: patient.phone,
            date_of_birth: parse_date_of_birth(patient.date_of_birth)?,
        })
    }
}

/// FFI-safe partial update.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientUpdate {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<String>,
}

impl TryFrom<FfiPatientUpdate> for PatientUpdate {
    type Error = HospitalCrudError;

    fn try_from(update: FfiPatientUpdate) -> Result<Self, Self::Error> {
        Ok(PatientUpdate {
            id: update.id,
            first_name: update.first_name.into(),
            last_name: update.last_name.into(),
            cpf: update.cpf.into(),
            email: update.email.into(),
            phone: update.phone.into(),
            date_of_birth: parse_date_of_birth(update.date_of_birth)?.into(),
        })
    }
}
