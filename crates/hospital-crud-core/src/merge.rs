//! Creation-time preparation and the partial-update merge.
//!
//! Both paths run every incoming value through the same validation and
//! normalization, so a record written by either is indistinguishable.

use crate::models::{NewPatient, Patch, Patient, PatientField, PatientUpdate};
use crate::validation::{
    normalize_cpf, normalize_email, normalize_phone, validate_cpf, validate_date_of_birth,
    validate_required_text, CpfError, ValidationError, ValidationReason, ValidationResult,
    MAX_NAME_LENGTH,
};

/// Validate a mandatory CPF and return its normalized digits.
pub fn normalize_required_cpf(raw: &str) -> ValidationResult<String> {
    if raw.trim().is_empty() {
        return Err(ValidationError::new(PatientField::Cpf, ValidationReason::Required));
    }
    validate_cpf(Some(raw)).map_err(|err| {
        let reason = match err {
            CpfError::InvalidLength => ValidationReason::InvalidCpfLength,
            CpfError::InvalidFormat => ValidationReason::InvalidCpfFormat,
        };
        ValidationError::new(PatientField::Cpf, reason)
    })?;
    Ok(normalize_cpf(raw))
}

fn checked_name(field: PatientField, value: String) -> ValidationResult<String> {
    validate_required_text(field, &value, MAX_NAME_LENGTH)?;
    Ok(value)
}

/// Validate a creation payload and build the entity to insert.
///
/// The payload's `id` is ignored here; rejecting it is the caller's job.
pub fn prepare_new_patient(payload: NewPatient) -> ValidationResult<Patient> {
    let first_name = checked_name(PatientField::FirstName, payload.first_name)?;
    let last_name = checked_name(PatientField::LastName, payload.last_name)?;
    let cpf = normalize_required_cpf(&payload.cpf)?;
    let email = normalize_email(payload.email.as_deref())?;
    let phone = normalize_phone(payload.phone.as_deref())?;
    validate_date_of_birth(payload.date_of_birth)?;

    Ok(Patient {
        id: None,
        first_name,
        last_name,
        cpf,
        email,
        phone,
        date_of_birth: payload.date_of_birth,
    })
}

/// Apply a partial update onto `patient`.
///
/// Fields set in the update are validated and normalized, then overwrite the
/// current value; [`Patch::Keep`] fields are untouched. Nothing is applied
/// unless every set field is valid. The id is never changed.
pub fn apply_update(patient: &Patient, update: PatientUpdate) -> ValidationResult<Patient> {
    let mut merged = patient.clone();

    if let Patch::Set(first_name) = update.first_name {
        merged.first_name = checked_name(PatientField::FirstName, first_name)?;
    }
    if let Patch::Set(last_name) = update.last_name {
        merged.last_name = checked_name(PatientField::LastName, last_name)?;
    }
    if let Patch::Set(phone) = update.phone {
        merged.phone = normalize_phone(Some(&phone))?;
    }
    if let Patch::Set(email) = update.email {
        merged.email = normalize_email(Some(&email))?;
    }
    if let Patch::Set(cpf) = update.cpf {
        merged.cpf = normalize_required_cpf(&cpf)?;
    }
    if let Patch::Set(date_of_birth) = update.date_of_birth {
        validate_date_of_birth(Some(date_of_birth))?;
        merged.date_of_birth = Some(date_of_birth);
    }

    Ok(merged)
}
