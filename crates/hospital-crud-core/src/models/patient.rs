//! Patient models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Patch;

/// A patient record as persisted.
///
/// Records loaded from the store were validated when written and are not
/// re-validated on read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Store-assigned surrogate key; `None` until inserted
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// Normalized 11-digit CPF, unique across all patients
    pub cpf: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}

impl Patient {
    /// Constraint reported by the store when two patients share a CPF.
    pub const UNIQUE_CPF_CONSTRAINT: &'static str = "patients.cpf";

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Payload for registering a new patient.
///
/// `id` exists only so that a caller-supplied id can be rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
}

impl NewPatient {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>, cpf: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
            cpf: cpf.into(),
            email: None,
            phone: None,
            date_of_birth: None,
        }
    }
}

/// Partial update of an existing patient. Fields left as [`Patch::Keep`]
/// are not touched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PatientUpdate {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub first_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub last_name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub cpf: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub email: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub phone: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_keep")]
    pub date_of_birth: Patch<NaiveDate>,
}

impl PatientUpdate {
    /// An update for `id` that changes nothing yet.
    pub fn for_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

/// Names of patient fields, as reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    Id,
    FirstName,
    LastName,
    Cpf,
    Email,
    Phone,
    DateOfBirth,
}

impl PatientField {
    /// Wire name of the field (camelCase).
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientField::Id => "id",
            PatientField::FirstName => "firstName",
            PatientField::LastName => "lastName",
            PatientField::Cpf => "cpf",
            PatientField::Email => "email",
            PatientField::Phone => "phone",
            PatientField::DateOfBirth => "dateOfBirth",
        }
    }

    /// Map a `patients` column name back to its field.
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "id" => Some(PatientField::Id),
            "first_name" => Some(PatientField::FirstName),
            "last_name" => Some(PatientField::LastName),
            "cpf" => Some(PatientField::Cpf),
            "email" => Some(PatientField::Email),
            "phone" => Some(PatientField::Phone),
            "date_of_birth" => Some(PatientField::DateOfBirth),
            _ => None,
        }
    }
}

impl std::fmt::Display for PatientField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let patient = Patient {
            id: Some(1),
            first_name: "Fulano".into(),
            last_name: "de Tal".into(),
            cpf: "69819324076".into(),
            email: None,
            phone: None,
            date_of_birth: None,
        };
        assert_eq!(patient.full_name(), "Fulano de Tal");
    }

    #[test]
    fn test_new_patient_from_json() {
        let json = r#"{
            "firstName": "Fulano",
            "lastName": "de Tal",
            "cpf": "698.193.240-76",
            "email": "email@test.com",
            "phone": "(77)7777-7777",
            "dateOfBirth": "1988-09-10"
        }"#;
        let payload: NewPatient = serde_json::from_str(json).unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.cpf, "698.193.240-76");
        assert_eq!(payload.date_of_birth, NaiveDate::from_ymd_opt(1988, 9, 10));
    }

    #[test]
    fn test_update_from_json() {
        let update: PatientUpdate =
            serde_json::from_str(r#"{"id": 1, "phone": "(48)98802-0412", "email": null}"#).unwrap();
        assert_eq!(update.id, Some(1));
        assert_eq!(update.phone, Patch::Set("(48)98802-0412".to_string()));
        assert_eq!(update.email, Patch::Keep);
        assert_eq!(update.first_name, Patch::Keep);
        assert_eq!(update.date_of_birth, Patch::Keep);
    }

    #[test]
    fn test_field_columns() {
        assert_eq!(PatientField::from_column("first_name"), Some(PatientField::FirstName));
        assert_eq!(PatientField::from_column("date_of_birth").unwrap().as_str(), "dateOfBirth");
        assert_eq!(PatientField::from_column("created_at"), None);
    }
}
