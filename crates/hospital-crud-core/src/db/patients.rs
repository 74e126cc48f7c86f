//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::Database;
use crate::models::Patient;
use crate::store::{PatientStore, StoreError, StoreResult};

const SELECT_PATIENT: &str = r#"
    SELECT id, first_name, last_name, cpf, email, phone, date_of_birth
    FROM patients
"#;

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        cpf: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        date_of_birth: row.get(6)?,
    })
}

impl Database {
    /// Insert a new patient and return it with its assigned id.
    pub fn insert_patient(&self, patient: &Patient) -> StoreResult<Patient> {
        if patient.id.is_some() {
            return Err(StoreError::Other(
                "cannot insert a patient that already has an id".into(),
            ));
        }

        self.conn.execute(
            r#"
            INSERT INTO patients (
                first_name, last_name, cpf, email, phone, date_of_birth
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                patient.first_name,
                patient.last_name,
                patient.cpf,
                patient.email,
                patient.phone,
                patient.date_of_birth,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "patient inserted");

        Ok(Patient {
            id: Some(id),
            ..patient.clone()
        })
    }

    /// Update an existing patient. Returns false if no row has its id.
    pub fn update_patient(&self, patient: &Patient) -> StoreResult<bool> {
        let Some(id) = patient.id else {
            return Err(StoreError::Other("cannot update a patient without an id".into()));
        };

        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                cpf = ?4,
                email = ?5,
                phone = ?6,
                date_of_birth = ?7,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                id,
                patient.first_name,
                patient.last_name,
                patient.cpf,
                patient.email,
                patient.phone,
                patient.date_of_birth,
            ],
        )?;
        tracing::debug!(id, rows_affected, "patient updated");
        Ok(rows_affected > 0)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("{SELECT_PATIENT} WHERE id = ?"),
                [id],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a patient by normalized CPF.
    pub fn get_patient_by_cpf(&self, cpf: &str) -> StoreResult<Option<Patient>> {
        self.conn
            .query_row(
                &format!("{SELECT_PATIENT} WHERE cpf = ?"),
                [cpf],
                patient_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patients in id order.
    pub fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let mut stmt = self.conn.prepare(&format!("{SELECT_PATIENT} ORDER BY id"))?;
        let rows = stmt.query_map([], patient_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Returns false if no row had the id.
    pub fn delete_patient(&self, id: i64) -> StoreResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        tracing::debug!(id, rows_affected, "patient deleted");
        Ok(rows_affected > 0)
    }
}

impl PatientStore for Database {
    fn add(&self, patient: &Patient) -> StoreResult<Patient> {
        self.insert_patient(patient)
    }

    fn update(&self, patient: &Patient) -> StoreResult<()> {
        if self.update_patient(patient)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(format!("{:?}", patient.id)))
        }
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        if self.delete_patient(id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id.to_string()))
        }
    }

    fn get_by_id(&self, id: i64) -> StoreResult<Patient> {
        self.get_patient(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn get_by_cpf(&self, cpf: &str) -> StoreResult<Patient> {
        self.get_patient_by_cpf(cpf)?
            .ok_or_else(|| StoreError::NotFound(cpf.to_string()))
    }

    fn get_all(&self) -> StoreResult<Vec<Patient>> {
        self.list_patients()
    }
}
