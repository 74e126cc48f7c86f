//! SQLite schema definition.

/// Complete database schema for the patient registry.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Patients
-- ============================================================================

-- AUTOINCREMENT: ids of deleted patients are never handed out again.
-- length_* checks are reported as "value too long" by the error classifier.
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL CONSTRAINT length_first_name CHECK (length(first_name) <= 50),
    last_name TEXT NOT NULL CONSTRAINT length_last_name CHECK (length(last_name) <= 50),
    cpf TEXT NOT NULL CONSTRAINT length_cpf CHECK (length(cpf) <= 11),
    email TEXT CONSTRAINT length_email CHECK (length(email) <= 50),
    phone TEXT CONSTRAINT length_phone CHECK (length(phone) <= 20),
    date_of_birth TEXT,                          -- YYYY-MM-DD
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE UNIQUE INDEX IF NOT EXISTS ix_patients_cpf ON patients(cpf);
CREATE INDEX IF NOT EXISTS idx_patients_name ON patients(first_name, last_name);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert!(conn.execute_batch(SCHEMA).is_ok());
    }

    #[test]
    fn test_cpf_unique() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let insert = "INSERT INTO patients (first_name, last_name, cpf) VALUES (?, ?, ?)";
        conn.execute(insert, ["Fulano", "de Tal", "69819324076"]).unwrap();

        let result = conn.execute(insert, ["Beltrano", "da Silva", "69819324076"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_length_checks() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let long_name = "a".repeat(51);
        let result = conn.execute(
            "INSERT INTO patients (first_name, last_name, cpf) VALUES (?, ?, ?)",
            [long_name.as_str(), "de Tal", "69819324076"],
        );
        assert!(result.is_err());

        // NULL optional columns pass their checks
        let result = conn.execute(
            "INSERT INTO patients (first_name, last_name, cpf, email, phone) VALUES (?, ?, ?, NULL, NULL)",
            ["Fulano", "de Tal", "69819324076"],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_ids_not_reused() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let insert = "INSERT INTO patients (first_name, last_name, cpf) VALUES (?, ?, ?)";
        conn.execute(insert, ["Fulano", "de Tal", "69819324076"]).unwrap();
        let first = conn.last_insert_rowid();
        conn.execute("DELETE FROM patients WHERE id = ?", [first]).unwrap();

        conn.execute(insert, ["Fulano", "de Tal", "69819324076"]).unwrap();
        assert!(conn.last_insert_rowid() > first);
    }
}
