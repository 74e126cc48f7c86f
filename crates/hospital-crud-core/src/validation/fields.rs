//! Validators for contact and demographic fields.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use super::{ValidationError, ValidationReason, ValidationResult};
use crate::models::PatientField;

/// Maximum length of first name, last name and email.
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_EMAIL_LENGTH: usize = 50;
pub const MAX_PHONE_LENGTH: usize = 20;

// Exactly one '@', neither first nor last; no whitespace or line breaks.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("valid email regex"));

// Accepts e.g. 988020412, 48988020412, 48 988020412, (48)98802-0412, +55 (48) 98802-0412
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+55\s?)?(\(?[0-9]{2}\)?\s?)?([0-9]{4,5}-?[0-9]{4})$")
        .expect("valid phone regex")
});

/// The zero/minimum date sentinel, never a real date of birth.
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Email must be absent, blank or address-shaped.
pub fn is_valid_email(email: Option<&str>) -> bool {
    match email.map(str::trim) {
        None | Some("") => true,
        Some(email) => EMAIL_PATTERN.is_match(email),
    }
}

/// Phone must be absent, blank or a Brazilian phone number.
pub fn is_valid_phone(phone: Option<&str>) -> bool {
    match phone.map(str::trim) {
        None | Some("") => true,
        Some(phone) => PHONE_PATTERN.is_match(phone),
    }
}

/// Date of birth must be absent, or a real date strictly before `today`.
pub fn is_valid_date_of_birth_on(date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match date {
        None => true,
        Some(date) => date != zero_date() && date < today,
    }
}

/// [`is_valid_date_of_birth_on`] against the local calendar date.
pub fn is_valid_date_of_birth(date: Option<NaiveDate>) -> bool {
    is_valid_date_of_birth_on(date, chrono::Local::now().date_naive())
}

/// A mandatory text field: non-blank and at most `max` characters.
pub fn validate_required_text(field: PatientField, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, ValidationReason::Required));
    }
    validate_length(field, value, max)
}

/// Reject values longer than `max` characters.
pub fn validate_length(field: PatientField, value: &str, max: usize) -> ValidationResult<()> {
    if value.chars().count() > max {
        return Err(ValidationError::new(field, ValidationReason::TooLong { max }));
    }
    Ok(())
}

/// Validate and normalize an optional email; blank becomes `None`.
pub fn normalize_email(email: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(email) = email.map(str::trim).filter(|e| !e.is_empty()) else {
        return Ok(None);
    };
    validate_length(PatientField::Email, email, MAX_EMAIL_LENGTH)?;
    if !is_valid_email(Some(email)) {
        return Err(ValidationError::new(
            PatientField::Email,
            ValidationReason::InvalidEmail,
        ));
    }
    Ok(Some(email.to_string()))
}

/// Validate and normalize an optional phone; blank becomes `None`.
pub fn normalize_phone(phone: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    validate_length(PatientField::Phone, phone, MAX_PHONE_LENGTH)?;
    if !is_valid_phone(Some(phone)) {
        return Err(ValidationError::new(
            PatientField::Phone,
            ValidationReason::InvalidPhone,
        ));
    }
    Ok(Some(phone.to_string()))
}

/// Validate an optional date of birth against today's date.
pub fn validate_date_of_birth(date: Option<NaiveDate>) -> ValidationResult<()> {
    if is_valid_date_of_birth(date) {
        Ok(())
    } else {
        Err(ValidationError::new(
            PatientField::DateOfBirth,
            ValidationReason::InvalidDateOfBirth,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_email() {
        assert!(is_valid_email(None));
        assert!(is_valid_email(Some("")));
        assert!(is_valid_email(Some("  ")));
        assert!(is_valid_email(Some("email@test.com")));
        assert!(is_valid_email(Some("first.last+tag@clinic.com.br")));
        assert!(!is_valid_email(Some("email")));
        assert!(!is_valid_email(Some("email@")));
        assert!(!is_valid_email(Some("@test.com")));
        assert!(is_valid_email(Some("email@test")));
        assert!(is_valid_email(Some("user@localhost")));
        assert!(is_valid_email(Some("josé@clínica.com.br")));
        assert!(is_valid_email(Some("a@b.c")));
        assert!(!is_valid_email(Some("a@b@c")));
        assert!(!is_valid_email(Some("email@test.com\r\nBcc: x@y.z")));
    }

    #[test]
    fn test_phone() {
        for phone in [
            "988020412",
            "48988020412",
            "48 988020412",
            "(48)98802-0412",
            "+55 (48) 98802-0412",
            "(77)7777-7777",
            "  7777-7777  ",
        ] {
            assert!(is_valid_phone(Some(phone)), "{phone} should be valid");
        }

        assert!(is_valid_phone(None));
        assert!(is_valid_phone(Some("")));
        assert!(!is_valid_phone(Some("123")));
        assert!(!is_valid_phone(Some("phone")));
        assert!(!is_valid_phone(Some("+1 (48) 98802-0412")));
        // No separator allowed inside the subscriber number other than '-'
        assert!(!is_valid_phone(Some("48 98802 0412")));
    }

    #[test]
    fn test_date_of_birth() {
        let today = date(2024, 6, 15);
        assert!(is_valid_date_of_birth_on(None, today));
        assert!(is_valid_date_of_birth_on(Some(date(1988, 9, 10)), today));
        assert!(is_valid_date_of_birth_on(Some(date(2024, 6, 14)), today));
        assert!(!is_valid_date_of_birth_on(Some(today), today));
        assert!(!is_valid_date_of_birth_on(Some(date(2999, 1, 1)), today));
        assert!(!is_valid_date_of_birth_on(Some(zero_date()), today));
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text(PatientField::FirstName, "Fulano", 50).is_ok());
        assert_eq!(
            validate_required_text(PatientField::FirstName, "   ", 50),
            Err(ValidationError::new(PatientField::FirstName, ValidationReason::Required))
        );
        let long = "a".repeat(51);
        assert_eq!(
            validate_required_text(PatientField::LastName, &long, 50),
            Err(ValidationError::new(
                PatientField::LastName,
                ValidationReason::TooLong { max: 50 }
            ))
        );
        // Length counts characters, not bytes
        let accented = "é".repeat(50);
        assert!(validate_required_text(PatientField::LastName, &accented, 50).is_ok());
    }

    #[test]
    fn test_normalize_optional_contacts() {
        assert_eq!(normalize_email(Some("  ")), Ok(None));
        assert_eq!(
            normalize_email(Some(" email@test.com ")),
            Ok(Some("email@test.com".to_string()))
        );
        assert_eq!(
            normalize_email(Some("not-an-email")).unwrap_err().reason,
            ValidationReason::InvalidEmail
        );
        assert_eq!(
            normalize_phone(Some("(77)7777-7777")),
            Ok(Some("(77)7777-7777".to_string()))
        );
        assert_eq!(
            normalize_phone(Some("+55 (48) 98802-04120000")).unwrap_err().reason,
            ValidationReason::TooLong { max: 20 }
        );
    }
}
