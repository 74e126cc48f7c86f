//! CPF (Cadastro de Pessoas Físicas) identifier validation.
//!
//! A CPF has nine base digits followed by two check digits. Each check digit
//! is a weighted sum modulo 11 over the digits preceding it.

/// Number of digits in a normalized CPF.
pub const CPF_LENGTH: usize = 11;

const FIRST_DIGIT_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_DIGIT_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Why a CPF candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpfError {
    InvalidLength,
    InvalidFormat,
}

/// Trim whitespace and strip `.` and `-` punctuation.
///
/// `"698.193.240-76"` becomes `"69819324076"`. No other characters are
/// removed, so malformed input stays malformed.
pub fn normalize_cpf(raw: &str) -> String {
    raw.trim().chars().filter(|c| *c != '.' && *c != '-').collect()
}

/// Validate a CPF candidate.
///
/// `None` and blank strings are accepted: presence is enforced separately by
/// the entity rules.
pub fn validate_cpf(candidate: Option<&str>) -> Result<(), CpfError> {
    let Some(raw) = candidate else {
        return Ok(());
    };
    if raw.trim().is_empty() {
        return Ok(());
    }

    let cpf = normalize_cpf(raw);

    if cpf.chars().count() != CPF_LENGTH {
        return Err(CpfError::InvalidLength);
    }

    let digits: Vec<u32> = cpf
        .chars()
        .map(|c| if c.is_ascii_digit() { c.to_digit(10) } else { None })
        .collect::<Option<_>>()
        .ok_or(CpfError::InvalidFormat)?;

    let first = check_digit(&digits[..9], &FIRST_DIGIT_WEIGHTS);

    let mut prefix = digits[..9].to_vec();
    prefix.push(first);
    let second = check_digit(&prefix, &SECOND_DIGIT_WEIGHTS);

    if digits[9] == first && digits[10] == second {
        Ok(())
    } else {
        Err(CpfError::InvalidFormat)
    }
}

/// Compute the two check digits for a 9-digit base.
///
/// Returns `None` unless `base` is exactly nine ASCII digits.
pub fn cpf_check_digits(base: &str) -> Option<(u32, u32)> {
    if base.len() != 9 || !base.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut digits: Vec<u32> = base.chars().filter_map(|c| c.to_digit(10)).collect();
    let first = check_digit(&digits, &FIRST_DIGIT_WEIGHTS);
    digits.push(first);
    let second = check_digit(&digits, &SECOND_DIGIT_WEIGHTS);
    Some((first, second))
}

fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_cpf() {
        assert_eq!(validate_cpf(Some("69819324076")), Ok(()));
        assert_eq!(validate_cpf(Some("698.193.240-76")), Ok(()));
        assert_eq!(validate_cpf(Some("  529.982.247-25 ")), Ok(()));
    }

    #[test]
    fn test_absent_and_blank_are_valid() {
        assert_eq!(validate_cpf(None), Ok(()));
        assert_eq!(validate_cpf(Some("")), Ok(()));
        assert_eq!(validate_cpf(Some("   ")), Ok(()));
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(validate_cpf(Some("6981932407")), Err(CpfError::InvalidLength));
        assert_eq!(validate_cpf(Some("698193240761")), Err(CpfError::InvalidLength));
        // Spaces are not stripped from the middle
        assert_eq!(
            validate_cpf(Some("698 193 240 76")),
            Err(CpfError::InvalidLength)
        );
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(validate_cpf(Some("6981932407a")), Err(CpfError::InvalidFormat));
        assert_eq!(validate_cpf(Some("69819324077")), Err(CpfError::InvalidFormat));
        assert_eq!(validate_cpf(Some("69819324066")), Err(CpfError::InvalidFormat));
    }

    #[test]
    fn test_non_ascii_digits_rejected() {
        // Arabic-Indic digits are numeric but not ASCII
        assert_eq!(
            validate_cpf(Some("٦٩٨١٩٣٢٤٠٧٦")),
            Err(CpfError::InvalidFormat)
        );
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(cpf_check_digits("698193240"), Some((7, 6)));
        assert_eq!(cpf_check_digits("529982247"), Some((2, 5)));
        assert_eq!(cpf_check_digits("12345678"), None);
        assert_eq!(cpf_check_digits("12345678x"), None);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_cpf(" 698.193.240-76 "), "69819324076");
        assert_eq!(normalize_cpf("69819324076"), "69819324076");
    }
}
