//! Shape checks for user-entered record fields.
//!
//! These are plain predicates with no store access. [`ProductionInput`]
//! composes them into a [`ValidationError`] when a record is submitted.
//!
//! [`ProductionInput`]: crate::ProductionInput
//! [`ValidationError`]: crate::ValidationError

use chrono::NaiveDate;

use crate::MoneyCents;

/// Format in which dates are typed in and displayed (`DD-MM-YYYY`).
pub const DATE_INPUT_FORMAT: &str = "%d-%m-%Y";

/// Format in which dates are stored and compared (`YYYY-MM-DD`).
pub const DATE_STORAGE_FORMAT: &str = "%Y-%m-%d";

/// Keeps only the ASCII digits of a CPF/CNPJ.
pub fn tax_id_digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Checks the shape of a CPF (11 digits) or CNPJ (14 digits).
///
/// Punctuation is ignored. A number made of a single repeated digit is
/// rejected. No check digit is verified.
pub fn is_valid_tax_id(raw: &str) -> bool {
    let digits = tax_id_digits(raw);
    if digits.len() != 11 && digits.len() != 14 {
        return false;
    }
    let first = digits.as_bytes()[0];
    !digits.bytes().all(|b| b == first)
}

/// Parses `raw` with the whole-string `chrono` format `format`.
pub fn parse_date(raw: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, format).ok()
}

/// Returns `true` iff `raw` is a real calendar date under `format`.
pub fn is_valid_date(raw: &str, format: &str) -> bool {
    parse_date(raw, format).is_some()
}

/// Returns `true` iff `raw` is a monetary value [`MoneyCents`] can parse.
pub fn is_valid_amount(raw: &str) -> bool {
    raw.parse::<MoneyCents>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_id_lengths() {
        for len in (0..20).filter(|l| *l != 11 && *l != 14) {
            let digits: String = (0..len).map(|i| char::from(b'0' + (i % 10) as u8)).collect();
            assert!(!is_valid_tax_id(&digits), "length {len} accepted");
        }
        assert!(is_valid_tax_id("12345678901"));
        assert!(is_valid_tax_id("12345678000190"));
    }

    #[test]
    fn tax_id_repeated_digits() {
        assert!(!is_valid_tax_id("11111111111"));
        assert!(!is_valid_tax_id("00000000000000"));
        assert!(!is_valid_tax_id("999.999.999-99"));
    }

    #[test]
    fn tax_id_ignores_punctuation() {
        assert!(is_valid_tax_id("123.456.789-01"));
        assert!(is_valid_tax_id("12.345.678/0001-90"));
        assert_eq!(tax_id_digits("123.456.789-01"), "12345678901");
    }

    #[test]
    fn date_requires_real_day() {
        assert!(is_valid_date("01-01-2024", DATE_INPUT_FORMAT));
        assert!(is_valid_date("29-02-2024", DATE_INPUT_FORMAT));
        assert!(!is_valid_date("31-02-2024", DATE_INPUT_FORMAT));
        assert!(!is_valid_date("29-02-2023", DATE_INPUT_FORMAT));
    }

    #[test]
    fn date_rejects_partial_or_other_formats() {
        assert!(!is_valid_date("2024-01-01", DATE_INPUT_FORMAT));
        assert!(!is_valid_date("01-01-2024 10:00", DATE_INPUT_FORMAT));
        assert!(!is_valid_date("01-2024", DATE_INPUT_FORMAT));
        assert!(!is_valid_date("", DATE_INPUT_FORMAT));
        assert!(is_valid_date("2024-01-01", DATE_STORAGE_FORMAT));
    }

    #[test]
    fn amount_shapes() {
        assert!(is_valid_amount("R$ 1.234,56"));
        assert_eq!("R$ 1.234,56".parse::<MoneyCents>().unwrap().cents(), 123_456);
        assert!(is_valid_amount("50"));
        for raw in [",50", "12,345", "1.2345,00", "R$ 10,555"] {
            assert!(is_valid_amount(raw), "{raw} rejected");
        }
        assert!(!is_valid_amount("abc"));
        assert!(!is_valid_amount(""));
    }
}
