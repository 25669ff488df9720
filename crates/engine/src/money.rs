use std::{fmt, str::FromStr};

use crate::ValidationError;

const CURRENCY_PREFIX: &str = "R$";

/// Signed money amount represented as **integer cents**.
///
/// Every amount that is validated, stored or summed goes through this type to
/// avoid floating-point drift. The stored form of an amount is its `Display`
/// output (`1234.56`): no currency prefix, no thousands separators, dot as the
/// decimal separator.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing follows the Brazilian convention (`R$` prefix, `.` for thousands,
/// `,` for decimals) and still accepts already-normalized text:
///
/// ```rust
/// use engine::MoneyCents;
///
/// assert_eq!("R$ 1.234,56".parse::<MoneyCents>().unwrap().cents(), 123_456);
/// assert_eq!("100.00".parse::<MoneyCents>().unwrap().cents(), 10_000);
/// assert_eq!(",50".parse::<MoneyCents>().unwrap().cents(), 50);
/// assert!("12,3a".parse::<MoneyCents>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: MoneyCents) -> Option<MoneyCents> {
        self.0.checked_add(rhs.0).map(MoneyCents)
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

fn split_sign(s: &str) -> (bool, &str) {
    if let Some(stripped) = s.strip_prefix('-') {
        (true, stripped.trim_start())
    } else if let Some(stripped) = s.strip_prefix('+') {
        (false, stripped.trim_start())
    } else {
        (false, s)
    }
}

fn strip_currency(s: &str) -> &str {
    match s.get(..CURRENCY_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(CURRENCY_PREFIX) => {
            s[CURRENCY_PREFIX.len()..].trim_start()
        }
        _ => s,
    }
}

/// Joins an integer part written with `.` thousands separators.
///
/// Groups may hold any number of digits but none may be empty. An empty
/// integer part (as in `,50`) joins to an empty string.
fn ungroup_integer(int_part: &str) -> Option<String> {
    if int_part.is_empty() {
        return Some(String::new());
    }
    let mut digits = String::with_capacity(int_part.len());
    for group in int_part.split('.') {
        if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.push_str(group);
    }
    Some(digits)
}

/// A lone `.` followed by exactly three digits, after a 1 to 3 digit
/// integer part not starting with `0`, reads as a thousands separator.
fn looks_grouped(int_part: &str, frac: &str) -> bool {
    frac.len() == 3 && (1..=3).contains(&int_part.len()) && !int_part.starts_with('0')
}

/// Cents held by a fractional part, rounded half to even past the second
/// digit. May return 100 when rounding carries into the units.
fn fraction_cents(frac: &str) -> i64 {
    let digit = |i: usize| frac.as_bytes().get(i).map_or(0, |b| i64::from(b - b'0'));
    let cents = digit(0) * 10 + digit(1);
    let rest = frac.get(2..).unwrap_or("");
    let round_up = match rest.as_bytes().first() {
        Some(b'6'..=b'9') => true,
        Some(b'5') => rest[1..].bytes().any(|b| b != b'0') || cents % 2 == 1,
        _ => false,
    };
    if round_up { cents + 1 } else { cents }
}

impl FromStr for MoneyCents {
    type Err = ValidationError;

    /// Parses a monetary string into cents.
    ///
    /// Accepts an optional `R$` prefix and an optional leading `+`/`-`.
    /// A `,` is always the decimal separator and every `.` before it separates
    /// thousands. Without a `,`, a single `.` is decimal unless it reads as a
    /// thousands separator (`1.234`), and several `.` all separate thousands.
    ///
    /// Either side of the decimal separator may be empty, not both. Digits
    /// past the second fractional one are rounded half to even. Exponents,
    /// `NaN` and `inf` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAmount(s.trim().to_string());

        let (negative, rest) = split_sign(s.trim());
        let rest = strip_currency(rest);
        let (negative, rest) = if negative {
            (true, rest)
        } else {
            split_sign(rest)
        };
        let rest = rest.trim();

        let (int_part, frac_part) = if let Some((int, frac)) = rest.split_once(',') {
            if frac.contains([',', '.']) {
                return Err(invalid());
            }
            (int, frac)
        } else {
            match rest.split_once('.') {
                Some((int, frac)) if !frac.contains('.') && !looks_grouped(int, frac) => {
                    (int, frac)
                }
                _ => (rest, ""),
            }
        };

        let int_digits = ungroup_integer(int_part).ok_or_else(invalid)?;
        if int_digits.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = if int_digits.is_empty() {
            0
        } else {
            int_digits.parse().map_err(|_| invalid())?
        };
        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(fraction_cents(frac_part)))
            .ok_or_else(invalid)?;

        Ok(MoneyCents(if negative { -total } else { total }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(raw: &str) -> i64 {
        raw.parse::<MoneyCents>().unwrap().cents()
    }

    #[test]
    fn display_uses_two_decimals() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
        assert_eq!(MoneyCents::new(123_456).to_string(), "1234.56");
    }

    #[test]
    fn parse_brazilian_format() {
        assert_eq!(cents("R$ 1.234,56"), 123_456);
        assert_eq!(cents("r$1.234,5"), 123_450);
        assert_eq!(cents("1.000.000,00"), 100_000_000);
        assert_eq!(cents("10,"), 1000);
        assert_eq!(cents("  R$ 7 "), 700);
    }

    #[test]
    fn parse_normalized_text() {
        assert_eq!(cents("100.00"), 10_000);
        assert_eq!(cents("1234.56"), 123_456);
        assert_eq!(cents("2.5"), 250);
        assert_eq!(cents("1.234"), 123_400);
        assert_eq!(cents("0.001"), 0);
        assert_eq!(cents("1.23.4"), 123_400);
    }

    #[test]
    fn parse_empty_integer_part_is_zero() {
        assert_eq!(cents(",50"), 50);
        assert_eq!(cents(".50"), 50);
        assert_eq!(cents("R$ ,5"), 50);
        assert_eq!(cents("-,01"), -1);
    }

    #[test]
    fn parse_loose_thousands_groups() {
        assert_eq!(cents("1.2345,00"), 1_234_500);
        assert_eq!(cents("12.34.567,8"), 123_456_780);
    }

    #[test]
    fn extra_decimals_round_half_even() {
        assert_eq!(cents("12,345"), 1234);
        assert_eq!(cents("R$ 10,555"), 1056);
        assert_eq!(cents("12,3451"), 1235);
        assert_eq!(cents("12,349"), 1235);
        assert_eq!(cents("0,995"), 100);
        assert_eq!(cents("0,005"), 0);
        assert_eq!(cents("1234.567"), 123_457);
    }

    #[test]
    fn parse_signs() {
        assert_eq!(cents("-0,01"), -1);
        assert_eq!(cents("-R$ 5,00"), -500);
        assert_eq!(cents("R$ -5,00"), -500);
        assert_eq!(cents("+1"), 100);
    }

    #[test]
    fn parse_rejects_garbage() {
        for raw in [
            "", "abc", "R$", ",", ".", "1,2,3", "1..2,00", "1,234.56", ".5,00", "--5", "1e5",
            "NaN", "inf",
        ] {
            assert!(raw.parse::<MoneyCents>().is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn parse_rejects_overflow() {
        assert!("999999999999999999999".parse::<MoneyCents>().is_err());
        assert!("92233720368547758,08".parse::<MoneyCents>().is_err());
    }

    #[test]
    fn stored_text_reparses_to_same_value() {
        let amount = MoneyCents::new(-98_765);
        assert_eq!(amount.to_string().parse::<MoneyCents>().unwrap(), amount);
    }
}
