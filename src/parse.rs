use std::fmt;

use anyhow::{bail, ensure, Result};

/// Parses a reading like `-12.3` or `4.5` into tenths of a degree (`-123`, `45`).
///
/// A leading `-` negates, the `.` before the last digit is skipped and every
/// other byte must be an ASCII digit. Exactly one fractional digit is
/// required, so no scaling happens beyond dropping the `.`.
#[inline]
pub fn parse_tenths(field: &[u8]) -> Result<i32> {
    let (negative, digits) = match field {
        [b'-', rest @ ..] => (true, rest),
        _ => (false, field),
    };
    let point = digits.len().wrapping_sub(2);
    ensure!(
        digits.len() >= 3 && digits[point] == b'.',
        "temperature {:?} must have exactly one fractional digit",
        String::from_utf8_lossy(field)
    );

    let mut acc: i32 = 0;
    for (i, &b) in digits.iter().enumerate() {
        match b {
            b'.' if i == point => {}
            b'0'..=b'9' => {
                acc = match acc.checked_mul(10).and_then(|v| v.checked_add((b - b'0') as i32)) {
                    Some(v) => v,
                    None => bail!("temperature {:?} out of range", String::from_utf8_lossy(field)),
                };
            }
            _ => bail!(
                "unexpected byte {:?} in temperature {:?}",
                b as char,
                String::from_utf8_lossy(field)
            ),
        }
    }

    Ok(if negative { -acc } else { acc })
}

/// A fixed-point value in tenths, displayed with exactly one fractional digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tenths(pub i64);

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_readings() {
        for (input, expected) in [
            ("12.3", 123),
            ("-1.0", -10),
            ("0.0", 0),
            ("-0.3", -3),
            ("9.9", 99),
            ("-99.9", -999),
            ("5.3", 53),
        ] {
            assert_eq!(parse_tenths(input.as_bytes()).unwrap(), expected, "{input}");
        }
    }

    #[test]
    fn rejects_garbage() {
        for input in [
            "", "-", "1,0", "12.3\r", "abc", "1-2.0", "+1.0", ".5", "-.5", "1..0", "1.2.3",
        ] {
            assert!(parse_tenths(input.as_bytes()).is_err(), "{input:?} should fail");
        }
    }

    #[test]
    fn requires_exactly_one_fractional_digit() {
        for input in ["12", "-12", "1.23", "-1.23", "123", "1."] {
            let err = parse_tenths(input.as_bytes()).unwrap_err();
            assert!(err.to_string().contains("fractional digit"), "{input:?}: {err}");
        }
    }

    #[test]
    fn rejects_overflow() {
        assert!(parse_tenths(b"99999999999.9").is_err());
    }

    #[test]
    fn display_round_trips_through_parse() {
        for v in -9999..=9999 {
            let rendered = Tenths(v).to_string();
            assert_eq!(parse_tenths(rendered.as_bytes()).unwrap() as i64, v, "{rendered}");
        }
    }

    #[test]
    fn display_small_negatives() {
        assert_eq!(Tenths(-5).to_string(), "-0.5");
        assert_eq!(Tenths(0).to_string(), "0.0");
        assert_eq!(Tenths(-34).to_string(), "-3.4");
        assert_eq!(Tenths(140).to_string(), "14.0");
    }
}
