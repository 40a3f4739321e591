//! Decimal parsing and emission (component 4: Textual I/O).
//!
//! Two entry points for parsing, matching the two policies named in
//! `SPEC_FULL.md` §3/§9: [`std::str::FromStr`] is strict (returns
//! [`BigIntError::ParseBigIntError`] on malformed input, the idiomatic Rust
//! convention), while [`BigInt::from_decimal_lossy`] keeps the source's
//! permissive "malformed input is zero" behavior for callers who want it.

use std::fmt;
use std::io::{self, BufRead, Read, Write};
use std::str::FromStr;

use crate::bigint::BigInt;
use crate::error::BigIntError;
use crate::magnitude::{Magnitude, BASE_DIGITS};

/// Splits an optional leading sign off `s`, validating that what remains is
/// one or more ASCII digits (`[+-]?[0-9]+`, per `spec.md` §4.6/§7).
fn split_sign(s: &str) -> Result<(i8, &str), BigIntError> {
    let mut chars = s.chars();
    let (sign, rest) = match chars.next() {
        Some('+') => (1i8, &s[1..]),
        Some('-') => (-1i8, &s[1..]),
        Some(_) => (1i8, s),
        None => return Err(BigIntError::ParseBigIntError),
    };
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BigIntError::ParseBigIntError);
    }
    Ok((sign, rest))
}

/// Packs a validated all-digit string into base-`B` limbs, right to left,
/// skipping leading zeros first.
fn digits_to_magnitude(digits: &str) -> Magnitude {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Magnitude::zero();
    }
    let bytes = trimmed.as_bytes();
    let mut groups = Vec::with_capacity(bytes.len().div_ceil(BASE_DIGITS));
    let mut end = bytes.len();
    while end > 0 {
        let start = end.saturating_sub(BASE_DIGITS);
        let mut value: u32 = 0;
        for &byte in &bytes[start..end] {
            value = value * 10 + (byte - b'0') as u32;
        }
        groups.push(value);
        end = start;
    }
    Magnitude::from_digit_groups(groups)
}

impl FromStr for BigInt {
    type Err = BigIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (sign, digits) = split_sign(s)?;
        let magnitude = digits_to_magnitude(digits);
        Ok(BigInt::from_parts(sign, magnitude))
    }
}

impl TryFrom<&str> for BigInt {
    type Error = BigIntError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl BigInt {
    /// Parses `s` the way the source does: malformed input (after stripping
    /// an optional sign) is silently treated as zero rather than rejected.
    pub fn from_decimal_lossy(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| BigInt::zero())
    }

    /// In-place permissive parse, matching the source's `read(const string&)`.
    pub fn read(&mut self, s: &str) {
        *self = Self::from_decimal_lossy(s);
    }

    /// Writes the value to standard output with no trailing newline,
    /// matching the source's `print()`.
    pub fn print(&self) {
        print!("{self}");
    }

    /// Reads one whitespace-delimited decimal token from `reader` and
    /// parses it in place (permissively), matching `operator>>`.
    pub fn read_from<R: BufRead>(&mut self, reader: &mut R) -> io::Result<()> {
        let mut token = String::new();
        let mut started = false;
        let mut byte = [0u8; 1];
        loop {
            let n = reader.read(&mut byte)?;
            if n == 0 {
                break;
            }
            let ch = byte[0] as char;
            if ch.is_whitespace() {
                if started {
                    break;
                }
                continue;
            }
            started = true;
            token.push(ch);
        }
        *self = Self::from_decimal_lossy(&token);
        Ok(())
    }

    /// Writes the decimal representation to `writer`, matching `operator<<`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "{self}")
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.is_negative() {
            write!(f, "-")?;
        }
        let limbs = self.magnitude().limbs();
        let (most_significant, rest) = limbs.split_last().expect("non-zero BigInt has limbs");
        write!(f, "{most_significant}")?;
        for limb in rest.iter().rev() {
            write!(f, "{limb:0width$}", width = BASE_DIGITS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parse_and_format_round_trip() {
        for s in ["0", "1", "-1", "99999", "100000", "123456789987654321", "-42"] {
            let v: BigInt = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
        }
    }

    #[test]
    fn leading_zeros_and_plus_sign_are_accepted() {
        assert_eq!("+000123".parse::<BigInt>().unwrap(), BigInt::from_i64(123));
        assert_eq!("-00000".parse::<BigInt>().unwrap(), BigInt::zero());
        assert_eq!("000".parse::<BigInt>().unwrap(), BigInt::zero());
    }

    #[test]
    fn strict_parse_rejects_malformed_input() {
        assert!("".parse::<BigInt>().is_err());
        assert!("+".parse::<BigInt>().is_err());
        assert!("12a34".parse::<BigInt>().is_err());
        assert!("1 2".parse::<BigInt>().is_err());
        assert!("--1".parse::<BigInt>().is_err());
    }

    #[test]
    fn lossy_parse_zeroes_malformed_input() {
        assert_eq!(BigInt::from_decimal_lossy("not a number"), BigInt::zero());
        assert_eq!(BigInt::from_decimal_lossy("123"), BigInt::from_i64(123));
    }

    #[test]
    fn stream_read_skips_leading_whitespace_and_stops_at_token_end() {
        let mut cursor = Cursor::new(b"   +000123 456".to_vec());
        let mut v = BigInt::zero();
        v.read_from(&mut cursor).unwrap();
        assert_eq!(v, BigInt::from_i64(123));

        let mut v2 = BigInt::zero();
        v2.read_from(&mut cursor).unwrap();
        assert_eq!(v2, BigInt::from_i64(456));
    }

    #[test]
    fn write_to_matches_display() {
        let v = BigInt::from_i64(-42);
        let mut buf = Vec::new();
        v.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "-42");
    }
}
