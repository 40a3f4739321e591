//! Error types for fallible `BigInt` operations.
//!
//! The panicking operators (`Div`, `Rem`, ...) never return these; they exist
//! for the `checked_*` entry points and for `FromStr`/`TryFrom<&str>`.

use std::fmt;

/// Failure modes for `BigInt` operations that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BigIntError {
    /// A `/` or `%` was attempted with a zero divisor.
    DivisionByZero,
    /// A decimal string did not match `[+-]?[0-9]+` after whitespace/sign
    /// stripping.
    ParseBigIntError,
}

impl fmt::Display for BigIntError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BigIntError::DivisionByZero => write!(f, "attempt to divide BigInt by zero"),
            BigIntError::ParseBigIntError => write!(f, "invalid digit found in string"),
        }
    }
}

impl std::error::Error for BigIntError {}
