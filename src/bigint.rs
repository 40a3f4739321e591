//! Signed wrapper: attaches a sign to a [`Magnitude`] and routes the four
//! basic operations (plus floor-rounded division/modulus) to the kernel in
//! [`crate::magnitude`] with the sign accounting from `SPEC_FULL.md` §4.5.

use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use crate::error::BigIntError;
use crate::magnitude::Magnitude;

/// A signed arbitrary-precision integer.
///
/// Canonical form: `sign` is one of `{-1, 0, 1}`, `sign == 0` iff the
/// magnitude is empty (zero has a single representation), and the
/// magnitude itself is always canonical (no trailing zero limbs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    sign: i8,
    magnitude: Magnitude,
}

impl BigInt {
    /// The additive identity.
    pub fn zero() -> Self {
        BigInt { sign: 0, magnitude: Magnitude::zero() }
    }

    pub fn from_i64(v: i64) -> Self {
        if v == 0 {
            return BigInt::zero();
        }
        let sign = if v < 0 { -1 } else { 1 };
        BigInt { sign, magnitude: Magnitude::from_u64(v.unsigned_abs()) }
    }

    pub fn is_zero(&self) -> bool {
        self.sign == 0
    }

    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }

    pub fn is_positive(&self) -> bool {
        self.sign > 0
    }

    /// -1, 0, or 1.
    pub fn signum(&self) -> i32 {
        self.sign as i32
    }

    /// Unary plus: a copy of `self`. Rust has no `+x` operator, so this is
    /// the explicit spelling of the source's `operator+()`.
    pub fn identity(&self) -> BigInt {
        self.clone()
    }

    pub(crate) fn magnitude(&self) -> &Magnitude {
        &self.magnitude
    }

    pub(crate) fn sign(&self) -> i8 {
        self.sign
    }

    /// Builds a `BigInt` from an already-canonical sign/magnitude pair,
    /// normalizing `sign` to 0 if the magnitude happens to be zero (this
    /// should not occur on well-formed inputs but keeps the invariant
    /// load-bearing rather than merely documented).
    pub(crate) fn from_parts(sign: i8, magnitude: Magnitude) -> Self {
        if magnitude.is_zero() {
            BigInt::zero()
        } else {
            BigInt { sign, magnitude }
        }
    }

    fn add_impl(&self, other: &BigInt) -> BigInt {
        if other.sign == 0 {
            return self.clone();
        }
        if self.sign == 0 {
            return other.clone();
        }
        if self.sign == other.sign {
            BigInt::from_parts(self.sign, self.magnitude.add(&other.magnitude))
        } else {
            match self.magnitude.cmp(&other.magnitude) {
                Ordering::Equal => BigInt::zero(),
                Ordering::Greater => {
                    BigInt::from_parts(self.sign, self.magnitude.sub(&other.magnitude))
                }
                Ordering::Less => {
                    BigInt::from_parts(other.sign, other.magnitude.sub(&self.magnitude))
                }
            }
        }
    }

    fn neg_impl(&self) -> BigInt {
        BigInt { sign: -self.sign, magnitude: self.magnitude.clone() }
    }

    fn sub_impl(&self, other: &BigInt) -> BigInt {
        self.add_impl(&other.neg_impl())
    }

    fn mul_impl(&self, other: &BigInt) -> BigInt {
        if self.sign == 0 || other.sign == 0 {
            return BigInt::zero();
        }
        BigInt::from_parts(self.sign * other.sign, self.magnitude.mul(&other.magnitude))
    }

    /// Floor-rounded quotient and remainder per `SPEC_FULL.md` §4.5. The
    /// remainder's sign is always `0` or `other`'s sign, never `self`'s.
    pub fn div_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt), BigIntError> {
        if other.sign == 0 {
            return Err(BigIntError::DivisionByZero);
        }
        if self.sign == 0 {
            return Ok((BigInt::zero(), BigInt::zero()));
        }

        let (qabs, rabs) = self.magnitude.divmod(&other.magnitude);
        if self.sign == other.sign {
            let q = BigInt::from_parts(1, qabs);
            let r = BigInt::from_parts(other.sign, rabs);
            Ok((q, r))
        } else if rabs.is_zero() {
            Ok((BigInt::from_parts(-1, qabs), BigInt::zero()))
        } else {
            let q_mag = qabs.add(&Magnitude::from_u64(1));
            let r_mag = other.magnitude.sub(&rabs);
            Ok((BigInt::from_parts(-1, q_mag), BigInt::from_parts(other.sign, r_mag)))
        }
    }

    pub fn checked_div(&self, other: &BigInt) -> Result<BigInt, BigIntError> {
        self.div_rem(other).map(|(q, _)| q)
    }

    pub fn checked_rem(&self, other: &BigInt) -> Result<BigInt, BigIntError> {
        self.div_rem(other).map(|(_, r)| r)
    }
}

impl From<i64> for BigInt {
    fn from(v: i64) -> Self {
        BigInt::from_i64(v)
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    /// Zero compares greater than any negative and less than any positive;
    /// among equal signs, magnitude order is reversed for negative values.
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {
                if self.sign < 0 {
                    other.magnitude.cmp(&self.magnitude)
                } else {
                    self.magnitude.cmp(&other.magnitude)
                }
            }
            order => order,
        }
    }
}

// ============================================================================
// Operator plumbing: one &T op &T impl per trait, forwarded to the by-value
// and mixed-reference combinations so call sites can pass either.
// ============================================================================

macro_rules! forward_all_binop {
    (impl $imp:ident, $method:ident for $t:ty) => {
        impl $imp<$t> for $t {
            type Output = $t;
            #[inline]
            fn $method(self, other: $t) -> $t {
                $imp::$method(&self, &other)
            }
        }
        impl $imp<&$t> for $t {
            type Output = $t;
            #[inline]
            fn $method(self, other: &$t) -> $t {
                $imp::$method(&self, other)
            }
        }
        impl $imp<$t> for &$t {
            type Output = $t;
            #[inline]
            fn $method(self, other: $t) -> $t {
                $imp::$method(self, &other)
            }
        }
    };
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;
    fn add(self, other: &BigInt) -> BigInt {
        self.add_impl(other)
    }
}
forward_all_binop!(impl Add, add for BigInt);

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;
    fn sub(self, other: &BigInt) -> BigInt {
        self.sub_impl(other)
    }
}
forward_all_binop!(impl Sub, sub for BigInt);

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;
    fn mul(self, other: &BigInt) -> BigInt {
        self.mul_impl(other)
    }
}
forward_all_binop!(impl Mul, mul for BigInt);

impl Div<&BigInt> for &BigInt {
    type Output = BigInt;
    /// Panics on division by zero; use [`BigInt::checked_div`] to avoid that.
    fn div(self, other: &BigInt) -> BigInt {
        self.div_rem(other).unwrap_or_else(|e| panic!("{e}")).0
    }
}
forward_all_binop!(impl Div, div for BigInt);

impl Rem<&BigInt> for &BigInt {
    type Output = BigInt;
    /// Panics on division by zero; use [`BigInt::checked_rem`] to avoid that.
    fn rem(self, other: &BigInt) -> BigInt {
        self.div_rem(other).unwrap_or_else(|e| panic!("{e}")).1
    }
}
forward_all_binop!(impl Rem, rem for BigInt);

impl Neg for BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.neg_impl()
    }
}

impl Neg for &BigInt {
    type Output = BigInt;
    fn neg(self) -> BigInt {
        self.neg_impl()
    }
}

macro_rules! forward_assign_op {
    (impl $imp:ident, $method:ident for $t:ty, via $binop:ident) => {
        impl $imp<&$t> for $t {
            fn $method(&mut self, other: &$t) {
                *self = $binop::$binop(&*self, other);
            }
        }
        impl $imp<$t> for $t {
            fn $method(&mut self, other: $t) {
                *self = $binop::$binop(&*self, &other);
            }
        }
    };
}

forward_assign_op!(impl AddAssign, add_assign for BigInt, via Add);
forward_assign_op!(impl SubAssign, sub_assign for BigInt, via Sub);
forward_assign_op!(impl MulAssign, mul_assign for BigInt, via Mul);
forward_assign_op!(impl DivAssign, div_assign for BigInt, via Div);
forward_assign_op!(impl RemAssign, rem_assign for BigInt, via Rem);

/// Free-function form of `+`, matching the source's `friend int2048 add(...)`.
pub fn add(lhs: BigInt, rhs: &BigInt) -> BigInt {
    lhs.add_impl(rhs)
}

/// Free-function form of binary `-`, matching the source's `friend int2048 minus(...)`.
pub fn minus(lhs: BigInt, rhs: &BigInt) -> BigInt {
    lhs.sub_impl(rhs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(v: i64) -> BigInt {
        BigInt::from_i64(v)
    }

    #[test]
    fn zero_has_unique_representation() {
        assert_eq!(b(0), BigInt::zero());
        assert_eq!(b(5) - b(5), BigInt::zero());
        assert!(BigInt::zero().magnitude().is_zero());
        assert_eq!(BigInt::zero().signum(), 0);
    }

    #[test]
    fn addition_and_subtraction_match_i64() {
        for a in [-100i64, -1, 0, 1, 100, i64::MAX, i64::MIN] {
            for c in [-100i64, -1, 0, 1, 100] {
                let expected = a.checked_add(c);
                if let Some(expected) = expected {
                    assert_eq!(b(a) + b(c), b(expected));
                }
            }
        }
    }

    #[test]
    fn negation_is_involutive() {
        for v in [-123i64, 0, 123, i64::MIN, i64::MAX] {
            let x = b(v);
            assert_eq!(-(-x.clone()), x);
        }
        assert_eq!(-BigInt::zero(), BigInt::zero());
    }

    #[test]
    fn floor_division_examples_from_spec() {
        let (q, r) = b(-7).div_rem(&b(2)).unwrap();
        assert_eq!(q, b(-4));
        assert_eq!(r, b(1));

        let (q, r) = b(7).div_rem(&b(-2)).unwrap();
        assert_eq!(q, b(-4));
        assert_eq!(r, b(-1));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(b(1).div_rem(&b(0)), Err(BigIntError::DivisionByZero));
        assert_eq!(b(1).checked_div(&b(0)), Err(BigIntError::DivisionByZero));
    }

    #[test]
    #[should_panic(expected = "attempt to divide BigInt by zero")]
    fn div_operator_panics_on_zero_divisor() {
        let _ = b(1) / b(0);
    }

    #[test]
    fn total_order_places_zero_between_signs() {
        assert!(b(-1) < BigInt::zero());
        assert!(BigInt::zero() < b(1));
        assert!(b(-100) < b(-1));
        assert!(b(1) < b(100));
    }

    #[test]
    fn compound_operators_mutate_left_operand_only() {
        let mut x = b(10);
        let y = b(3);
        x += &y;
        assert_eq!(x, b(13));
        assert_eq!(y, b(3));
    }
}
