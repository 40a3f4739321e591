//! Unsigned multi-precision magnitude: representation and kernel.
//!
//! This is the CORE the rest of the crate is built on: [`Magnitude`] stores a
//! non-negative integer as little-endian limbs in base [`BASE`], and the
//! free-standing arithmetic below (add, sub, the schoolbook/FFT multiply
//! dispatch, and Knuth Algorithm D division) never has to reason about sign.
//! [`crate::bigint::BigInt`] attaches a sign and routes to these.

use std::cmp::Ordering;

use crate::fft;

/// Internal base: five decimal digits per limb. `BASE * (BASE - 1)` fits in
/// an `i64` accumulator with a comfortable margin, which is what lets
/// [`mul_schoolbook`] and the division trial-digit arithmetic use plain `i64`
/// intermediates instead of widening further.
pub(crate) const BASE: i64 = 100_000;
/// Decimal digits packed into one limb; must satisfy `10^BASE_DIGITS == BASE`.
pub(crate) const BASE_DIGITS: usize = 5;

/// Above this many padded FFT points, per-point rounding error in the
/// `f64` convolution is no longer provably below the half-digit threshold
/// (see the design note in `SPEC_FULL.md` §9); multiplication falls back to
/// schoolbook rather than risk a silently wrong limb.
const FFT_MAX_LIMBS: usize = 1 << 22;

/// Below this combined size, schoolbook's small constant factor beats FFT's
/// `O(n log n)` outright.
const SCHOOLBOOK_SINGLE_MAX: usize = 64;
const SCHOOLBOOK_COMBINED_MAX: usize = 256;

/// A canonical non-negative multi-precision integer.
///
/// Canonical form: no trailing zero limbs, every limb in `[0, BASE)`, and
/// zero is represented by an empty limb vector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub(crate) struct Magnitude {
    /// Little-endian limbs, each in `[0, BASE)`. Empty means zero.
    limbs: Vec<u32>,
}

impl Magnitude {
    pub(crate) fn zero() -> Self {
        Magnitude { limbs: Vec::new() }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    pub(crate) fn limbs(&self) -> &[u32] {
        &self.limbs
    }

    pub(crate) fn len(&self) -> usize {
        self.limbs.len()
    }

    /// Build from raw little-endian limbs, trimming trailing zeros to
    /// restore canonical form. Every public constructor funnels through
    /// this so canonicality never has to be maintained by hand at call sites.
    pub(crate) fn from_limbs(mut limbs: Vec<u32>) -> Self {
        while let Some(&0) = limbs.last() {
            limbs.pop();
        }
        debug_assert!(limbs.iter().all(|&l| (l as i64) < BASE));
        Magnitude { limbs }
    }

    pub(crate) fn from_u64(mut v: u64) -> Self {
        let mut limbs = Vec::new();
        while v > 0 {
            limbs.push((v % BASE as u64) as u32);
            v /= BASE as u64;
        }
        Magnitude { limbs }
    }

    /// Build from pre-grouped little-endian decimal digit groups (limb 0 is
    /// the least-significant `BASE_DIGITS`-digit group). Used by the decimal
    /// parser in [`crate::bigint`].
    pub(crate) fn from_digit_groups(groups: Vec<u32>) -> Self {
        Self::from_limbs(groups)
    }
}

impl PartialOrd for Magnitude {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Magnitude {
    /// Longer magnitude wins; otherwise compare limb-by-limb from the most
    /// significant limb downward.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.limbs.len() != other.limbs.len() {
            return self.limbs.len().cmp(&other.limbs.len());
        }
        for (a, b) in self.limbs.iter().rev().zip(other.limbs.iter().rev()) {
            if a != b {
                return a.cmp(b);
            }
        }
        Ordering::Equal
    }
}

// ============================================================================
// Addition and subtraction
// ============================================================================

impl Magnitude {
    /// `self + other`.
    pub(crate) fn add(&self, other: &Magnitude) -> Magnitude {
        let n = self.limbs.len().max(other.limbs.len());
        let mut res = Vec::with_capacity(n + 1);
        let mut carry: i64 = 0;
        for i in 0..n {
            let mut cur = carry;
            if let Some(&l) = self.limbs.get(i) {
                cur += l as i64;
            }
            if let Some(&l) = other.limbs.get(i) {
                cur += l as i64;
            }
            if cur >= BASE {
                cur -= BASE;
                carry = 1;
            } else {
                carry = 0;
            }
            res.push(cur as u32);
        }
        if carry != 0 {
            res.push(carry as u32);
        }
        Magnitude::from_limbs(res)
    }

    /// `self - other`. Requires `self >= other` as magnitudes.
    pub(crate) fn sub(&self, other: &Magnitude) -> Magnitude {
        debug_assert!(self >= other, "Magnitude::sub requires self >= other");
        let mut res = Vec::with_capacity(self.limbs.len());
        let mut borrow: i64 = 0;
        for (i, &l) in self.limbs.iter().enumerate() {
            let mut cur = l as i64 - borrow - other.limbs.get(i).copied().unwrap_or(0) as i64;
            if cur < 0 {
                cur += BASE;
                borrow = 1;
            } else {
                borrow = 0;
            }
            res.push(cur as u32);
        }
        Magnitude::from_limbs(res)
    }
}

// ============================================================================
// Scalar (limb-sized) helpers used by division normalization
// ============================================================================

impl Magnitude {
    /// `self * m` for a single-limb `m`.
    pub(crate) fn mul_scalar(&self, m: u32) -> Magnitude {
        if m == 0 || self.is_zero() {
            return Magnitude::zero();
        }
        let mut res = Vec::with_capacity(self.limbs.len() + 1);
        let mut carry: i64 = 0;
        for &limb in &self.limbs {
            let cur = carry + limb as i64 * m as i64;
            res.push((cur % BASE) as u32);
            carry = cur / BASE;
        }
        while carry != 0 {
            res.push((carry % BASE) as u32);
            carry /= BASE;
        }
        Magnitude::from_limbs(res)
    }

    /// `self / d` with remainder, for a single-limb `d > 0`. Processes limbs
    /// from most to least significant, carrying the running remainder down.
    pub(crate) fn div_scalar(&self, d: u32) -> (Magnitude, u32) {
        assert_ne!(d, 0, "div_scalar divisor must be non-zero");
        let mut result = vec![0u32; self.limbs.len()];
        let mut rem: i64 = 0;
        for i in (0..self.limbs.len()).rev() {
            let cur = rem * BASE + self.limbs[i] as i64;
            result[i] = (cur / d as i64) as u32;
            rem = cur % d as i64;
        }
        (Magnitude::from_limbs(result), rem as u32)
    }
}

// ============================================================================
// Multiplication: schoolbook / FFT dispatch
// ============================================================================

impl Magnitude {
    pub(crate) fn mul(&self, other: &Magnitude) -> Magnitude {
        if self.is_zero() || other.is_zero() {
            return Magnitude::zero();
        }
        let limbs = mul_limbs(&self.limbs, &other.limbs);
        Magnitude::from_limbs(limbs)
    }
}

/// Picks schoolbook or FFT per the size predicate in `SPEC_FULL.md` §4.3,
/// falling back to schoolbook when the FFT transform size would exceed the
/// empirically safe `f64` precision bound.
fn mul_limbs(a: &[u32], b: &[u32]) -> Vec<u32> {
    let n = a.len();
    let m = b.len();
    let use_schoolbook = (n <= SCHOOLBOOK_SINGLE_MAX && m <= SCHOOLBOOK_SINGLE_MAX)
        || (n + m <= SCHOOLBOOK_COMBINED_MAX);

    if use_schoolbook {
        return mul_schoolbook(a, b);
    }

    if fft::next_pow2(n + m) <= FFT_MAX_LIMBS {
        fft::multiply(a, b)
    } else {
        mul_schoolbook(a, b)
    }
}

/// O(n*m) long multiplication with carry propagation into later limbs.
fn mul_schoolbook(a: &[u32], b: &[u32]) -> Vec<u32> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut res = vec![0i64; a.len() + b.len()];
    for (i, &ai) in a.iter().enumerate() {
        let ai = ai as i64;
        let mut carry: i64 = 0;
        let mut j = 0usize;
        while j < b.len() || carry != 0 {
            let mut cur = res[i + j] + carry;
            if j < b.len() {
                cur += ai * b[j] as i64;
            }
            res[i + j] = cur % BASE;
            carry = cur / BASE;
            j += 1;
        }
    }
    let mut out: Vec<u32> = res.into_iter().map(|x| x as u32).collect();
    while let Some(&0) = out.last() {
        out.pop();
    }
    out
}

// ============================================================================
// Division with remainder: Knuth Algorithm D
// ============================================================================

impl Magnitude {
    /// `x / y` and `x % y` with `y > 0`, satisfying `x = q*y + r`, `0 <= r < y`.
    pub(crate) fn divmod(&self, y: &Magnitude) -> (Magnitude, Magnitude) {
        assert!(!y.is_zero(), "Magnitude::divmod divisor must be non-zero");

        if self.is_zero() {
            return (Magnitude::zero(), Magnitude::zero());
        }
        if *self < *y {
            return (Magnitude::zero(), self.clone());
        }

        // Normalize so the divisor's leading limb is >= BASE/2; this bounds
        // the trial-digit correction below to at most two decrements.
        let y_top = *y.limbs.last().unwrap();
        let norm = (BASE / (y_top as i64 + 1)) as u32;
        let a = if norm != 1 { self.mul_scalar(norm) } else { self.clone() };
        let b = if norm != 1 { y.mul_scalar(norm) } else { y.clone() };

        let n = a.limbs.len();
        let m = b.limbs.len();
        let mut q = vec![0u32; n];

        // Rolling remainder window, little-endian, with a moving head index
        // so prepending the next dividend limb is O(1).
        let mut window = vec![0u32; n + 2];
        let mut head = n + 1;
        let mut len = 0usize;

        for i in (0..n).rev() {
            if len == 0 {
                window[head] = a.limbs[i];
                len = 1;
            } else {
                head -= 1;
                window[head] = a.limbs[i];
                len += 1;
            }
            while len > 0 && window[head + len - 1] == 0 {
                len -= 1;
            }

            let s1 = if len <= m { 0 } else { window[head + m] as i64 };
            let s2 = if len <= m - 1 { 0 } else { window[head + m - 1] as i64 };
            let y_top = b.limbs[m - 1] as i64;
            let mut d_hat = ((BASE * s1 + s2) / y_top).min(BASE - 1);

            let mut bd = b.mul_scalar(d_hat as u32);
            while cmp_window(&window, head, len, &bd) == Ordering::Less {
                d_hat -= 1;
                bd = bd.sub(&b);
            }

            // Subtract bd from the window in place, borrow chain included.
            let mut borrow: i64 = 0;
            for (k, &bl) in bd.limbs.iter().enumerate() {
                let cur = window[head + k] as i64 - bl as i64 - borrow;
                if cur < 0 {
                    window[head + k] = (cur + BASE) as u32;
                    borrow = 1;
                } else {
                    window[head + k] = cur as u32;
                    borrow = 0;
                }
            }
            let mut k = bd.limbs.len();
            while borrow != 0 && k < len {
                let cur = window[head + k] as i64 - borrow;
                if cur < 0 {
                    window[head + k] = (cur + BASE) as u32;
                    borrow = 1;
                } else {
                    window[head + k] = cur as u32;
                    borrow = 0;
                }
                k += 1;
            }

            while len > 0 && window[head + len - 1] == 0 {
                len -= 1;
            }

            q[i] = d_hat as u32;
        }

        let quotient = Magnitude::from_limbs(q);
        let mut remainder = Magnitude::from_limbs(window[head..head + len].to_vec());
        if norm != 1 {
            remainder = remainder.div_scalar(norm).0;
        }
        (quotient, remainder)
    }
}

/// Compares the magnitude held in `window[head..head+len]` against `other`.
fn cmp_window(window: &[u32], head: usize, len: usize, other: &Magnitude) -> Ordering {
    let other = other.limbs();
    if len != other.len() {
        return len.cmp(&other.len());
    }
    for k in (0..len).rev() {
        let lhs = window[head + k];
        let rhs = other[k];
        if lhs != rhs {
            return lhs.cmp(&rhs);
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mag(v: u64) -> Magnitude {
        Magnitude::from_u64(v)
    }

    #[test]
    fn add_carries_across_limb_boundary() {
        let a = Magnitude::from_digit_groups(vec![99_999]);
        let b = Magnitude::from_digit_groups(vec![1]);
        assert_eq!(a.add(&b), Magnitude::from_digit_groups(vec![0, 1]));
    }

    #[test]
    fn sub_borrows_across_limbs() {
        let a = mag(1_000_000_000_000_000_000);
        let b = mag(1);
        let diff = a.sub(&b);
        assert_eq!(diff, mag(999_999_999_999_999_999));
    }

    #[test]
    fn schoolbook_and_fft_agree_on_midsize_products() {
        // Force the FFT path by hand-building operands above the schoolbook
        // thresholds, and compare against the schoolbook path directly.
        let a_limbs: Vec<u32> = (0..300u32).map(|i| i % 99_991).collect();
        let b_limbs: Vec<u32> = (0..300u32).map(|i| (i * 7) % 99_989).collect();
        let a = Magnitude::from_limbs(a_limbs.clone());
        let b = Magnitude::from_limbs(b_limbs.clone());

        let schoolbook = mul_schoolbook(&a_limbs, &b_limbs);
        let fft_result = fft::multiply(&a_limbs, &b_limbs);
        assert_eq!(schoolbook, fft_result);
        assert_eq!(a.mul(&b), Magnitude::from_limbs(schoolbook));
    }

    #[test]
    fn divmod_matches_known_case() {
        // 10^40, i.e. "1" followed by 40 zeros, packed into base-100000
        // limbs: limb 8 holds the single significant digit group.
        let x = Magnitude::from_digit_groups(vec![0, 0, 0, 0, 0, 0, 0, 0, 1]);
        let y = mag(3);
        let (q, r) = x.divmod(&y);
        assert_eq!(r, mag(1));
        // 10^40 / 3 = 333...3 (40 threes); top limb of the 40-digit
        // quotient, grouped in 5s, is "33333".
        assert_eq!(q.limbs().last().copied(), Some(33333));
    }

    #[test]
    fn divmod_small_dividend_shortcut() {
        let x = mag(5);
        let y = mag(100);
        let (q, r) = x.divmod(&y);
        assert!(q.is_zero());
        assert_eq!(r, mag(5));
    }

    #[test]
    fn mul_scalar_and_div_scalar_round_trip() {
        let a = mag(123_456_789_012_345);
        let scaled = a.mul_scalar(17);
        let (back, rem) = scaled.div_scalar(17);
        assert_eq!(back, a);
        assert_eq!(rem, 0);
    }
}
