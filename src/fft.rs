//! Complex-FFT convolution for large-operand magnitude multiplication.
//!
//! Iterative radix-2 decimation-in-time FFT over `Complex64` buffers. Used by
//! [`crate::magnitude`] once operands are big enough that schoolbook
//! multiplication's O(n*m) cost dominates the FFT's O(n log n) plus the
//! rounding risk of floating-point convolution.

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::magnitude::BASE;

/// In-place iterative radix-2 FFT (or inverse, when `invert`).
///
/// `a.len()` must be a power of two. Bit-reversal permutation first, then
/// `log2(n)` butterfly passes with twiddle factors `e^{±2πi/len}`. The
/// inverse transform divides every output by `n`.
fn fft(a: &mut [Complex64], invert: bool) {
    let n = a.len();
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j ^= bit;
        if i < j {
            a.swap(i, j);
        }
    }

    let mut len = 2usize;
    while len <= n {
        let ang = 2.0 * PI / len as f64 * if invert { -1.0 } else { 1.0 };
        let wlen = Complex64::from_polar(1.0, ang);
        let half = len / 2;
        let mut i = 0;
        while i < n {
            let mut w = Complex64::new(1.0, 0.0);
            for k in 0..half {
                let u = a[i + k];
                let v = a[i + k + half] * w;
                a[i + k] = u + v;
                a[i + k + half] = u - v;
                w *= wlen;
            }
            i += len;
        }
        len <<= 1;
    }

    if invert {
        let n_f = n as f64;
        for x in a.iter_mut() {
            *x /= n_f;
        }
    }
}

/// Next power of two that is `>= n`.
pub(crate) fn next_pow2(n: usize) -> usize {
    let mut p = 1usize;
    while p < n {
        p <<= 1;
    }
    p
}

/// Multiply two base-`B` limb sequences via complex FFT convolution.
///
/// Inputs must already be free of trailing zero limbs; the result may have
/// trailing zero limbs and is trimmed by the caller. Rounds each convolved
/// coefficient half-away-from-zero before carry-propagating in base `B`,
/// normalizing any slightly-negative near-zero coefficient into `[0, B)`.
pub(crate) fn multiply(lhs: &[u32], rhs: &[u32]) -> Vec<u32> {
    if lhs.is_empty() || rhs.is_empty() {
        return Vec::new();
    }

    let n = next_pow2(lhs.len() + rhs.len());
    let mut fa = vec![Complex64::new(0.0, 0.0); n];
    let mut fb = vec![Complex64::new(0.0, 0.0); n];
    for (slot, &limb) in fa.iter_mut().zip(lhs.iter()) {
        *slot = Complex64::new(limb as f64, 0.0);
    }
    for (slot, &limb) in fb.iter_mut().zip(rhs.iter()) {
        *slot = Complex64::new(limb as f64, 0.0);
    }

    fft(&mut fa, false);
    fft(&mut fb, false);
    for (x, y) in fa.iter_mut().zip(fb.iter()) {
        *x *= y;
    }
    fft(&mut fa, true);

    let mut res = vec![0u32; n];
    let mut carry: i64 = 0;
    for (slot, c) in res.iter_mut().zip(fa.iter()) {
        let v = c.re;
        let rounded = if v >= 0.0 {
            (v + 0.5).floor() as i64
        } else {
            (v - 0.5).ceil() as i64
        };
        let mut cur = rounded + carry;
        let mut digit = cur % BASE;
        if digit < 0 {
            digit += BASE;
            cur -= BASE;
        }
        *slot = digit as u32;
        carry = cur / BASE;
    }
    while carry != 0 {
        let mut digit = carry % BASE;
        if digit < 0 {
            digit += BASE;
        }
        res.push(digit as u32);
        carry /= BASE;
    }

    while let Some(&0) = res.last() {
        res.pop();
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_pow2_boundaries() {
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(2), 2);
        assert_eq!(next_pow2(3), 4);
        assert_eq!(next_pow2(5), 8);
        assert_eq!(next_pow2(256), 256);
        assert_eq!(next_pow2(257), 512);
    }

    #[test]
    fn empty_operand_yields_empty_product() {
        assert!(multiply(&[], &[1, 2, 3]).is_empty());
        assert!(multiply(&[1, 2, 3], &[]).is_empty());
    }
}
