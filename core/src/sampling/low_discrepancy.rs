//! Low Discrepancy Sequences

use crate::pbrt::*;
use crate::rng::ONE_MINUS_EPSILON;
use hexf::hexf64;

/// The prime bases supported by `radical_inverse()`.
pub const PRIMES: [u64; 5] = [2, 3, 5, 7, 11];

/// Returns the radical inverse of `a` in the prime base selected by
/// `base_index`; i.e. the digits of `a` mirrored about the decimal point.
/// Successive dimensions of a Halton point use successive base indices.
///
/// * `base_index` - Index into `PRIMES`.
/// * `a`          - The sample index.
pub fn radical_inverse(base_index: usize, a: u64) -> Float {
    match base_index {
        // Bit reversal is exact for base 2.
        0 => min(
            (a.reverse_bits() as f64 * hexf64!("0x1.0p-64")) as Float,
            ONE_MINUS_EPSILON,
        ),
        i if i < PRIMES.len() => radical_inverse_specialized(PRIMES[i], a),
        _ => panic!("radical_inverse() base index {base_index} is not supported"),
    }
}

/// Computes the radical inverse for a given base.
///
/// * `base` - The base.
/// * `a`    - The sample index.
fn radical_inverse_specialized(base: u64, mut a: u64) -> Float {
    let inv_base = 1.0 / base as f64;
    let mut reversed_digits = 0_u64;
    let mut inv_base_n = 1.0_f64;
    while a > 0 {
        let next = a / base;
        let digit = a - next * base;
        reversed_digits = reversed_digits * base + digit;
        inv_base_n *= inv_base;
        a = next;
    }
    min(
        (reversed_digits as f64 * inv_base_n) as Float,
        ONE_MINUS_EPSILON,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn base_two_sequence() {
        let expected = [0.0, 0.5, 0.25, 0.75, 0.125];
        for (a, e) in expected.iter().enumerate() {
            assert_eq!(radical_inverse(0, a as u64), *e);
        }
    }

    #[test]
    fn base_three_sequence() {
        let expected = [0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0 / 9.0, 4.0 / 9.0];
        for (a, e) in expected.iter().enumerate() {
            assert!(approx_eq!(f32, radical_inverse(1, a as u64), *e, epsilon = 1e-6));
        }
    }

    #[test]
    #[should_panic]
    fn unsupported_base() {
        radical_inverse(PRIMES.len(), 1);
    }
}
