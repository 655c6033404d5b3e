//! Input validation and bit packing for literal evaluation.
//!
//! Clauses evaluate 64 literals per AND using packed words. Bit `k % 64` of
//! word `k / 64` holds feature `k`.

use crate::error::{Error, Result};

/// # Overview
///
/// Checks that `x` has exactly `n_features` values, each 0 or 1.
///
/// # Examples
///
/// ```
/// use tsetlin_engine::{Error, literals::check_example};
///
/// assert!(check_example(&[1, 0, 1], 3).is_ok());
/// assert_eq!(
///     check_example(&[1, 0], 3),
///     Err(Error::ShapeMismatch { expected: 3, got: 2 })
/// );
/// ```
pub fn check_example(x: &[u8], n_features: usize) -> Result<()> {
    if x.len() != n_features {
        return Err(Error::ShapeMismatch {
            expected: n_features,
            got:      x.len()
        });
    }
    if let Some((index, &value)) = x.iter().enumerate().find(|&(_, &v)| v > 1) {
        return Err(Error::InvalidFeature { index, value });
    }
    Ok(())
}

/// # Overview
///
/// Number of u64 words needed for `n_features` bits.
#[inline(always)]
#[must_use]
pub const fn n_words(n_features: usize) -> usize {
    n_features.div_ceil(64)
}

/// # Overview
///
/// Packs binary input into u64 words for bitwise evaluation.
///
/// Any non-zero value sets the bit; call [`check_example`] first when the
/// input is untrusted.
#[inline]
#[must_use]
pub fn pack_input(x: &[u8]) -> Vec<u64> {
    let mut packed = vec![0u64; n_words(x.len())];

    for (k, &xk) in x.iter().enumerate() {
        if xk != 0 {
            packed[k / 64] |= 1u64 << (k % 64);
        }
    }

    packed
}
