//! Random entry removal for synthetic completion experiments.

use rand::Rng;

use lrmc_core::mask::ObservationMask;
use lrmc_core::types::{DMatrix, Scalar};

use crate::error::{ImagingError, Result};

/// Independently drop (zero) each entry of `x` with probability
/// `drop_probability`, returning the corrupted matrix together with the
/// observation mask marking exactly the retained entries.
///
/// The mask is built at sampling time rather than by comparing the
/// corrupted matrix against the original; an equality comparison would
/// mislabel entries that were genuinely zero, and is only possible when
/// the ground truth is in hand.
///
/// # Errors
///
/// Returns [`ImagingError::InvalidProbability`] if `drop_probability`
/// lies outside [0, 1].
pub fn corrupt<T, R>(
    x: &DMatrix<T>,
    drop_probability: f64,
    rng: &mut R,
) -> Result<(DMatrix<T>, ObservationMask<T>)>
where
    T: Scalar,
    R: Rng + ?Sized,
{
    if !(0.0..=1.0).contains(&drop_probability) {
        return Err(ImagingError::InvalidProbability {
            value: drop_probability,
        });
    }

    let (rows, cols) = x.shape();
    let kept: DMatrix<bool> = DMatrix::from_fn(rows, cols, |_, _| !rng.gen_bool(drop_probability));
    let mask = ObservationMask::from_fn(rows, cols, |i, j| kept[(i, j)]);
    let corrupted = DMatrix::from_fn(rows, cols, |i, j| {
        if kept[(i, j)] {
            x[(i, j)]
        } else {
            T::zero()
        }
    });

    Ok((corrupted, mask))
}
