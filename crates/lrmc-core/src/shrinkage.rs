//! Singular value soft-thresholding.
//!
//! Shrinkage is the proximal operator for the nuclear-norm penalty: it
//! decomposes a matrix, soft-thresholds the singular values and rebuilds
//! the result. Thresholding at tau kills every singular value at or
//! below tau and reduces the rest by tau, which is what drives the rank
//! of the iterates down.

use num_traits::Float;

use crate::error::{CompletionError, Result};
use crate::svd::SvdFactors;
use crate::types::{DMatrix, DVector, Scalar};

/// Soft-threshold a vector of singular values.
///
/// Singular values are non-negative by construction, so only the
/// positive branch of the generic soft-thresholding operator applies:
/// sigma <= tau maps to 0, sigma > tau maps to sigma - tau.
pub fn soft_threshold<T: Scalar>(sigma: &DVector<T>, tau: T) -> DVector<T> {
    sigma.map(|s| if s > tau { s - tau } else { T::zero() })
}

/// Apply soft-thresholding to a decomposition, producing fresh factors.
///
/// Consumes the input and never mutates a buffer the caller might still
/// hold; the thresholded singular values are a new allocation.
pub fn shrink_factors<T: Scalar>(factors: SvdFactors<T>, tau: T) -> SvdFactors<T> {
    let sigma = soft_threshold(&factors.sigma, tau);
    SvdFactors::new(factors.u, sigma, factors.v)
}

/// Shrink a matrix: decompose, soft-threshold the singular values at
/// `tau`, reconstruct.
///
/// Increasing `tau` never increases any output singular value; for `tau`
/// at or above the largest singular value the result is the zero matrix.
///
/// # Errors
///
/// Returns [`CompletionError::ComputationError`] if `tau` is negative or
/// non-finite, or if the decomposition fails (see
/// [`SvdFactors::decompose`]).
pub fn shrink<T: Scalar>(m: &DMatrix<T>, tau: T) -> Result<DMatrix<T>> {
    if !Float::is_finite(tau) || tau < T::zero() {
        return Err(CompletionError::computation_error(format!(
            "shrinkage threshold {} must be finite and non-negative",
            tau
        )));
    }
    let factors = SvdFactors::decompose(m)?;
    Ok(shrink_factors(factors, tau).reconstruct())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn frobenius_norm(m: &DMatrix<f64>) -> f64 {
        m.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    #[test]
    fn test_soft_threshold_values() {
        let sigma = DVector::from_vec(vec![5.0, 3.0, 1.0]);
        let shrunk = soft_threshold(&sigma, 1.0);
        assert_eq!(shrunk, DVector::from_vec(vec![4.0, 2.0, 0.0]));

        // Threshold equal to a singular value kills it.
        let shrunk = soft_threshold(&sigma, 3.0);
        assert_eq!(shrunk, DVector::from_vec(vec![2.0, 0.0, 0.0]));
    }

    #[test]
    fn test_shrink_scaled_identity() {
        // diag(4, 4) has singular values {4, 4}; shrinking at 1 yields
        // {3, 3} and reconstructs to diag(3, 3) exactly.
        let m = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 4.0]);
        let shrunk = shrink(&m, 1.0).unwrap();
        let expected = DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 3.0]);
        for (a, b) in shrunk.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_shrink_at_largest_singular_value_zeroes_matrix() {
        let m = DMatrix::from_diagonal(&DVector::from_vec(vec![5.0, 3.0, 1.0]));
        let shrunk = shrink(&m, 5.0).unwrap();
        assert!(frobenius_norm(&shrunk) < 1e-9);
    }

    #[test]
    fn test_shrink_is_monotone_in_tau() {
        let m = DMatrix::from_fn(4, 6, |i, j| ((i * 5 + j * 2) % 7) as f64 - 3.0);
        let mut previous = frobenius_norm(&shrink(&m, 0.0).unwrap());
        for k in 1..=10 {
            let tau = k as f64 * 0.7;
            let current = frobenius_norm(&shrink(&m, tau).unwrap());
            assert!(
                current <= previous + 1e-12,
                "norm increased from {} to {} at tau {}",
                previous,
                current,
                tau
            );
            previous = current;
        }
    }

    #[test]
    fn test_shrink_with_zero_tau_is_identity() {
        let m = DMatrix::from_fn(3, 5, |i, j| (i as f64 - 1.0) * (j as f64 + 0.5));
        let shrunk = shrink(&m, 0.0).unwrap();
        for (a, b) in shrunk.iter().zip(m.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_invalid_threshold_is_rejected() {
        let m = DMatrix::from_element(2, 2, 1.0);
        assert!(shrink(&m, -1.0).is_err());
        assert!(shrink(&m, f64::NAN).is_err());
    }

    #[test]
    fn test_shrink_factors_leaves_bases_intact() {
        let m = DMatrix::from_fn(4, 3, |i, j| (i + 2 * j) as f64);
        let factors = SvdFactors::decompose(&m).unwrap();
        let u = factors.u.clone();
        let v = factors.v.clone();
        let shrunk = shrink_factors(factors, 2.0);
        assert_eq!(shrunk.u, u);
        assert_eq!(shrunk.v, v);
    }
}
