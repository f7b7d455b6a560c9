//! Reduced singular value decomposition and its inverse.
//!
//! The pair of operations here factors a matrix as M = U * Sigma * V^T
//! and rebuilds a matrix from such a factorization. The decomposition is
//! the reduced (economy) form: for a D x N matrix the factor rank is
//! min(D, N), not the full unitary bases.

use nalgebra::SVD;

use crate::error::{CompletionError, Result};
use crate::types::{DMatrix, DVector, Scalar};
use num_traits::Float;

/// Iteration cap handed to nalgebra's SVD; generous for the dense
/// matrices encountered here, so hitting it signals a genuine failure.
const MAX_SVD_ITERATIONS: usize = 1024;

/// Reduced SVD factors (U, Sigma, V) of a matrix, with M = U * Sigma * V^T.
///
/// Sigma is held as a vector of non-negative singular values in
/// descending order; U and V have orthonormal columns.
#[derive(Debug, Clone)]
pub struct SvdFactors<T: Scalar> {
    /// Left singular vectors (D x k)
    pub u: DMatrix<T>,
    /// Singular values, descending (length k)
    pub sigma: DVector<T>,
    /// Right singular vectors (N x k)
    pub v: DMatrix<T>,
}

impl<T: Scalar> SvdFactors<T> {
    /// Create factors from their parts.
    pub fn new(u: DMatrix<T>, sigma: DVector<T>, v: DMatrix<T>) -> Self {
        Self { u, sigma, v }
    }

    /// Compute the reduced SVD of a matrix.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::ComputationError`] if the matrix
    /// contains non-finite values or the decomposition fails to converge
    /// internally. The error propagates; no partial factorization is
    /// returned.
    pub fn decompose(m: &DMatrix<T>) -> Result<Self> {
        if m.iter().any(|v| !Float::is_finite(*v)) {
            return Err(CompletionError::computation_error(
                "matrix contains non-finite entries",
            ));
        }

        let svd = SVD::try_new(
            m.clone(),
            true,
            true,
            <T as Scalar>::EPSILON,
            MAX_SVD_ITERATIONS,
        )
        .ok_or_else(|| {
            CompletionError::computation_error("singular value decomposition did not converge")
        })?;

        let u = svd
            .u
            .ok_or_else(|| CompletionError::computation_error("SVD failed to compute U"))?;
        let v_t = svd
            .v_t
            .ok_or_else(|| CompletionError::computation_error("SVD failed to compute V^T"))?;

        Ok(Self {
            u,
            sigma: svd.singular_values,
            v: v_t.transpose(),
        })
    }

    /// Rebuild the matrix as U * (Sigma * V^T).
    ///
    /// `reconstruct(decompose(m))` equals `m` within floating-point
    /// tolerance for any real matrix, including rank-deficient and
    /// non-square ones.
    pub fn reconstruct(&self) -> DMatrix<T> {
        &self.u * (DMatrix::from_diagonal(&self.sigma) * self.v.transpose())
    }

    /// The largest singular value, or zero for an empty factorization.
    pub fn largest_singular_value(&self) -> T {
        if self.sigma.is_empty() {
            T::zero()
        } else {
            self.sigma[0]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_round_trip_square() {
        let m = DMatrix::from_row_slice(3, 3, &[15.0, 1.0, 1.0, 1.0, 20.0, 1.0, 1.0, 1.0, 25.0]);
        let factors = SvdFactors::decompose(&m).unwrap();
        assert!(max_abs_diff(&factors.reconstruct(), &m) < 1e-9);
    }

    #[test]
    fn test_round_trip_non_square_and_rank_deficient() {
        let wide = DMatrix::from_fn(3, 7, |i, j| (i as f64 + 1.0) * (j as f64 - 2.0));
        let factors = SvdFactors::decompose(&wide).unwrap();
        assert!(max_abs_diff(&factors.reconstruct(), &wide) < 1e-9);

        // Outer product: rank 1 by construction.
        let tall = DMatrix::from_fn(8, 4, |i, j| (i as f64 + 1.0) * (j as f64 + 1.0));
        let factors = SvdFactors::decompose(&tall).unwrap();
        assert!(max_abs_diff(&factors.reconstruct(), &tall) < 1e-9);
        assert!(factors.sigma[1].abs() < 1e-9);
    }

    #[test]
    fn test_singular_values_of_scaled_identity() {
        let m = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 4.0]);
        let factors = SvdFactors::decompose(&m).unwrap();
        assert_abs_diff_eq!(factors.sigma[0], 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(factors.sigma[1], 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(factors.largest_singular_value(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_values_are_descending() {
        let m = DMatrix::from_fn(5, 4, |i, j| ((i * 7 + j * 3) % 11) as f64 - 5.0);
        let factors = SvdFactors::decompose(&m).unwrap();
        for k in 1..factors.sigma.len() {
            assert!(factors.sigma[k - 1] >= factors.sigma[k]);
            assert!(factors.sigma[k] >= 0.0);
        }
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let mut m = DMatrix::from_element(2, 2, 1.0);
        m[(0, 0)] = f64::NAN;
        let err = SvdFactors::decompose(&m).unwrap_err();
        assert!(matches!(err, CompletionError::ComputationError { .. }));

        m[(0, 0)] = f64::INFINITY;
        let err = SvdFactors::decompose(&m).unwrap_err();
        assert!(matches!(err, CompletionError::ComputationError { .. }));
    }
}
