//! Observation masks and the projection operator.
//!
//! A mask marks which entries of a data matrix were actually observed.
//! Projection onto a mask keeps the observed entries and zeroes the rest;
//! it is the operator written P_Omega in the completion literature.

use crate::error::{CompletionError, Result};
use crate::types::{DMatrix, Scalar};

/// Binary observation mask over a D x N data matrix.
///
/// Every entry is exactly 0 or 1. The invariant is established at
/// construction: [`ObservationMask::new`] rejects any other value with
/// [`CompletionError::InvalidMask`] instead of coercing it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationMask<T: Scalar> {
    weights: DMatrix<T>,
    observed: usize,
}

impl<T: Scalar> ObservationMask<T> {
    /// Create a mask from a raw weight matrix.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::InvalidMask`] if any entry is not
    /// exactly 0 or 1.
    pub fn new(weights: DMatrix<T>) -> Result<Self> {
        let mut observed = 0;
        for j in 0..weights.ncols() {
            for i in 0..weights.nrows() {
                let w = weights[(i, j)];
                if w == T::one() {
                    observed += 1;
                } else if w != T::zero() {
                    return Err(CompletionError::invalid_mask(format!(
                        "weight at ({}, {}) is {}, expected exactly 0 or 1",
                        i, j, w
                    )));
                }
            }
        }
        Ok(Self { weights, observed })
    }

    /// Create a mask from a per-entry observation predicate.
    ///
    /// The weight matrix is built directly from the predicate, so this
    /// constructor cannot fail.
    pub fn from_fn<F>(nrows: usize, ncols: usize, mut observed_at: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut observed = 0;
        let weights = DMatrix::from_fn(nrows, ncols, |i, j| {
            if observed_at(i, j) {
                observed += 1;
                T::one()
            } else {
                T::zero()
            }
        });
        Self { weights, observed }
    }

    /// Create a mask observing every entry.
    pub fn full(nrows: usize, ncols: usize) -> Self {
        Self {
            weights: DMatrix::from_element(nrows, ncols, T::one()),
            observed: nrows * ncols,
        }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.weights.ncols()
    }

    /// Shape as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        self.weights.shape()
    }

    /// Number of observed entries.
    pub fn observed_count(&self) -> usize {
        self.observed
    }

    /// Fraction of entries that are observed.
    pub fn density(&self) -> f64 {
        let total = self.weights.nrows() * self.weights.ncols();
        if total == 0 {
            0.0
        } else {
            self.observed as f64 / total as f64
        }
    }

    /// Whether the entry at (i, j) is observed.
    pub fn is_observed(&self, i: usize, j: usize) -> bool {
        self.weights[(i, j)] == T::one()
    }

    /// The underlying 0/1 weight matrix.
    pub fn weights(&self) -> &DMatrix<T> {
        &self.weights
    }

    /// Step size bound min(2, D*N / observed) for the residual feedback
    /// update, keeping it stable relative to the sampling density.
    pub fn recommended_step_size(&self) -> T {
        let two = <T as Scalar>::from_f64(2.0);
        if self.observed == 0 {
            return two;
        }
        let ratio = <T as Scalar>::from_usize(self.weights.nrows() * self.weights.ncols())
            / <T as Scalar>::from_usize(self.observed);
        if ratio < two {
            ratio
        } else {
            two
        }
    }

    /// Project a matrix onto the observed coordinates.
    ///
    /// Returns a matrix equal to `m` where the mask is 1 and zero where
    /// it is 0.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::DimensionMismatch`] if `m` does not
    /// have the mask's shape.
    pub fn project(&self, m: &DMatrix<T>) -> Result<DMatrix<T>> {
        if m.shape() != self.weights.shape() {
            return Err(CompletionError::dimension_mismatch(
                format!("{:?}", self.weights.shape()),
                format!("{:?}", m.shape()),
            ));
        }
        Ok(m.component_mul(&self.weights))
    }
}

/// Project `m` onto the observed coordinates described by a raw weight
/// matrix.
///
/// The weights are validated on every call; construct an
/// [`ObservationMask`] once when projecting repeatedly.
///
/// # Errors
///
/// Returns [`CompletionError::InvalidMask`] for weights other than 0 or 1
/// and [`CompletionError::DimensionMismatch`] for shape disagreement.
pub fn project<T: Scalar>(m: &DMatrix<T>, weights: &DMatrix<T>) -> Result<DMatrix<T>> {
    ObservationMask::new(weights.clone())?.project(m)
}
