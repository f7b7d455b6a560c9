//! Type definitions and aliases for matrix completion.
//!
//! This module provides the scalar trait shared by all operators and the
//! dense matrix/vector aliases used throughout the workspace.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in completion problems (f32 or f64).
///
/// This trait combines the numeric traits required by the completion
/// operators with the tolerances that parametrize the solver loop.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default convergence tolerance per matrix entry.
    ///
    /// The solver treats a total absolute change of `tolerance * rows * cols`
    /// between successive estimates as convergence. The default of 0.5 is
    /// calibrated for 8-bit image intensities (0-255); callers working on
    /// data in a different numeric range should override it.
    const DEFAULT_ENTRY_TOLERANCE: Self;

    /// Total absolute change treated as irrecoverable divergence.
    const DIVERGENCE_LIMIT: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    ///
    /// Returns None if the conversion fails.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    ///
    /// Returns None if the conversion fails.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }

    /// Convert from usize (for entry counts).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_usize` for a non-panicking version.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }

    /// Try to convert from usize.
    ///
    /// Returns None if the conversion fails.
    fn try_from_usize(v: usize) -> Option<Self> {
        <Self as FromPrimitive>::from_usize(v)
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_ENTRY_TOLERANCE: Self = 0.5;
    const DIVERGENCE_LIMIT: Self = 1e13;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_ENTRY_TOLERANCE: Self = 0.5;
    const DIVERGENCE_LIMIT: Self = 1e13;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;
