//! Error types for matrix completion.
//!
//! This module defines the error types used throughout the workspace,
//! split between operator-level failures and solver-level failures.

use thiserror::Error;

/// Errors that can occur in the completion operators.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The observation mask contains a value other than 0 or 1.
    ///
    /// Masks are binary indicators of which entries are observed; a
    /// fractional weight must never silently act as a soft attenuation,
    /// so construction fails instead.
    #[error("Invalid observation mask: {reason}")]
    InvalidMask {
        /// Description of the offending entry
        reason: String,
    },

    /// Dimension mismatch between matrices.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// A numerical computation failed.
    ///
    /// Raised when a matrix contains non-finite values or the singular
    /// value decomposition fails to converge internally. No partial
    /// result is returned.
    #[error("Computation failed: {reason}")]
    ComputationError {
        /// Description of the numerical failure
        reason: String,
    },
}

impl CompletionError {
    /// Create an InvalidMask error with a custom reason.
    pub fn invalid_mask<S: Into<String>>(reason: S) -> Self {
        Self::InvalidMask {
            reason: reason.into(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a ComputationError with a custom reason.
    pub fn computation_error<S: Into<String>>(reason: S) -> Self {
        Self::ComputationError {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while driving the iterative solver.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// The iteration diverged.
    ///
    /// The change between successive estimates reached the divergence
    /// ceiling; the estimate at that point is not meaningful. Divergence
    /// is not transient, so the solver never retries.
    #[error("Iteration diverged after {iterations} iterations (change {change:.3e})")]
    Diverged {
        /// Number of iterations performed before the guard triggered
        iterations: usize,
        /// Total absolute change at the terminating iteration
        change: f64,
    },

    /// Maximum number of iterations reached without convergence.
    #[error("Maximum iterations ({max_iterations}) reached without convergence")]
    MaxIterationsReached {
        /// Maximum number of iterations allowed
        max_iterations: usize,
        /// Total absolute change at the final iteration
        change: f64,
        /// Convergence threshold that was not met
        tolerance: f64,
    },

    /// Invalid solver configuration.
    #[error("Invalid solver configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Propagated operator error.
    #[error("Completion operator failed: {0}")]
    CompletionError(#[from] CompletionError),
}

impl SolverError {
    /// Create a Diverged error with its terminal diagnostics.
    pub fn diverged(iterations: usize, change: f64) -> Self {
        Self::Diverged { iterations, change }
    }

    /// Create a MaxIterationsReached error with convergence information.
    pub fn max_iterations_reached(max_iterations: usize, change: f64, tolerance: f64) -> Self {
        Self::MaxIterationsReached {
            max_iterations,
            change,
            tolerance,
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Result type alias for operations that can produce CompletionError.
pub type Result<T> = std::result::Result<T, CompletionError>;

/// Result type alias for solver operations.
pub type SolverResult<T> = std::result::Result<T, SolverError>;
