//! Core operators for low-rank matrix completion.
//!
//! This crate provides the numerical primitives that the iterative
//! completion solver is built from:
//!
//! - [`mask`]: validated observation masks and the projection operator
//! - [`svd`]: the reduced decompose/reconstruct pair
//! - [`shrinkage`]: singular value soft-thresholding
//! - [`error`]: error types for operator and solver failures
//! - [`types`]: scalar abstraction and dense matrix aliases
//!
//! All operators are pure functions of their inputs; no module here holds
//! iteration state.

pub mod error;
pub mod mask;
pub mod shrinkage;
pub mod svd;
pub mod types;

// Re-export commonly used items at the crate root
pub use error::{CompletionError, Result, SolverError, SolverResult};
pub use mask::{project, ObservationMask};
pub use shrinkage::{shrink, shrink_factors, soft_threshold};
pub use svd::SvdFactors;
pub use types::{DMatrix, DVector, Scalar};
