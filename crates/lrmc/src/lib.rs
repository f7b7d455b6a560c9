//! Low-rank matrix completion by singular value thresholding.
//!
//! This crate recovers a fully-observed numeric matrix from a
//! partially-observed, noisy sample under the assumption that the true
//! matrix is approximately low-rank. The core is an iterative solver
//! built from three operators: projection onto the observed entries,
//! singular value decomposition/reconstruction, and singular value
//! shrinkage.
//!
//! # Crates
//!
//! - `lrmc-core`: masks, projection, SVD pair, shrinkage, error types
//! - `lrmc-svt`: the iterative solver and its termination machinery
//! - `lrmc-imaging`: PGM datasets, corruption, comparison rendering
//!
//! # Example
//!
//! ```rust
//! use lrmc::prelude::*;
//!
//! # fn main() -> Result<(), lrmc::SolverError> {
//! let x = DMatrix::from_fn(10, 10, |i, j| (i as f64 + 1.0) * (j as f64 + 1.0));
//! let mask = ObservationMask::from_fn(10, 10, |i, j| (i + 3 * j) % 5 != 0);
//!
//! let solver = Svt::new(SvtConfig::new().with_tau(0.5).with_step_size(1.0))?;
//! let criterion = StoppingCriterion::new().with_entry_tolerance(1e-3);
//! let completion = solver.complete(&x, &mask, &criterion)?;
//!
//! assert!(completion.converged);
//! # Ok(())
//! # }
//! ```

// Re-export the public API of the member crates
pub use lrmc_core::{
    project, shrink, shrink_factors, soft_threshold, CompletionError, DMatrix, DVector,
    ObservationMask, Scalar, SolverError, SolverResult, SvdFactors,
};
pub use lrmc_imaging::{
    comparison_strip, corrupt, read_pgm, write_pgm, GrayImage, ImageDataset, ImagingError,
};
pub use lrmc_svt::{Completion, StoppingCriterion, Svt, SvtConfig, TerminationReason};

// Re-export the underlying linear algebra library
pub use nalgebra;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use lrmc::prelude::*;
/// ```
pub mod prelude {
    pub use lrmc_core::{
        project, shrink, CompletionError, DMatrix, DVector, ObservationMask, Scalar, SolverError,
        SvdFactors,
    };
    pub use lrmc_imaging::{
        comparison_strip, corrupt, read_pgm, write_pgm, GrayImage, ImageDataset, ImagingError,
    };
    pub use lrmc_svt::{Completion, StoppingCriterion, Svt, SvtConfig, TerminationReason};
}
