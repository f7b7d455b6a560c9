//! Iterative low-rank matrix completion by singular value thresholding.
//!
//! This crate drives the fixed-point iteration that combines the
//! projection, decomposition and shrinkage operators from `lrmc-core`
//! into a convergent reconstruction algorithm.
//!
//! # Example
//!
//! ```rust
//! use lrmc_core::{DMatrix, ObservationMask};
//! use lrmc_svt::{StoppingCriterion, Svt, SvtConfig};
//!
//! # fn main() -> Result<(), lrmc_svt::SolverError> {
//! // Rank-1 data with one entry unobserved.
//! let x = DMatrix::from_fn(6, 6, |i, j| (i as f64 + 1.0) * (j as f64 + 1.0));
//! let mask = ObservationMask::from_fn(6, 6, |i, j| !(i == 2 && j == 3));
//!
//! let solver = Svt::new(SvtConfig::new().with_tau(0.5).with_step_size(1.0))?;
//! let criterion = StoppingCriterion::new().with_entry_tolerance(1e-3);
//! let completion = solver.complete(&x, &mask, &criterion)?;
//!
//! assert!(completion.converged);
//! # Ok(())
//! # }
//! ```

pub mod svt;

// Re-export the solver surface for convenience
pub use svt::{Completion, StoppingCriterion, Svt, SvtConfig, TerminationReason};

// Re-export commonly used items from core
pub use lrmc_core::{CompletionError, SolverError, SolverResult};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        let _config = SvtConfig::<f64>::new();
        let _criterion = StoppingCriterion::<f64>::new();
        let _reason = TerminationReason::Converged;
    }
}
