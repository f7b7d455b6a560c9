//! The singular value thresholding (SVT) completion solver.
//!
//! # Algorithm Overview
//!
//! Given a data matrix X, an observation mask, a shrinkage threshold tau
//! and a step size beta, the solver runs the feedback (Bregman-style)
//! iteration
//!
//! ```text
//! Z_0     = P(X)
//! A_{k+1} = shrink(P(Z_k), tau)
//! Z_{k+1} = Z_k + beta * P(X - A_{k+1})
//! ```
//!
//! where P projects onto the observed coordinates. The accumulator Z
//! pushes the observed-entry residual back into the next reconstruction
//! target; shrinkage enforces the low-rank prior. The loop stops when
//! the total absolute change between successive estimates falls below
//! `entry_tolerance * rows * cols`, and aborts when the change reaches
//! the divergence ceiling or the iteration budget runs out.
//!
//! Each iteration strictly depends on the previous one, so the solver is
//! single-threaded and synchronous; all state (Z and the estimate) is
//! scoped to one `complete` call. For fixed inputs the algorithm is
//! fully deterministic.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use num_traits::Float;

use lrmc_core::error::{CompletionError, SolverError, SolverResult};
use lrmc_core::mask::ObservationMask;
use lrmc_core::shrinkage::shrink;
use lrmc_core::types::{DMatrix, Scalar};

/// Configuration for the SVT solver.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SvtConfig<T>
where
    T: Scalar,
{
    /// Shrinkage threshold: singular values at or below `tau` are killed,
    /// values above are reduced by `tau`. Scale-dependent; the useful
    /// range grows with the magnitude of the data.
    pub tau: T,

    /// Step size for the residual feedback update. Callers typically
    /// bound it by min(2, entries / observed), see
    /// [`ObservationMask::recommended_step_size`].
    pub beta: T,

    /// Reproduce the reference termination behavior: return the current
    /// estimate on divergence or budget exhaustion instead of an error.
    /// The termination reason still records what happened.
    pub legacy_termination: bool,

    /// Period of iterations between progress log records (debug level).
    /// Zero disables periodic logging.
    pub log_period: usize,
}

impl<T> Default for SvtConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            tau: T::one(),
            beta: T::one(),
            legacy_termination: false,
            log_period: 100,
        }
    }
}

impl<T> SvtConfig<T>
where
    T: Scalar,
{
    /// Creates a new configuration with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shrinkage threshold.
    pub fn with_tau(mut self, tau: T) -> Self {
        self.tau = tau;
        self
    }

    /// Sets the residual feedback step size.
    pub fn with_step_size(mut self, beta: T) -> Self {
        self.beta = beta;
        self
    }

    /// Selects the reference termination behavior (see
    /// [`SvtConfig::legacy_termination`]).
    pub fn with_legacy_termination(mut self, legacy: bool) -> Self {
        self.legacy_termination = legacy;
        self
    }

    /// Sets the progress logging period.
    pub fn with_log_period(mut self, period: usize) -> Self {
        self.log_period = period;
        self
    }
}

/// Termination conditions for the completion loop.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoppingCriterion<T>
where
    T: Scalar,
{
    /// Maximum number of iterations; `None` removes the cap entirely,
    /// restoring the otherwise-unbounded loop of the reference
    /// formulation.
    pub max_iterations: Option<usize>,

    /// Average absolute change per entry below which the iteration is
    /// considered converged. The total threshold is this value times the
    /// entry count. The default of 0.5 is calibrated for 0-255 image
    /// intensities; tune it for data on another scale.
    pub entry_tolerance: T,

    /// Total absolute change at or above which the iteration is treated
    /// as irrecoverably diverged.
    pub divergence_limit: T,
}

impl<T> Default for StoppingCriterion<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            max_iterations: Some(1000),
            entry_tolerance: T::DEFAULT_ENTRY_TOLERANCE,
            divergence_limit: T::DIVERGENCE_LIMIT,
        }
    }
}

impl<T> StoppingCriterion<T>
where
    T: Scalar,
{
    /// Creates a new stopping criterion with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iter: usize) -> Self {
        self.max_iterations = Some(max_iter);
        self
    }

    /// Removes the iteration cap.
    pub fn with_unbounded_iterations(mut self) -> Self {
        self.max_iterations = None;
        self
    }

    /// Sets the per-entry convergence tolerance.
    pub fn with_entry_tolerance(mut self, tol: T) -> Self {
        self.entry_tolerance = tol;
        self
    }

    /// Sets the divergence ceiling.
    pub fn with_divergence_limit(mut self, limit: T) -> Self {
        self.divergence_limit = limit;
        self
    }

    fn validate(&self) -> SolverResult<()> {
        if !Float::is_finite(self.entry_tolerance) || self.entry_tolerance <= T::zero() {
            return Err(SolverError::invalid_configuration(
                "must be positive and finite",
                "entry_tolerance",
                format!("{}", self.entry_tolerance),
            ));
        }
        if !Float::is_finite(self.divergence_limit) || self.divergence_limit <= T::zero() {
            return Err(SolverError::invalid_configuration(
                "must be positive and finite",
                "divergence_limit",
                format!("{}", self.divergence_limit),
            ));
        }
        if self.max_iterations == Some(0) {
            return Err(SolverError::invalid_configuration(
                "must be at least 1",
                "max_iterations",
                "0",
            ));
        }
        Ok(())
    }
}

/// Why the completion loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerminationReason {
    /// Change between successive estimates fell below the threshold.
    Converged,
    /// Iteration budget exhausted without convergence.
    MaxIterations,
    /// Change reached the divergence ceiling; the estimate is not
    /// meaningful.
    Diverged,
}

/// Result of a completion run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Completion<T>
where
    T: Scalar,
{
    /// The completed estimate from the terminating iteration.
    pub matrix: DMatrix<T>,

    /// Number of iterations performed.
    pub iterations: usize,

    /// Total absolute change between the last two estimates.
    pub change: T,

    /// Wall-clock time of the solve.
    pub duration: Duration,

    /// Why the loop stopped.
    pub termination_reason: TerminationReason,

    /// True if the loop stopped because the convergence threshold was met.
    pub converged: bool,
}

impl<T> Completion<T>
where
    T: Scalar,
{
    /// Creates a completion result; the `converged` flag is derived from
    /// the termination reason.
    pub fn new(
        matrix: DMatrix<T>,
        iterations: usize,
        change: T,
        duration: Duration,
        termination_reason: TerminationReason,
    ) -> Self {
        let converged = matches!(termination_reason, TerminationReason::Converged);
        Self {
            matrix,
            iterations,
            change,
            duration,
            termination_reason,
            converged,
        }
    }
}

/// The singular value thresholding solver.
///
/// Holds a validated [`SvtConfig`]; each [`Svt::complete`] call owns its
/// entire iteration state, so one solver can be reused across problems.
#[derive(Debug, Clone)]
pub struct Svt<T>
where
    T: Scalar,
{
    config: SvtConfig<T>,
}

impl<T> Svt<T>
where
    T: Scalar,
{
    /// Creates a solver from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::InvalidConfiguration`] if `tau` is negative
    /// or non-finite, or `beta` is not strictly positive and finite.
    pub fn new(config: SvtConfig<T>) -> SolverResult<Self> {
        if !Float::is_finite(config.tau) || config.tau < T::zero() {
            return Err(SolverError::invalid_configuration(
                "must be non-negative and finite",
                "tau",
                format!("{}", config.tau),
            ));
        }
        if !Float::is_finite(config.beta) || config.beta <= T::zero() {
            return Err(SolverError::invalid_configuration(
                "must be positive and finite",
                "beta",
                format!("{}", config.beta),
            ));
        }
        Ok(Self { config })
    }

    /// The solver configuration.
    pub fn config(&self) -> &SvtConfig<T> {
        &self.config
    }

    /// Completes a partially-observed matrix.
    ///
    /// `x` supplies the available samples; entries outside the mask are
    /// ignored. Returns the low-rank estimate from the terminating
    /// iteration together with its diagnostics.
    ///
    /// # Errors
    ///
    /// - [`SolverError::CompletionError`] for shape mismatch between `x`
    ///   and the mask, or a failed decomposition (propagated immediately,
    ///   no partial result).
    /// - [`SolverError::Diverged`] / [`SolverError::MaxIterationsReached`]
    ///   when the loop terminates without converging, unless
    ///   `legacy_termination` selects the reference behavior of returning
    ///   the current estimate.
    pub fn complete(
        &self,
        x: &DMatrix<T>,
        mask: &ObservationMask<T>,
        criterion: &StoppingCriterion<T>,
    ) -> SolverResult<Completion<T>> {
        criterion.validate()?;
        if x.shape() != mask.shape() {
            return Err(CompletionError::dimension_mismatch(
                format!("{:?}", mask.shape()),
                format!("{:?}", x.shape()),
            )
            .into());
        }

        let start = Instant::now();
        let (rows, cols) = x.shape();
        let threshold = criterion.entry_tolerance * <T as Scalar>::from_usize(rows * cols);

        info!(
            "svt: completing {}x{} matrix, {} of {} entries observed, tau {}, beta {}",
            rows,
            cols,
            mask.observed_count(),
            rows * cols,
            self.config.tau,
            self.config.beta
        );

        let mut z = mask.project(x)?;
        // Reference for the first convergence check only, never a
        // completion candidate.
        let mut estimate = x.clone();
        let mut iterations = 0;

        loop {
            let next = shrink(&mask.project(&z)?, self.config.tau)?;
            z += mask.project(&(x - &next))? * self.config.beta;

            let change = total_absolute_change(&next, &estimate);
            estimate = next;
            iterations += 1;

            if self.config.log_period > 0 && iterations % self.config.log_period == 0 {
                debug!(
                    "svt: iteration {}, change {:.3e}",
                    iterations,
                    change.to_f64()
                );
            }

            if !Float::is_finite(change) || change >= criterion.divergence_limit {
                warn!(
                    "svt: diverged after {} iterations, change {:.3e}",
                    iterations,
                    change.to_f64()
                );
                return self.non_convergence(
                    estimate,
                    iterations,
                    change,
                    start.elapsed(),
                    TerminationReason::Diverged,
                    criterion,
                    threshold,
                );
            }

            if change <= threshold {
                info!(
                    "svt: converged after {} iterations, change {:.3e}",
                    iterations,
                    change.to_f64()
                );
                return Ok(Completion::new(
                    estimate,
                    iterations,
                    change,
                    start.elapsed(),
                    TerminationReason::Converged,
                ));
            }

            if let Some(max) = criterion.max_iterations {
                if iterations >= max {
                    warn!(
                        "svt: iteration budget of {} exhausted, change {:.3e}",
                        max,
                        change.to_f64()
                    );
                    return self.non_convergence(
                        estimate,
                        iterations,
                        change,
                        start.elapsed(),
                        TerminationReason::MaxIterations,
                        criterion,
                        threshold,
                    );
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn non_convergence(
        &self,
        estimate: DMatrix<T>,
        iterations: usize,
        change: T,
        duration: Duration,
        reason: TerminationReason,
        criterion: &StoppingCriterion<T>,
        threshold: T,
    ) -> SolverResult<Completion<T>> {
        if self.config.legacy_termination {
            return Ok(Completion::new(
                estimate, iterations, change, duration, reason,
            ));
        }
        match reason {
            TerminationReason::Diverged => Err(SolverError::diverged(iterations, change.to_f64())),
            TerminationReason::MaxIterations => Err(SolverError::max_iterations_reached(
                criterion.max_iterations.unwrap_or(iterations),
                change.to_f64(),
                threshold.to_f64(),
            )),
            TerminationReason::Converged => Ok(Completion::new(
                estimate, iterations, change, duration, reason,
            )),
        }
    }
}

/// Sum of absolute elementwise differences between two equally-shaped
/// matrices.
fn total_absolute_change<T: Scalar>(a: &DMatrix<T>, b: &DMatrix<T>) -> T {
    a.iter()
        .zip(b.iter())
        .fold(T::zero(), |acc, (x, y)| acc + Float::abs(*x - *y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = SvtConfig::new()
            .with_tau(3.5)
            .with_step_size(1.25)
            .with_legacy_termination(true)
            .with_log_period(0);
        assert_eq!(config.tau, 3.5);
        assert_eq!(config.beta, 1.25);
        assert!(config.legacy_termination);
        assert_eq!(config.log_period, 0);
    }

    #[test]
    fn test_criterion_defaults() {
        let criterion = StoppingCriterion::<f64>::new();
        assert_eq!(criterion.max_iterations, Some(1000));
        assert_eq!(criterion.entry_tolerance, 0.5);
        assert_eq!(criterion.divergence_limit, 1e13);

        let unbounded = StoppingCriterion::<f64>::new().with_unbounded_iterations();
        assert_eq!(unbounded.max_iterations, None);
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        assert!(Svt::new(SvtConfig::new().with_tau(-1.0)).is_err());
        assert!(Svt::new(SvtConfig::new().with_tau(f64::NAN)).is_err());
        assert!(Svt::new(SvtConfig::new().with_step_size(0.0)).is_err());
        assert!(Svt::new(SvtConfig::new().with_step_size(-2.0)).is_err());
        // tau = 0 disables shrinkage but is a valid configuration.
        assert!(Svt::new(SvtConfig::new().with_tau(0.0)).is_ok());
    }

    #[test]
    fn test_invalid_criterion_is_rejected() {
        let solver = Svt::new(SvtConfig::<f64>::new()).unwrap();
        let x = DMatrix::from_element(2, 2, 1.0);
        let mask = ObservationMask::full(2, 2);

        let bad_tol = StoppingCriterion::new().with_entry_tolerance(0.0);
        assert!(matches!(
            solver.complete(&x, &mask, &bad_tol),
            Err(SolverError::InvalidConfiguration { .. })
        ));

        let bad_limit = StoppingCriterion::new().with_divergence_limit(-1.0);
        assert!(matches!(
            solver.complete(&x, &mask, &bad_limit),
            Err(SolverError::InvalidConfiguration { .. })
        ));

        let bad_budget = StoppingCriterion::new().with_max_iterations(0);
        assert!(matches!(
            solver.complete(&x, &mask, &bad_budget),
            Err(SolverError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_shape_mismatch_is_rejected() {
        let solver = Svt::new(SvtConfig::<f64>::new()).unwrap();
        let x = DMatrix::from_element(2, 2, 1.0);
        let mask = ObservationMask::full(3, 2);
        let err = solver
            .complete(&x, &mask, &StoppingCriterion::new())
            .unwrap_err();
        assert!(matches!(
            err,
            SolverError::CompletionError(CompletionError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_completion_converged_flag() {
        let matrix = DMatrix::<f64>::zeros(2, 2);
        let done = Completion::new(
            matrix.clone(),
            3,
            0.1,
            Duration::from_millis(1),
            TerminationReason::Converged,
        );
        assert!(done.converged);

        let stuck = Completion::new(
            matrix,
            3,
            10.0,
            Duration::from_millis(1),
            TerminationReason::MaxIterations,
        );
        assert!(!stuck.converged);
    }

    #[test]
    fn test_total_absolute_change() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 3.0, 5.0]);
        assert_eq!(total_absolute_change(&a, &b), 4.0);
    }
}
