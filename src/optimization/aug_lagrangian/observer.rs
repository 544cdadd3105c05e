//! Structured progress reporting for the outer augmented-Lagrangian loop.
//!
//! The estimator exposes an observer hook instead of printing to the
//! console: callers that want progress implement [`OuterObserver`] and
//! receive one [`OuterProgress`] record per outer iteration. Inner-solver
//! verbosity is separate and lives behind the `obs_slog` feature.

/// Snapshot of the outer loop after one dual-ascent iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct OuterProgress {
    /// Zero-based outer iteration index.
    pub outer_iter: usize,
    /// Unconstrained objective (reconstruction loss plus regularizers) at
    /// the current parameters, i.e. the augmented cost evaluated with
    /// `α = ρ = 0`.
    pub loss: f64,
    /// Acyclicity penalty `h` at the current parameters.
    pub penalty: f64,
    /// Dual variable α *before* this iteration's update.
    pub alpha: f64,
    /// Quadratic penalty weight ρ used for this iteration's inner solve.
    pub rho: f64,
    /// Number of inner L-BFGS iterations spent on this subproblem.
    pub inner_iterations: usize,
}

/// Callback invoked once per outer iteration.
///
/// Implementations must not fail; anything that can go wrong belongs in the
/// caller's own state, not in the optimization path.
pub trait OuterObserver {
    fn observe(&mut self, progress: &OuterProgress);
}

/// Observer that records every progress record, mainly for tests and
/// diagnostics.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub records: Vec<OuterProgress>,
}

impl OuterObserver for RecordingObserver {
    fn observe(&mut self, progress: &OuterProgress) {
        self.records.push(progress.clone());
    }
}
