//! Public API surface for augmented-Lagrangian constrained minimization.
//!
//! - [`PenalizedObjective`]: trait structural models implement.
//! - [`SolverOptions`] and [`Tolerances`]: configuration for the inner
//!   L-BFGS solver.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`InnerOutcome`]: normalized result of one inner solve.
//! - [`ConstrainedOutcome`]: result of the full outer loop.
//!
//! Convention: the objective is a *cost* to minimize directly (reconstruction
//! loss plus regularizers plus constraint terms); there is no sign flip
//! anywhere in this stack. Analytic gradients, when provided, are gradients
//! of that cost.
use crate::optimization::{
    aug_lagrangian::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
    errors::{OptError, OptResult},
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Smooth penalized objective with an acyclicity constraint.
///
/// Implementors expose the augmented objective
/// `c(θ; α, ρ) = loss(θ) + regularizers(θ) + α·h(θ) + (ρ/2)·h(θ)²`
/// where `h` is the acyclicity penalty over the (effective) weighted
/// adjacency implied by `θ`. The outer loop owns `α` and `ρ`; the objective
/// only evaluates at the values handed to it.
///
/// Required:
/// - `dim()`: length of the flattened parameter vector.
/// - `init_theta()`: starting point for the first inner solve.
/// - `value(θ, α, ρ)`: evaluate the augmented cost.
/// - `penalty(θ)`: evaluate `h(θ)` alone (used for dual updates and
///   convergence checks).
/// - `check(θ)`: validation hook rejecting obviously invalid `θ`. Called
///   once before the first inner solve.
/// - `weights(θ)`: map `θ` to the d×d weighted adjacency the caller wants.
///
/// Optional:
/// - `grad(θ, α, ρ)`: analytic gradient of the augmented cost. If not
///   implemented, robust finite differences are used automatically.
pub trait PenalizedObjective {
    fn dim(&self) -> usize;
    fn init_theta(&self) -> Theta;
    fn value(&self, theta: &Theta, alpha: f64, rho: f64) -> OptResult<Cost>;
    fn penalty(&self, theta: &Theta) -> OptResult<f64>;
    fn check(&self, theta: &Theta) -> OptResult<()>;
    fn weights(&self, theta: &Theta) -> ndarray::Array2<f64>;

    fn grad(&self, _theta: &Theta, _alpha: f64, _rho: f64) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing: implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Inner-solver configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and the inner iteration cap.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the
///   `obs_slog` feature) to the inner solves.
/// - `lbfgs_mem`: L-BFGS history size; `None` uses the default of 7.
///
/// Default: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 500`,
/// More–Thuente line search, quiet, default memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl SolverOptions {
    /// Create a new set of inner-solver options.
    ///
    /// Validation of numeric fields is performed inside [`Tolerances::new`];
    /// this constructor only rejects a zero L-BFGS memory.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::new(Some(1e-6), None, Some(500)).unwrap(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the inner solver.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of inner iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxInnerIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxInnerIter {
                    max_iter,
                    reason: "Maximum inner iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Normalized result of one inner L-BFGS solve.
///
/// - `theta_hat`: best parameter vector found.
/// - `cost`: best augmented objective value at `theta_hat`.
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of inner iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct InnerOutcome {
    pub theta_hat: Theta,
    pub cost: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl InnerOutcome {
    /// Build a validated [`InnerOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `cost` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `cost`.
    pub fn new(
        theta_hat_opt: Option<Theta>, cost: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(cost)?;
        let status: String;
        let converged = match termination {
            TerminationStatus::NotTerminated => {
                status = "Not terminated".to_string();
                false
            }
            _ => {
                status = format!("{termination:?}");
                true
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, cost, converged, status, iterations, fn_evals, grad_norm })
    }
}

/// Result of the full augmented-Lagrangian outer loop.
///
/// - `theta_hat`: final parameter vector, already acyclic within tolerance.
/// - `penalty`: acyclicity penalty `h(θ̂)` at termination.
/// - `alpha` / `rho`: final dual variable and penalty weight.
/// - `outer_iterations`: number of outer iterations performed.
/// - `inner`: outcome of the last inner solve, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstrainedOutcome {
    pub theta_hat: Theta,
    pub penalty: f64,
    pub alpha: f64,
    pub rho: f64,
    pub outer_iterations: usize,
    pub inner: InnerOutcome,
}
