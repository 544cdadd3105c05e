//! The augmented-Lagrangian outer loop (dual ascent on α, growth on ρ).
//!
//! Purpose
//! -------
//! Drive a [`PenalizedObjective`] toward the acyclic feasible set by
//! repeatedly solving the penalized subproblem at fixed `(α, ρ)` with
//! L-BFGS, then updating the dual variable and, when the penalty stalls,
//! the quadratic penalty weight.
//!
//! Key behaviors
//! -------------
//! - Per outer iteration:
//!   (a) inner solve of `c(θ; α, ρ)` warm-started from the previous θ̂;
//!   (b) dual update `α ← α + ρ·h(θ̂)`;
//!   (c) `ρ ← min(ρ·growth, ρ_max)` iff `h` failed to shrink below a fixed
//!   fraction ([`H_SHRINK_FACTOR`]) of the previous outer iteration's value.
//! - Stop as soon as `h < h_tol`, or when the outer budget or `ρ_max` is
//!   exhausted. This layer does **not** decide whether a still-cyclic result
//!   is an error; it reports the final penalty in [`ConstrainedOutcome`] and
//!   leaves the convergence contract to the estimator facade.
//! - Invokes an optional [`OuterObserver`] once per outer iteration with the
//!   current loss, penalty, α, and ρ.
//!
//! Invariants & assumptions
//! ------------------------
//! - `h(θ) ≥ 0` up to numerical noise for every θ the models produce.
//! - ρ never decreases; α is only updated by dual ascent. Each inner solve
//!   starts from the previous solution, so the sequence of costs is
//!   well-behaved even as ρ grows.
use crate::optimization::{
    aug_lagrangian::{
        adapter::AugLagProblem,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        observer::{OuterObserver, OuterProgress},
        run::run_lbfgs,
        traits::{ConstrainedOutcome, InnerOutcome, LineSearcher, PenalizedObjective, SolverOptions},
        types::{
            Theta, DEFAULT_H_TOL, DEFAULT_RHO_GROWTH, DEFAULT_RHO_INIT, DEFAULT_RHO_MAX,
            H_SHRINK_FACTOR,
        },
        validation::validate_penalty,
    },
    errors::{OptError, OptResult},
};

/// Outer-loop configuration: acyclicity tolerance, penalty schedule, and the
/// outer iteration budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterOptions {
    pub max_outer_iter: usize,
    pub h_tol: f64,
    pub rho_init: f64,
    pub rho_growth: f64,
    pub rho_max: f64,
}

impl OuterOptions {
    /// Construct validated outer-loop options.
    ///
    /// # Rules
    /// - `max_outer_iter > 0`.
    /// - `h_tol` finite and strictly positive.
    /// - `rho_growth` finite and strictly greater than one.
    /// - `0 < rho_init ≤ rho_max`, both finite (`rho_max` may be very large).
    ///
    /// # Errors
    /// The corresponding `OptError` variant for the first violated rule.
    pub fn new(
        max_outer_iter: usize, h_tol: f64, rho_init: f64, rho_growth: f64, rho_max: f64,
    ) -> OptResult<Self> {
        if max_outer_iter == 0 {
            return Err(OptError::InvalidMaxOuterIter {
                max_iter: max_outer_iter,
                reason: "Maximum outer iterations must be greater than zero.",
            });
        }
        if !h_tol.is_finite() || h_tol <= 0.0 {
            return Err(OptError::InvalidHTolerance {
                tol: h_tol,
                reason: "Acyclicity tolerance must be finite and positive.",
            });
        }
        if !rho_growth.is_finite() || rho_growth <= 1.0 {
            return Err(OptError::InvalidRhoGrowth {
                value: rho_growth,
                reason: "Penalty growth factor must be finite and greater than one.",
            });
        }
        if !rho_init.is_finite() || rho_init <= 0.0 || rho_max < rho_init || rho_max.is_nan() {
            return Err(OptError::InvalidRhoBounds {
                rho_init,
                rho_max,
                reason: "Penalty bounds must satisfy 0 < rho_init <= rho_max.",
            });
        }
        Ok(Self { max_outer_iter, h_tol, rho_init, rho_growth, rho_max })
    }
}

impl Default for OuterOptions {
    fn default() -> Self {
        Self {
            max_outer_iter: 100,
            h_tol: DEFAULT_H_TOL,
            rho_init: DEFAULT_RHO_INIT,
            rho_growth: DEFAULT_RHO_GROWTH,
            rho_max: DEFAULT_RHO_MAX,
        }
    }
}

/// Minimize a [`PenalizedObjective`] subject to `h(θ) = 0` via the
/// augmented-Lagrangian scheme.
///
/// # Behavior
/// - Validates the initial guess via `objective.check(init_theta())`.
/// - Runs up to `outer.max_outer_iter` dual-ascent iterations, each with one
///   warm-started inner L-BFGS solve configured by `solver`.
/// - Reports one [`OuterProgress`] per outer iteration to `observer` when
///   present; the reported `loss` is the augmented cost at `α = ρ = 0`.
/// - Returns a [`ConstrainedOutcome`] carrying the final θ̂, the final
///   penalty `h(θ̂)`, the final multipliers, the number of outer iterations,
///   and the last inner solve's diagnostics.
///
/// # Convergence
/// The loop exits early once `h < outer.h_tol`. Hitting the outer budget or
/// `rho_max` with `h` still above tolerance is *not* an error here — callers
/// own that contract and inspect [`ConstrainedOutcome::penalty`].
///
/// # Errors
/// - Propagates any error from `objective.check`, the inner solver, or
///   penalty evaluation.
pub fn minimize_constrained<F: PenalizedObjective>(
    objective: &F, outer: &OuterOptions, solver: &SolverOptions,
    mut observer: Option<&mut dyn OuterObserver>,
) -> OptResult<ConstrainedOutcome> {
    let mut theta = objective.init_theta();
    objective.check(&theta)?;

    let mut alpha = 0.0_f64;
    let mut rho = outer.rho_init;
    let mut h = f64::INFINITY;
    let mut last_inner: Option<InnerOutcome> = None;
    let mut performed = 0;

    for outer_iter in 0..outer.max_outer_iter {
        let inner = solve_inner(objective, theta, alpha, rho, solver)?;
        theta = inner.theta_hat.clone();
        let h_new = objective.penalty(&theta)?;
        validate_penalty(h_new)?;
        performed = outer_iter + 1;

        if let Some(ref mut obs) = observer {
            let loss = objective.value(&theta, 0.0, 0.0)?;
            obs.observe(&OuterProgress {
                outer_iter,
                loss,
                penalty: h_new,
                alpha,
                rho,
                inner_iterations: inner.iterations,
            });
        }

        alpha += rho * h_new;
        let stalled = h_new > H_SHRINK_FACTOR * h;
        h = h_new;
        last_inner = Some(inner);

        if h < outer.h_tol {
            break;
        }
        if rho >= outer.rho_max {
            break;
        }
        if stalled {
            rho = (rho * outer.rho_growth).min(outer.rho_max);
        }
    }

    let inner = last_inner.ok_or(OptError::MissingThetaHat)?;
    Ok(ConstrainedOutcome {
        theta_hat: theta,
        penalty: h,
        alpha,
        rho,
        outer_iterations: performed,
        inner,
    })
}

/// Relax the inner gradient tolerance as ρ grows.
///
/// Near the constraint the augmented gradient carries a term of order
/// `ρ·h·∇h`, so a fixed absolute `tol_grad` becomes unreachable at large ρ
/// and the inner solver just burns its iteration cap. Scaling the tolerance
/// by `√ρ` keeps the stopping accuracy constant relative to the gradient's
/// magnitude. The outer `h < h_tol` check is evaluated on the exact penalty,
/// so the feasibility contract is unaffected.
fn scaled_for_rho(opts: &SolverOptions, rho: f64) -> SolverOptions {
    let mut scaled = opts.clone();
    if rho > 1.0 {
        if let Some(tol) = scaled.tols.tol_grad {
            scaled.tols.tol_grad = Some(tol * rho.sqrt());
        }
    }
    scaled
}

/// Run one inner L-BFGS solve at fixed `(α, ρ)` with the configured line
/// search, consuming `theta0` as the warm start.
fn solve_inner<F: PenalizedObjective>(
    objective: &F, theta0: Theta, alpha: f64, rho: f64, opts: &SolverOptions,
) -> OptResult<InnerOutcome> {
    let opts = &scaled_for_rho(opts, rho);
    let problem = AugLagProblem::new(objective, alpha, rho);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}
