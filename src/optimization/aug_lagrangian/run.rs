//! Execution helper that runs an `argmin` solver on one inner subproblem and
//! returns a crate-friendly [`InnerOutcome`].
use crate::optimization::{
    aug_lagrangian::{
        adapter::AugLagProblem, InnerOutcome, PenalizedObjective, SolverOptions, Theta,
    },
    errors::OptResult,
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

use super::types::Grad;

/// Run an `argmin` optimization for one inner subproblem at fixed `(α, ρ)`.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the structural model via [`AugLagProblem`],
/// - the chosen `Solver` (L-BFGS with Hager–Zhang or More–Thuente),
/// - initial parameter `theta0` (the warm start from the previous outer
///   iteration),
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters`,
///   then executes the solver and converts the result into [`InnerOutcome`].
///
/// # Arguments
/// - `theta0`: Initial parameter vector. It is **consumed** and set on the
///   optimizer state via `state.param(theta0)`.
/// - `opts`: Inner-solver options (tolerances, verbosity, max iters, etc.).
/// - `problem`: An [`AugLagProblem`] wrapping the model at the current
///   multipliers.
/// - `solver`: A fully constructed solver (e.g. from
///   [`build_optimizer_hager_zhang`](crate::optimization::aug_lagrangian::builders::build_optimizer_hager_zhang)).
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a
/// terminal slog observer is attached with `ObserverMode::Always` and a
/// one-time pre-iteration line logs c(θ₀) and, if available, ||grad|| before
/// the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error (observer failures, solver errors,
///   line-search failures, etc.) via the crate's `From<argmin::core::Error>`
///   conversion.
/// - Propagates any validation errors encountered when constructing
///   [`InnerOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &SolverOptions, problem: AugLagProblem<'a, F>, solver: S,
) -> OptResult<InnerOutcome>
where
    F: PenalizedObjective,
    S: argmin::core::Solver<
            AugLagProblem<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    InnerOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &AugLagProblem<'_, F>) -> OptResult<()>
where
    F: PenalizedObjective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: c(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
