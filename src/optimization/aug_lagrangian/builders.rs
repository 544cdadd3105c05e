//! aug_lagrangian::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the L-BFGS solvers used by the inner
//! loop of the constrained optimizer. These helpers hide Argmin's generic
//! wiring and apply crate-level options (tolerances, memory size) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set an initial parameter vector (`theta0`) or
//!   `max_iters`; these are treated as runtime concerns and are applied by
//!   the runner (`run_lbfgs`).
//! - Errors are always reported via [`OptResult`]; the underlying
//!   `argmin::core::Error` values never leak across module boundaries.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    aug_lagrangian::{
        traits::SolverOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
    errors::OptResult,
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// wires `opts.tols.tol_grad` / `opts.tols.tol_cost` into the solver.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_optimizer_hager_zhang(opts: &SolverOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// wires `opts.tols.tol_grad` / `opts.tols.tol_cost` into the solver.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
/// tolerance setting.
pub fn build_optimizer_more_thuente(opts: &SolverOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type so both builders share one wiring
/// function. When a tolerance is `None`, the corresponding
/// `with_tolerance_*` method is not called and Argmin's defaults remain in
/// effect.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when `with_tolerance_grad`
/// or `with_tolerance_cost` rejects a tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &SolverOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::aug_lagrangian::traits::{LineSearcher, SolverOptions, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of L-BFGS solvers with Hager–Zhang and
    //   More–Thuente line searches.
    // - Propagation of `lbfgs_mem` (Some vs None) into the builder paths.
    // - Application of gradient and cost tolerances via `configure_lbfgs`.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior (`run_lbfgs`), which is tested in the
    //   runner layer and through the outer loop.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure that `build_optimizer_hager_zhang` succeeds and uses the crate
    // default L-BFGS memory when `opts.lbfgs_mem` is `None`.
    fn build_optimizer_hager_zhang_uses_default_memory_when_none() {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = SolverOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("SolverOptions should be valid");

        let solver = build_optimizer_hager_zhang(&opts);

        assert!(
            solver.is_ok(),
            "Builder should succeed when lbfgs_mem is None and tolerances are valid"
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that `build_optimizer_more_thuente` accepts an explicit L-BFGS
    // memory value and still constructs a solver.
    fn build_optimizer_more_thuente_respects_explicit_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(30)).expect("Tolerances should be valid");
        let opts = SolverOptions::new(tols, LineSearcher::MoreThuente, false, Some(9))
            .expect("SolverOptions should be valid");

        let solver = build_optimizer_more_thuente(&opts);

        assert!(solver.is_ok(), "Builder should succeed when lbfgs_mem is explicitly provided");
    }

    #[test]
    // Purpose
    // -------
    // Confirm that `configure_lbfgs` applies tolerances without error when
    // both `tol_grad` and `tol_cost` are present and valid, and also when
    // both are absent.
    fn configure_lbfgs_handles_present_and_absent_tolerances() {
        let raw = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(100)).expect("Tolerances should be valid");
        let opts = SolverOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("SolverOptions should be valid");
        assert!(configure_lbfgs(raw, &opts).is_ok());

        let raw = LBFGS::new(HagerZhangLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = SolverOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("SolverOptions should be valid");
        assert!(configure_lbfgs(raw, &opts).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // A zero L-BFGS memory is rejected at option-construction time.
    fn solver_options_reject_zero_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).expect("Tolerances should be valid");
        let opts = SolverOptions::new(tols, LineSearcher::MoreThuente, false, Some(0));
        assert!(opts.is_err());
    }
}
