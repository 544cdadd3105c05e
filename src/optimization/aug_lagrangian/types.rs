//! aug_lagrangian::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! constrained optimizer. By defining these in one place, the rest of the
//! optimization code can stay agnostic to `ndarray` and Argmin generics and
//! can more easily evolve if the backend changes.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are treated conceptually as column vectors with
//!   length equal to the number of free parameters of the structural model
//!   (flattened weight matrices and biases).
//! - `Cost` is the scalar augmented objective (loss + regularizers +
//!   constraint terms); the optimizer always *minimizes* it directly.
//! - The line-search aliases assume Argmin's three-parameter forms
//!   `(Param, Gradient, Float)` as of the pinned Argmin version.

use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` for the penalized objective.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Theta = Array1<f64>;

/// Gradient vector `∇c(θ)` matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective value used by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Default initial value of the quadratic penalty weight ρ.
pub const DEFAULT_RHO_INIT: f64 = 1.0;

/// Default multiplicative growth applied to ρ when the acyclicity penalty
/// stalls between outer iterations.
pub const DEFAULT_RHO_GROWTH: f64 = 10.0;

/// Default hard cap on ρ; exceeding it while `h > h_tol` counts as a
/// convergence failure.
pub const DEFAULT_RHO_MAX: f64 = 1e16;

/// Default acyclicity tolerance for the outer loop.
pub const DEFAULT_H_TOL: f64 = 1e-8;

/// ρ grows only when the new penalty exceeds this fraction of the previous
/// outer iteration's penalty (the classic 1/4 sufficient-decrease rule).
pub const H_SHRINK_FACTOR: f64 = 0.25;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
