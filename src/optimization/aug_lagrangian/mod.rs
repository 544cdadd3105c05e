//! aug_lagrangian — argmin-powered constrained minimization for acyclic
//! structure learning.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for minimizing a
//! penalized reconstruction objective subject to an acyclicity constraint
//! `h(θ) = 0`. Structural models implement a single trait,
//! [`PenalizedObjective`], and invoke [`minimize_constrained`] to run the
//! augmented-Lagrangian scheme with L-BFGS inner solves, configurable line
//! search, tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Bridge objectives at fixed `(α, ρ)` into Argmin-compatible problems via
//!   [`adapter::AugLagProblem`].
//! - Expose a single entrypoint [`minimize_constrained`] that:
//!   - validates the initial guess with [`PenalizedObjective::check`],
//!   - selects an L-BFGS solver via [`builders`] based on
//!     [`traits::LineSearcher`],
//!   - executes warm-started inner solves via [`run::run_lbfgs`],
//!   - performs dual ascent on α and conditional growth on ρ, and
//!   - normalizes results into a [`ConstrainedOutcome`].
//! - Report structured per-outer-iteration progress through
//!   [`observer::OuterObserver`].
//! - Centralize optimizer configuration ([`Tolerances`], [`SolverOptions`],
//!   [`OuterOptions`]) and validation logic ([`validation`]) so downstream
//!   code can assume sane, finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is a *cost* minimized directly; there is no
//!   maximize/minimize sign convention to manage.
//! - [`PenalizedObjective::value`] and [`PenalizedObjective::grad`] must
//!   treat invalid inputs as recoverable [`OptError`] values, not panics.
//! - Vectors use the canonical aliases [`Theta`] and [`Grad`]; all are
//!   assumed finite whenever optimization proceeds.
//! - Whether a still-cyclic result is an error is decided by the estimator
//!   facade, not here; this layer only reports the final penalty.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover the adapter's forwarding and FD
//!   fallback, solver construction and tolerance wiring, validation
//!   helpers, and the outer loop on a toy constrained problem.
//! - Integration tests exercise [`minimize_constrained`] through the
//!   estimator on synthetic structural models.

pub mod adapter;
pub mod builders;
pub mod observer;
pub mod outer;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::observer::{OuterObserver, OuterProgress, RecordingObserver};
pub use self::outer::{minimize_constrained, OuterOptions};
pub use self::traits::{
    ConstrainedOutcome, InnerOutcome, LineSearcher, PenalizedObjective, SolverOptions, Tolerances,
};
pub use self::types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_LBFGS_MEM};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_notears::optimization::aug_lagrangian::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::observer::{OuterObserver, OuterProgress};
    pub use super::outer::{minimize_constrained, OuterOptions};
    pub use super::traits::{
        ConstrainedOutcome, InnerOutcome, LineSearcher, PenalizedObjective, SolverOptions,
        Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
