//! optimization — constrained solver stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for acyclic structure learning,
//! combining an Argmin-backed augmented-Lagrangian scheme with a single
//! error/result surface. Structural models implement a penalized objective,
//! choose tolerances, and obtain constrained parameter estimates and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **constrained minimization** of penalized
//!   objectives (`aug_lagrangian`), including configuration of inner
//!   solvers, stopping criteria, and the outer dual-ascent schedule.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Parameters and gradients are represented using `ndarray`-based aliases
//!   (`Theta`, `Grad`); any mapping between flattened optimizer parameters
//!   and structured model weights is handled by the model layer.
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module avoids I/O; progress flows through the structured outer
//!   observer, and inner-solver logging sits behind the `obs_slog` feature.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns: solver wiring,
//!   tolerance handling, adapter sign/fallback behavior, validation, and
//!   the outer loop on toy constrained problems.
//! - Higher-level integration tests exercise end-to-end structure recovery
//!   through the estimator facade.

pub mod aug_lagrangian;
pub mod errors;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_notears::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::aug_lagrangian::prelude::*;
    pub use super::errors::{OptError, OptResult};
}
