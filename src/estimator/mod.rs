//! estimator — acyclic causal structure estimation over tabular data.
//!
//! Purpose
//! -------
//! Provide the user-facing layer of the crate: given an n×d observation
//! matrix, fit a d×d weighted adjacency whose non-zero pattern is acyclic
//! within tolerance, and optionally threshold it into a binary causal mask.
//! The heavy lifting (penalized objectives, the augmented-Lagrangian loop,
//! matrix exponentials) lives in the [`crate::optimization`] and
//! [`crate::numerics`] layers; this module owns validation, configuration,
//! the model choice, and the convergence contract.
//!
//! Key behaviors
//! -------------
//! - [`api::estimate`] / [`api::estimate_with_observer`] /
//!   [`api::extract_causal_mask`]: the three public entry points.
//! - [`core::config::EstimatorConfig`]: every knob of a call, validated up
//!   front; [`core::data::DesignMatrix`]: the input contract.
//! - [`models`]: the linear SEM and the per-variable MLP, both implementing
//!   the optimizer's penalized-objective trait.
//! - All failures surface as [`errors::EstimatorError`]; optimizer internals
//!   are wrapped, never exposed raw.
//!
//! Testing notes
//! -------------
//! - Unit tests per submodule cover validation, packing/masking, analytic
//!   gradients against finite differences, and the precision/threshold
//!   policies.
//! - Integration tests fit synthetic structural-equation data end to end and
//!   assert edge recovery, determinism, and the error contract.

pub mod api;
pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{estimate, estimate_with_observer, extract_causal_mask};
pub use self::core::config::{EstimatorConfig, Mode, Precision};
pub use self::core::data::DesignMatrix;
pub use self::errors::{EstimatorError, EstimatorResult};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_notears::estimator::prelude::*;
//
// to import the main estimation surface in a single line.

pub mod prelude {
    pub use super::api::{estimate, estimate_with_observer, extract_causal_mask};
    pub use super::core::config::{EstimatorConfig, Mode, Precision};
    pub use super::errors::{EstimatorError, EstimatorResult};
    pub use crate::optimization::aug_lagrangian::{OuterObserver, OuterProgress};
}
