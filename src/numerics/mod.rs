//! numerics — dense matrix exponential and the acyclicity penalty.
//!
//! Purpose
//! -------
//! Provide the numerical primitives the structure estimator relies on: a
//! dense matrix exponential and the smooth acyclicity penalty
//! `h(W) = tr(e^{W∘W}) − d` together with its gradient. These are kept in a
//! separate module so that both structural models (linear and MLP) and the
//! constrained optimizer can share one implementation.
//!
//! Key behaviors
//! -------------
//! - Compute `e^A` for dense square matrices via scaling-and-squaring with a
//!   truncated Taylor series (`expm`).
//! - Evaluate the acyclicity penalty `h` over a weighted adjacency matrix
//!   (`acyclicity`) and its gradient `∇h = (e^{W∘W})ᵀ ∘ 2W`
//!   (`acyclicity_grad`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are square `ndarray::Array2<f64>` matrices with finite entries;
//!   callers validate finiteness before reaching this layer.
//! - `h(W) ≥ 0` for all real `W`, with equality iff the directed graph of the
//!   non-zero entries of `W` has no directed cycle.
//!
//! Testing notes
//! -------------
//! - Unit tests compare `expm` against closed forms (zero, diagonal, and
//!   nilpotent matrices) and check the sign behavior of `h` on DAG versus
//!   cyclic weight matrices.

pub mod expm;

pub use self::expm::{acyclicity, acyclicity_grad, expm, penalty_over};
