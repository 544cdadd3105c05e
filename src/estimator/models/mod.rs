//! Structural models implementing the penalized objective.
//!
//! Both models expose the same surface to the constrained optimizer — a
//! flattened parameter vector, an augmented cost with analytic gradient, the
//! acyclicity penalty, and a mapping back to a d×d weighted adjacency — and
//! differ only in how a variable is predicted from the others:
//!
//! - [`linear::LinearSem`]: `X ≈ XW` with ℓ1 sparsity on the off-diagonal
//!   weights.
//! - [`mlp::StructureMlp`]: one hidden sigmoid layer per output variable
//!   with ℓ2 weight decay, constrained through the effective adjacency
//!   aggregated from first-layer weights.

pub mod linear;
pub mod mlp;
