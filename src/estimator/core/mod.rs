//! Core estimator building blocks: configuration, validated data, and mask
//! extraction.
//!
//! - [`config`]: the immutable per-call [`config::EstimatorConfig`] with
//!   model choice, regularization, penalty schedule, thresholding, precision,
//!   and inner-solver options.
//! - [`data`]: the validated [`data::DesignMatrix`] wrapper (finite entries,
//!   `n ≥ 1`, `d ≥ 2`) with its cached Gram matrix.
//! - [`graph`]: thresholding fitted weights into a binary causal mask.

pub mod config;
pub mod data;
pub mod graph;
