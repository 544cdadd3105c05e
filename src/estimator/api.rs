//! Public entry points for acyclic structure estimation.
//!
//! Purpose
//! -------
//! Tie the layers together: validate the configuration and the data, build
//! the configured structural model, run the augmented-Lagrangian loop, and
//! map the solution back to a weighted adjacency (or a thresholded causal
//! mask). This is the only module that decides whether a still-cyclic result
//! is an error.
//!
//! Key behaviors
//! -------------
//! - [`estimate`] returns the fitted d×d weighted adjacency `W` with
//!   `h(W) < config.h_tol`; a residual penalty at or above tolerance is a
//!   [`EstimatorError::NotConverged`].
//! - [`estimate_with_observer`] is the same entry point with a structured
//!   progress callback invoked once per outer iteration.
//! - [`extract_causal_mask`] binarizes the fit: `1` iff
//!   `|W_ij| > config.mask_threshold`.
//! - `Precision::Single` rounds each fitted weight through `f32` at the
//!   output boundary; the optimization itself always runs in `f64`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All validation happens before the first inner solve; no partial results
//!   escape on error.
//! - The diagonal of the returned `W` is identically zero in both modes.
use crate::{
    estimator::{
        core::{
            config::{EstimatorConfig, Mode, Precision},
            data::DesignMatrix,
            graph,
        },
        errors::{EstimatorError, EstimatorResult},
        models::{linear::LinearSem, mlp::StructureMlp},
    },
    optimization::aug_lagrangian::{
        minimize_constrained, ConstrainedOutcome, OuterObserver, PenalizedObjective,
    },
};
use ndarray::Array2;

/// Estimate the weighted adjacency of an acyclic causal structure.
///
/// # Behavior
/// Validates `config` and `data`, fits the configured model under the
/// acyclicity constraint, and returns the d×d weight matrix.
///
/// # Errors
/// - Data contract violations ([`EstimatorError::EmptyData`],
///   [`EstimatorError::TooFewVariables`], [`EstimatorError::NonFiniteValue`]).
/// - Configuration violations (see [`EstimatorConfig::validate`]).
/// - [`EstimatorError::NotConverged`] when the acyclicity penalty stays at or
///   above `config.h_tol` after the outer budget.
/// - Wrapped optimizer failures ([`EstimatorError::Optimization`]).
pub fn estimate(
    data: &Array2<f64>, config: &EstimatorConfig,
) -> EstimatorResult<Array2<f64>> {
    estimate_with_observer(data, config, None)
}

/// Same as [`estimate`], reporting one structured progress record per outer
/// iteration to `observer` when present.
pub fn estimate_with_observer(
    data: &Array2<f64>, config: &EstimatorConfig,
    observer: Option<&mut dyn OuterObserver>,
) -> EstimatorResult<Array2<f64>> {
    config.validate()?;
    let outer = config.outer_options()?;
    let design = DesignMatrix::new(data)?;

    let (outcome, w) = match config.mode {
        Mode::Linear => {
            let model = LinearSem::new(&design, config.lambda1);
            let outcome = minimize_constrained(&model, &outer, &config.solver, observer)?;
            let w = model.weights(&outcome.theta_hat);
            (outcome, w)
        }
        Mode::Nonlinear => {
            let model = StructureMlp::new(
                &design,
                config.effective_hidden_width(),
                config.lambda1,
                config.lambda2,
                config.seed,
            );
            let outcome = minimize_constrained(&model, &outer, &config.solver, observer)?;
            let w = model.weights(&outcome.theta_hat);
            (outcome, w)
        }
    };

    check_converged(&outcome, outer.h_tol)?;
    Ok(apply_precision(w, config.precision))
}

/// Estimate and binarize: `mask_ij = 1` iff `|W_ij| > config.mask_threshold`.
pub fn extract_causal_mask(
    data: &Array2<f64>, config: &EstimatorConfig,
) -> EstimatorResult<Array2<u8>> {
    let w = estimate(data, config)?;
    Ok(graph::causal_mask(&w, config.mask_threshold))
}

fn check_converged(outcome: &ConstrainedOutcome, h_tol: f64) -> EstimatorResult<()> {
    if outcome.penalty >= h_tol {
        return Err(EstimatorError::NotConverged {
            penalty: outcome.penalty,
            tol: h_tol,
            outer_iterations: outcome.outer_iterations,
        });
    }
    Ok(())
}

fn apply_precision(w: Array2<f64>, precision: Precision) -> Array2<f64> {
    match precision {
        Precision::Double => w,
        Precision::Single => w.mapv(|v| v as f32 as f64),
    }
}
