//! rust_notears — score-based acyclic causal structure learning with Python
//! bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes causal structure estimation to Python via the `_rust_notears`
//! extension module. Given an n×d observation matrix, the crate fits a d×d
//! weighted adjacency whose directed graph is acyclic within tolerance and
//! optionally thresholds it into a binary causal mask.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`estimator`, `numerics`,
//!   `optimization`) as the public crate surface.
//! - Define the `#[pyfunction]` wrappers and the `#[pymodule]` initializer
//!   for the `_rust_notears` Python extension when the `python-bindings`
//!   feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, keyword-argument parsing, and error
//!   mapping.
//! - The Python-visible functions mirror the signatures and error contract
//!   of [`estimator::api`]: input and configuration problems raise
//!   `ValueError`, convergence and solver failures raise `RuntimeError`.
//!
//! Conventions
//! -----------
//! - Python callers pass a 2-D float64 array (samples × variables) and plain
//!   keyword arguments that map one-to-one onto
//!   [`estimator::EstimatorConfig`]; enums (`mode`, `precision`,
//!   `line_searcher`) are case-insensitive strings.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on [`estimator::api`] and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by integration tests fitting synthetic structural-equation data.

pub mod estimator;
pub mod numerics;
pub mod optimization;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

#[cfg(feature = "python-bindings")]
use crate::{
    estimator::{
        api,
        core::config::{EstimatorConfig, Mode, Precision},
    },
    optimization::aug_lagrangian::{LineSearcher, SolverOptions, Tolerances},
};

/// Assemble an [`EstimatorConfig`] from Python keyword arguments.
///
/// String enums are parsed case-insensitively; numeric range checks are left
/// to [`EstimatorConfig::validate`] so Rust and Python callers get identical
/// diagnostics.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
fn build_config(
    mode: &str, lambda1: f64, lambda2: f64, hidden_width: Option<usize>, categorical: bool,
    max_outer_iter: usize, h_tol: f64, rho_growth: f64, rho_max: f64, mask_threshold: f64,
    precision: &str, seed: u64, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_inner_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<EstimatorConfig> {
    let mode = match mode.to_lowercase().as_str() {
        "linear" => Mode::Linear,
        "nonlinear" => Mode::Nonlinear,
        other => {
            return Err(PyValueError::new_err(format!(
                "mode must be 'linear' or 'nonlinear', got '{other}'"
            )))
        }
    };
    let precision = match precision.to_lowercase().as_str() {
        "double" => Precision::Double,
        "single" => Precision::Single,
        other => {
            return Err(PyValueError::new_err(format!(
                "precision must be 'double' or 'single', got '{other}'"
            )))
        }
    };

    let defaults = SolverOptions::default();
    let searcher = match line_searcher {
        Some(name) => {
            name.parse::<LineSearcher>().map_err(|e| PyValueError::new_err(e.to_string()))?
        }
        None => defaults.line_searcher,
    };
    let tols = Tolerances::new(
        tol_grad.or(defaults.tols.tol_grad),
        tol_cost.or(defaults.tols.tol_cost),
        max_inner_iter.or(defaults.tols.max_iter),
    )
    .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let solver = SolverOptions::new(tols, searcher, false, lbfgs_mem)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    Ok(EstimatorConfig {
        mode,
        lambda1,
        lambda2,
        hidden_width,
        categorical,
        max_outer_iter,
        h_tol,
        rho_growth,
        rho_max,
        mask_threshold,
        precision,
        seed,
        solver,
    })
}

/// Fit the weighted adjacency of an acyclic causal structure.
///
/// Returns a d×d float64 array `W` with `h(W) < h_tol`; see
/// [`api::estimate`] for the full contract.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(
    signature = (
        data,
        mode = "linear",
        lambda1 = 0.01,
        lambda2 = 0.01,
        hidden_width = None,
        categorical = false,
        max_outer_iter = 100,
        h_tol = 1e-8,
        rho_growth = 10.0,
        rho_max = 1e16,
        mask_threshold = 0.3,
        precision = "double",
        seed = 0,
        tol_grad = None,
        tol_cost = None,
        max_inner_iter = None,
        line_searcher = None,
        lbfgs_mem = None,
    ),
    text_signature = "(data, /, mode='linear', lambda1=0.01, lambda2=0.01, hidden_width=None, \
                      categorical=False, max_outer_iter=100, h_tol=1e-8, rho_growth=10.0, \
                      rho_max=1e16, mask_threshold=0.3, precision='double', seed=0, \
                      tol_grad=None, tol_cost=None, max_inner_iter=None, line_searcher=None, \
                      lbfgs_mem=None)"
)]
fn estimate<'py>(
    py: Python<'py>, data: PyReadonlyArray2<'py, f64>, mode: &str, lambda1: f64, lambda2: f64,
    hidden_width: Option<usize>, categorical: bool, max_outer_iter: usize, h_tol: f64,
    rho_growth: f64, rho_max: f64, mask_threshold: f64, precision: &str, seed: u64,
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_inner_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let config = build_config(
        mode,
        lambda1,
        lambda2,
        hidden_width,
        categorical,
        max_outer_iter,
        h_tol,
        rho_growth,
        rho_max,
        mask_threshold,
        precision,
        seed,
        tol_grad,
        tol_cost,
        max_inner_iter,
        line_searcher,
        lbfgs_mem,
    )?;
    let x = data.as_array().to_owned();
    let w = api::estimate(&x, &config)?;
    Ok(w.into_pyarray(py))
}

/// Fit and binarize: `mask[i, j] = 1` iff `|W[i, j]| > mask_threshold`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[allow(clippy::too_many_arguments)]
#[pyo3(
    signature = (
        data,
        mode = "linear",
        lambda1 = 0.01,
        lambda2 = 0.01,
        hidden_width = None,
        categorical = false,
        max_outer_iter = 100,
        h_tol = 1e-8,
        rho_growth = 10.0,
        rho_max = 1e16,
        mask_threshold = 0.3,
        precision = "double",
        seed = 0,
        tol_grad = None,
        tol_cost = None,
        max_inner_iter = None,
        line_searcher = None,
        lbfgs_mem = None,
    ),
    text_signature = "(data, /, mode='linear', lambda1=0.01, lambda2=0.01, hidden_width=None, \
                      categorical=False, max_outer_iter=100, h_tol=1e-8, rho_growth=10.0, \
                      rho_max=1e16, mask_threshold=0.3, precision='double', seed=0, \
                      tol_grad=None, tol_cost=None, max_inner_iter=None, line_searcher=None, \
                      lbfgs_mem=None)"
)]
fn extract_causal_mask<'py>(
    py: Python<'py>, data: PyReadonlyArray2<'py, f64>, mode: &str, lambda1: f64, lambda2: f64,
    hidden_width: Option<usize>, categorical: bool, max_outer_iter: usize, h_tol: f64,
    rho_growth: f64, rho_max: f64, mask_threshold: f64, precision: &str, seed: u64,
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_inner_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<Bound<'py, PyArray2<u8>>> {
    let config = build_config(
        mode,
        lambda1,
        lambda2,
        hidden_width,
        categorical,
        max_outer_iter,
        h_tol,
        rho_growth,
        rho_max,
        mask_threshold,
        precision,
        seed,
        tol_grad,
        tol_cost,
        max_inner_iter,
        line_searcher,
        lbfgs_mem,
    )?;
    let x = data.as_array().to_owned();
    let mask = api::extract_causal_mask(&x, &config)?;
    Ok(mask.into_pyarray(py))
}

/// _rust_notears — PyO3 module initializer for the Python extension.
///
/// Registers the two estimation entry points; invoked automatically by
/// Python when the compiled extension is imported.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_notears<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(estimate, m)?)?;
    m.add_function(wrap_pyfunction!(extract_causal_mask, m)?)?;
    Ok(())
}
