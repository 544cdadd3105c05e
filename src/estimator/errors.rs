//! Error surface of the structure estimator.
//!
//! Two kinds of failure reach callers: input/configuration problems detected
//! before any optimization starts, and a convergence failure when the
//! acyclicity penalty cannot be driven below tolerance within the outer
//! budget. Inner solver failures are wrapped, never exposed raw.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for estimator operations.
pub type EstimatorResult<T> = Result<T, EstimatorError>;

#[derive(Debug, Clone, PartialEq)]
pub enum EstimatorError {
    // ---- Input validation (raised before optimization starts) ----
    /// Data matrix contains a non-finite entry.
    NonFiniteValue {
        row: usize,
        col: usize,
        value: f64,
    },

    /// Structure learning needs at least two variables.
    TooFewVariables {
        found: usize,
    },

    /// Data matrix has no rows.
    EmptyData,

    // ---- Configuration validation ----
    /// Regularization coefficients must be finite and non-negative.
    InvalidLambda {
        name: &'static str,
        value: f64,
    },

    /// Hidden layer width must be at least one.
    InvalidHiddenWidth {
        width: usize,
    },

    /// Mask threshold must be finite and strictly positive.
    InvalidMaskThreshold {
        value: f64,
    },

    // ---- Convergence ----
    /// Acyclicity penalty failed to reach tolerance within the outer budget.
    NotConverged {
        penalty: f64,
        tol: f64,
        outer_iterations: usize,
    },

    // ---- Inner machinery ----
    /// Wrapper for failures inside the constrained optimizer.
    Optimization(OptError),
}

impl std::error::Error for EstimatorError {}

impl std::fmt::Display for EstimatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimatorError::NonFiniteValue { row, col, value } => {
                write!(f, "Non-finite value {value} in data matrix at ({row}, {col})")
            }
            EstimatorError::TooFewVariables { found } => {
                write!(f, "Structure learning needs at least 2 variables, found {found}")
            }
            EstimatorError::EmptyData => {
                write!(f, "Data matrix must contain at least one sample")
            }
            EstimatorError::InvalidLambda { name, value } => {
                write!(f, "Invalid {name}: {value}, must be finite and non-negative")
            }
            EstimatorError::InvalidHiddenWidth { width } => {
                write!(f, "Invalid hidden width {width}: must be at least 1")
            }
            EstimatorError::InvalidMaskThreshold { value } => {
                write!(f, "Invalid mask threshold {value}: must be finite and positive")
            }
            EstimatorError::NotConverged { penalty, tol, outer_iterations } => {
                write!(
                    f,
                    "Acyclicity penalty {penalty} did not reach tolerance {tol} \
                     within {outer_iterations} outer iterations"
                )
            }
            EstimatorError::Optimization(err) => {
                write!(f, "Optimization failed: {err}")
            }
        }
    }
}

impl From<OptError> for EstimatorError {
    fn from(err: OptError) -> Self {
        EstimatorError::Optimization(err)
    }
}

// Input and configuration problems map to ValueError; convergence and solver
// failures to RuntimeError.
#[cfg(feature = "python-bindings")]
impl From<EstimatorError> for pyo3::PyErr {
    fn from(err: EstimatorError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyRuntimeError, PyValueError};
        match err {
            EstimatorError::NotConverged { .. } | EstimatorError::Optimization(_) => {
                PyRuntimeError::new_err(err.to_string())
            }
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}
