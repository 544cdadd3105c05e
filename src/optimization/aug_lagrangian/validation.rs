//! Validation helpers for the constrained optimizer.
//!
//! Every numeric input that crosses the optimizer boundary is funneled
//! through one of these checks so that higher layers can assume finite,
//! well-shaped values:
//!
//! - [`verify_tol_grad`] / [`verify_tol_cost`]: optional stopping tolerances
//!   must be finite and strictly positive when present.
//! - [`validate_grad`] / [`validate_theta`]: vectors must match the
//!   objective dimension and contain only finite entries.
//! - [`validate_theta_hat`]: a solver result must exist and be finite.
//! - [`validate_value`] / [`validate_penalty`]: scalar outputs of the
//!   objective and the acyclicity penalty must be finite.
//!
//! Each failure maps to its own [`OptError`] variant so diagnostics name the
//! offending field, index, and value.
use crate::optimization::{
    aug_lagrangian::types::{Grad, Theta},
    errors::{OptError, OptResult},
};

/// Shared rule for optional tolerances: absent is fine, present must be
/// finite and strictly positive. `make` builds the field-specific error.
fn verify_optional_tol(
    tol: Option<f64>, make: impl Fn(f64, &'static str) -> OptError,
) -> OptResult<()> {
    let Some(tol) = tol else { return Ok(()) };
    if !tol.is_finite() {
        return Err(make(tol, "Tolerance must be finite."));
    }
    if tol <= 0.0 {
        return Err(make(tol, "Tolerance must be positive."));
    }
    Ok(())
}

/// Validate the optional gradient-norm stopping tolerance.
///
/// # Errors
/// [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    verify_optional_tol(tol, |tol, reason| OptError::InvalidTolGrad { tol, reason })
}

/// Validate the optional cost-change stopping tolerance.
///
/// # Errors
/// [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    verify_optional_tol(tol, |tol, reason| OptError::InvalidTolCost { tol, reason })
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if the length does not match `dim`.
/// - [`OptError::InvalidGradient`] naming the first non-finite entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    if let Some(index) = grad.iter().position(|v| !v.is_finite()) {
        return Err(OptError::InvalidGradient {
            index,
            value: grad[index],
            reason: "Gradient elements must be finite.",
        });
    }
    Ok(())
}

/// Validate a caller-supplied parameter vector (length and entries).
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] if the length does not match `dim`.
/// - [`OptError::InvalidThetaInput`] naming the first non-finite entry.
pub fn validate_theta(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    if let Some(index) = theta.iter().position(|v| !v.is_finite()) {
        return Err(OptError::InvalidThetaInput { index, value: theta[index] });
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Returns
/// The owned `Theta` when present with all entries finite.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if the solver produced no vector.
/// - [`OptError::InvalidThetaHat`] naming the first non-finite entry.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let t = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some(index) = t.iter().position(|v| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value: t[index],
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(t)
}

/// Validate that a scalar objective value is finite.
///
/// # Errors
/// [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate that an acyclicity penalty value is finite.
///
/// # Errors
/// [`OptError::NonFinitePenalty`] if the value is `NaN` or infinite.
pub fn validate_penalty(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFinitePenalty { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn tol_checks_accept_none_and_positive() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(verify_tol_cost(None).is_ok());
        assert!(verify_tol_cost(Some(1e-8)).is_ok());
    }

    #[test]
    fn tol_checks_reject_non_positive_and_non_finite() {
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(Some(f64::NAN)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::INFINITY)),
            Err(OptError::InvalidTolCost { .. })
        ));
    }

    #[test]
    fn validate_grad_rejects_dim_mismatch_and_nan() {
        let g = array![1.0, 2.0];
        assert!(matches!(validate_grad(&g, 3), Err(OptError::GradientDimMismatch { .. })));
        let g = array![1.0, f64::NAN, 2.0];
        assert!(matches!(validate_grad(&g, 3), Err(OptError::InvalidGradient { index: 1, .. })));
        let g = array![1.0, -2.0, 0.0];
        assert!(validate_grad(&g, 3).is_ok());
    }

    #[test]
    fn validate_theta_hat_requires_present_finite_vector() {
        assert!(matches!(validate_theta_hat(None), Err(OptError::MissingThetaHat)));
        let t = array![0.1, f64::INFINITY];
        assert!(matches!(
            validate_theta_hat(Some(t)),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
        let t = array![0.1, -0.4];
        assert_eq!(validate_theta_hat(Some(t.clone())).unwrap(), t);
    }
}
