//! Estimator configuration: model choice, regularization, penalty schedule,
//! thresholding, and output precision.
//!
//! Purpose
//! -------
//! Collect every knob of a structure-learning call into one immutable value,
//! validated up front so the models and the outer loop can assume sane,
//! finite inputs. The outer-loop numeric fields are validated by
//! [`OuterOptions::new`] when the config is lowered via
//! [`EstimatorConfig::outer_options`]; the estimator-specific fields are
//! validated by [`EstimatorConfig::validate`].
//!
//! Conventions
//! -----------
//! - `Default` gives the canonical configuration: linear mode, λ1 = λ2 = 0.01,
//!   hidden width 10 (nonlinear), outer budget 100, `h_tol = 1e-8`,
//!   ρ-growth 10, ρ-max 1e16, mask threshold 0.3, double precision, seed 0.
//! - `hidden_width = None` selects the mode-appropriate default; `categorical`
//!   widens it for one-hot/embedded inputs without changing the algorithm.
use crate::{
    estimator::errors::{EstimatorError, EstimatorResult},
    optimization::aug_lagrangian::{OuterOptions, SolverOptions},
};

/// Default hidden-layer width for the nonlinear model.
pub const DEFAULT_HIDDEN_WIDTH: usize = 10;

/// Default hidden-layer width when the inputs are one-hot/embedded
/// categorical columns; wider to absorb the extra indicator structure.
pub const DEFAULT_HIDDEN_WIDTH_CATEGORICAL: usize = 32;

/// Default threshold for binarizing fitted weights into a causal mask.
pub const DEFAULT_MASK_THRESHOLD: f64 = 0.3;

/// Structural model fitted to the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Linear structural-equation model: `X ≈ XW`, ℓ1-sparsified.
    Linear,
    /// One-hidden-layer feed-forward model per variable, ℓ2 weight decay.
    Nonlinear,
}

/// Precision policy applied to the fitted weights at the output boundary.
///
/// `Single` rounds each weight through `f32` before returning; the fit itself
/// always runs in `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Double,
    Single,
}

/// Full configuration of one structure-learning call.
///
/// Fields
/// ------
/// - `mode`: structural model (`Linear` | `Nonlinear`).
/// - `lambda1`: ℓ1 sparsity coefficient, ≥ 0.
/// - `lambda2`: ℓ2 weight-decay coefficient (nonlinear mode), ≥ 0.
/// - `hidden_width`: nonlinear hidden-layer width; `None` uses the default
///   (10, or 32 when `categorical` is set).
/// - `categorical`: inputs are one-hot/embedded categorical columns; only
///   affects the default hidden width.
/// - `max_outer_iter`, `h_tol`, `rho_growth`, `rho_max`: outer-loop schedule,
///   see [`OuterOptions`].
/// - `mask_threshold`: `|W_ij|` cutoff used by mask extraction, > 0.
/// - `precision`: output precision policy.
/// - `seed`: deterministic parameter initialization (nonlinear mode).
/// - `solver`: inner L-BFGS configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    pub mode: Mode,
    pub lambda1: f64,
    pub lambda2: f64,
    pub hidden_width: Option<usize>,
    pub categorical: bool,
    pub max_outer_iter: usize,
    pub h_tol: f64,
    pub rho_growth: f64,
    pub rho_max: f64,
    pub mask_threshold: f64,
    pub precision: Precision,
    pub seed: u64,
    pub solver: SolverOptions,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        let outer = OuterOptions::default();
        Self {
            mode: Mode::Linear,
            lambda1: 0.01,
            lambda2: 0.01,
            hidden_width: None,
            categorical: false,
            max_outer_iter: outer.max_outer_iter,
            h_tol: outer.h_tol,
            rho_growth: outer.rho_growth,
            rho_max: outer.rho_max,
            mask_threshold: DEFAULT_MASK_THRESHOLD,
            precision: Precision::Double,
            seed: 0,
            solver: SolverOptions::default(),
        }
    }
}

impl EstimatorConfig {
    /// Validate the estimator-specific fields.
    ///
    /// # Rules
    /// - `lambda1` and `lambda2` finite and non-negative.
    /// - `hidden_width`, if provided, at least 1.
    /// - `mask_threshold` finite and strictly positive.
    ///
    /// Outer-loop fields are validated separately by [`Self::outer_options`].
    ///
    /// # Errors
    /// The corresponding [`EstimatorError`] variant for the first violated
    /// rule.
    pub fn validate(&self) -> EstimatorResult<()> {
        if !self.lambda1.is_finite() || self.lambda1 < 0.0 {
            return Err(EstimatorError::InvalidLambda { name: "lambda1", value: self.lambda1 });
        }
        if !self.lambda2.is_finite() || self.lambda2 < 0.0 {
            return Err(EstimatorError::InvalidLambda { name: "lambda2", value: self.lambda2 });
        }
        if let Some(width) = self.hidden_width {
            if width == 0 {
                return Err(EstimatorError::InvalidHiddenWidth { width });
            }
        }
        if !self.mask_threshold.is_finite() || self.mask_threshold <= 0.0 {
            return Err(EstimatorError::InvalidMaskThreshold { value: self.mask_threshold });
        }
        Ok(())
    }

    /// Lower the outer-loop fields into validated [`OuterOptions`].
    ///
    /// # Errors
    /// Propagates `OptError` validation failures (wrapped by the caller's
    /// `From<OptError>` conversion) for a zero outer budget, non-positive
    /// `h_tol`, growth factor ≤ 1, or inconsistent ρ bounds.
    pub fn outer_options(&self) -> EstimatorResult<OuterOptions> {
        let defaults = OuterOptions::default();
        Ok(OuterOptions::new(
            self.max_outer_iter,
            self.h_tol,
            defaults.rho_init,
            self.rho_growth,
            self.rho_max,
        )?)
    }

    /// Effective hidden-layer width for the nonlinear model.
    pub fn effective_hidden_width(&self) -> usize {
        match self.hidden_width {
            Some(width) => width,
            None if self.categorical => DEFAULT_HIDDEN_WIDTH_CATEGORICAL,
            None => DEFAULT_HIDDEN_WIDTH,
        }
    }
}
