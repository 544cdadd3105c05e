//! Adapter that exposes a [`PenalizedObjective`] at fixed `(α, ρ)` as an
//! `argmin` problem.
//!
//! The outer augmented-Lagrangian loop freezes the dual variable `α` and the
//! penalty weight `ρ` for the duration of one inner solve; this adapter
//! captures both and forwards `value`/`grad` calls. The objective is already
//! a cost to be minimized, so no sign flip happens here. If a model does not
//! provide an analytic gradient, we finite-difference the cost closure.
use std::cell::RefCell;

use crate::optimization::{
    aug_lagrangian::{
        traits::PenalizedObjective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
    errors::OptError,
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a [`PenalizedObjective`] to `argmin`'s `CostFunction` and
/// `Gradient` at a fixed `(α, ρ)` pair.
#[derive(Debug, Clone)]
pub struct AugLagProblem<'a, F: PenalizedObjective> {
    pub objective: &'a F,
    pub alpha: f64,
    pub rho: f64,
}

impl<'a, F: PenalizedObjective> AugLagProblem<'a, F> {
    /// Construct a new adapter over an objective and the current multipliers.
    pub fn new(objective: &'a F, alpha: f64, rho: f64) -> Self {
        Self { objective, alpha, rho }
    }
}

impl<'a, F: PenalizedObjective> CostFunction for AugLagProblem<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the augmented cost at `θ`.
    ///
    /// - Calls the objective's `value(θ, α, ρ)` and checks the result is
    ///   finite.
    /// - Returns `Error(NonFiniteCost)` if the value is not finite.
    ///
    /// # Errors
    /// Propagates any `OptError` from the objective's `value` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.objective.value(theta, self.alpha, self.rho)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: PenalizedObjective> Gradient for AugLagProblem<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the augmented cost at `θ`.
    ///
    /// An analytic gradient, when the objective provides one, is validated
    /// and returned as-is. `GradientNotImplemented` routes to the
    /// finite-difference fallback ([`Self::fd_gradient`]); every other
    /// objective error is propagated.
    ///
    /// # Errors
    /// - Objective errors from `grad` other than `GradientNotImplemented`.
    /// - Anything raised by the FD fallback (cost failures inside the
    ///   stencil, dimension mismatch, non-finite entries).
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.objective.grad(theta, self.alpha, self.rho) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => self.fd_gradient(theta),
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: PenalizedObjective> AugLagProblem<'a, F> {
    /// Finite-difference the augmented cost at `θ`.
    ///
    /// The FD closure must return a plain `f64`, so cost failures cannot use
    /// `?`: the first error is parked in a `RefCell` and the closure yields
    /// `NaN`, which the validation step then rejects. Central differences are
    /// tried first; if the stencil stepped somewhere the cost could not be
    /// evaluated (or produced a non-finite entry), one retry is made with
    /// one-sided forward differences before giving up.
    ///
    /// # Errors
    /// - The first cost error raised inside the FD stencil, if any.
    /// - [`OptError::InvalidGradient`] / [`OptError::GradientDimMismatch`]
    ///   when even the forward-difference gradient fails validation.
    fn fd_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let parked: RefCell<Option<Error>> = RefCell::new(None);
        let cost_fn = |point: &Theta| -> f64 {
            match self.cost(point) {
                Ok(value) => value,
                Err(e) => {
                    parked.borrow_mut().get_or_insert(e);
                    f64::NAN
                }
            }
        };

        let central = theta.central_diff(&cost_fn);
        if parked.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
            return Ok(central);
        }

        parked.replace(None);
        let forward = theta.forward_diff(&cost_fn);
        if let Some(err) = parked.take() {
            return Err(err);
        }
        validate_grad(&forward, theta.len())?;
        Ok(forward)
    }
}
