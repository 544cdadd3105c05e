//! Nonlinear structural model: one hidden layer per output variable.
//!
//! Purpose
//! -------
//! Implement [`PenalizedObjective`] for the nonlinear model: each variable j
//! is predicted from the others through its own single-hidden-layer network
//! with sigmoid activations, and the acyclicity constraint is imposed on the
//! effective adjacency aggregated from the first-layer weights.
//!
//! Key behaviors
//! -------------
//! - Parameter layout: θ = [fc1 | b1 | fc2 | b2] with `fc1[j] ∈ m×d`,
//!   `b1[j] ∈ m`, `fc2[j] ∈ m`, `b2[j] ∈ ℝ` for each output j; total
//!   dimension `d·m·d + d·m + d·m + d`.
//! - Structural zero diagonal: input j is masked out of output j's block.
//!   The masked first-layer column is initialized to zero and its gradient is
//!   forced to zero, so it stays zero under the quasi-Newton solver.
//! - Effective adjacency `A_ij = Σ_h fc1[j][h,i]²` (influence of input i on
//!   output j); penalty `h = tr(e^A) − d` with the chain rule through
//!   `∂h/∂A = (e^A)ᵀ` from [`numerics::penalty_over`].
//! - Loss `(1/2n)·Σ_j ‖x_j − ŷ_j‖²` with hand-derived backpropagation,
//!   `(λ2/2)` weight decay over the masked first-layer weights, biases, and
//!   output layers (the masked diagonal coordinates are not part of the
//!   objective), and the same smoothed ℓ1 as the linear model on fc1 only.
//! - Deterministic initialization from a seed: small uniform weights, zero
//!   biases.
//! - Returned weighted adjacency `W_ij = √A_ij` (non-negative edge
//!   magnitudes).
use crate::{
    estimator::core::data::DesignMatrix,
    numerics,
    optimization::{
        aug_lagrangian::{
            traits::PenalizedObjective,
            types::{Cost, Grad, Theta},
            validation::{validate_theta, validate_value},
        },
        errors::{OptError, OptResult},
    },
};
use ndarray::{s, Array1, Array2, Axis};
use rand::{distributions::Uniform, rngs::StdRng, Rng, SeedableRng};

/// Smoothing width of the ℓ1 surrogate on the first-layer weights.
const L1_SMOOTH_EPS: f64 = 1e-6;

/// Half-width of the uniform initialization interval for layer weights.
const INIT_SCALE: f64 = 0.1;

/// Per-variable MLP objective over a validated design matrix.
#[derive(Debug, Clone)]
pub struct StructureMlp<'a> {
    data: &'a DesignMatrix,
    hidden: usize,
    lambda1: f64,
    lambda2: f64,
    seed: u64,
}

impl<'a> StructureMlp<'a> {
    pub fn new(data: &'a DesignMatrix, hidden: usize, lambda1: f64, lambda2: f64, seed: u64) -> Self {
        Self { data, hidden, lambda1, lambda2, seed }
    }

    fn d(&self) -> usize {
        self.data.n_vars()
    }

    // θ layout offsets.
    fn fc1_offset(&self, j: usize) -> usize {
        j * self.hidden * self.d()
    }

    fn b1_offset(&self, j: usize) -> usize {
        self.d() * self.hidden * self.d() + j * self.hidden
    }

    fn fc2_offset(&self, j: usize) -> usize {
        self.d() * self.hidden * self.d() + self.d() * self.hidden + j * self.hidden
    }

    fn b2_offset(&self, j: usize) -> usize {
        self.d() * self.hidden * self.d() + 2 * self.d() * self.hidden + j
    }

    /// First-layer weights of output j as an owned m×d matrix with the
    /// diagonal input column forced to zero.
    fn fc1(&self, theta: &Theta, j: usize) -> Array2<f64> {
        let (m, d) = (self.hidden, self.d());
        let start = self.fc1_offset(j);
        let mut w1 = Array2::<f64>::zeros((m, d));
        for k in 0..m {
            for i in 0..d {
                if i != j {
                    w1[[k, i]] = theta[start + k * d + i];
                }
            }
        }
        w1
    }

    /// Effective adjacency `A_ij = Σ_h fc1[j][h,i]²`.
    fn effective_adjacency(&self, theta: &Theta) -> Array2<f64> {
        let d = self.d();
        let mut a = Array2::<f64>::zeros((d, d));
        for j in 0..d {
            let w1 = self.fc1(theta, j);
            for i in 0..d {
                a[[i, j]] = w1.column(i).iter().map(|v| v * v).sum();
            }
        }
        a
    }

    /// Shared forward/backward pass over the full augmented objective.
    ///
    /// Evaluates the cost at `(α, ρ)` and, when `want_grad` is set, the
    /// analytic gradient in θ-space with the diagonal fc1 columns zeroed.
    fn forward_backward(
        &self, theta: &Theta, alpha: f64, rho: f64, want_grad: bool,
    ) -> OptResult<(f64, Option<Grad>)> {
        let x = self.data.x();
        let n = self.data.n_samples() as f64;
        let (m, d) = (self.hidden, self.d());

        let mut loss = 0.0;
        let mut grad = if want_grad { Some(Array1::<f64>::zeros(self.dim())) } else { None };

        let adjacency = self.effective_adjacency(theta);
        let (h, dh_da) = numerics::penalty_over(&adjacency);
        let penalty_scale = alpha + rho * h;

        for j in 0..d {
            let w1 = self.fc1(theta, j);
            let b1 = theta.slice(s![self.b1_offset(j)..self.b1_offset(j) + m]);
            let fc2 = theta.slice(s![self.fc2_offset(j)..self.fc2_offset(j) + m]);
            let b2 = theta[self.b2_offset(j)];

            // Forward: Z = X·W1ᵀ + b1, A = σ(Z), ŷ = A·fc2 + b2.
            let mut z = x.dot(&w1.t());
            z += &b1;
            let act = z.mapv(|v| 1.0 / (1.0 + (-v).exp()));
            let mut residual = act.dot(&fc2);
            residual += b2;
            residual -= &x.column(j);

            loss += residual.dot(&residual) / (2.0 * n);

            if let Some(ref mut g) = grad {
                // Backward through the output layer.
                let g_fc2 = act.t().dot(&residual) / n;
                let g_b2 = residual.sum() / n;

                // δ = (r ⊗ fc2) ∘ σ'(Z), rows are samples.
                let mut delta = Array2::<f64>::zeros((x.nrows(), m));
                for (mut row, &r) in delta.axis_iter_mut(Axis(0)).zip(residual.iter()) {
                    row.assign(&(&fc2 * (r / n)));
                }
                delta *= &(&act * &act.mapv(|v| 1.0 - v));

                let mut g_w1 = delta.t().dot(x);
                let g_b1 = delta.sum_axis(Axis(0));

                // Constraint and ℓ1 terms act on fc1 through A and directly.
                for i in 0..d {
                    if i == j {
                        continue;
                    }
                    let da = penalty_scale * dh_da[[i, j]];
                    for k in 0..m {
                        let w = w1[[k, i]];
                        g_w1[[k, i]] += 2.0 * da * w;
                        g_w1[[k, i]] +=
                            self.lambda1 * w / (w * w + L1_SMOOTH_EPS * L1_SMOOTH_EPS).sqrt();
                    }
                }
                g_w1.column_mut(j).fill(0.0);

                let start = self.fc1_offset(j);
                for k in 0..m {
                    for i in 0..d {
                        g[start + k * d + i] = g_w1[[k, i]];
                    }
                }
                g.slice_mut(s![self.b1_offset(j)..self.b1_offset(j) + m]).assign(&g_b1);
                g.slice_mut(s![self.fc2_offset(j)..self.fc2_offset(j) + m]).assign(&g_fc2);
                g[self.b2_offset(j)] = g_b2;
            }
        }

        // ℓ1 and ℓ2 act on the masked fc1 views plus the bias/output layers,
        // so the masked diagonal coordinates never enter the objective.
        let mut l1 = 0.0;
        let mut decay_sq = 0.0;
        for j in 0..d {
            let w1 = self.fc1(theta, j);
            for &v in w1.iter() {
                l1 += (v * v + L1_SMOOTH_EPS * L1_SMOOTH_EPS).sqrt() - L1_SMOOTH_EPS;
                decay_sq += v * v;
            }
        }
        let tail = theta.slice(s![self.b1_offset(0)..]);
        decay_sq += tail.dot(&tail);
        let decay = 0.5 * self.lambda2 * decay_sq;
        let cost = loss + self.lambda1 * l1 + decay + alpha * h + 0.5 * rho * h * h;
        validate_value(cost)?;

        if let Some(ref mut g) = grad {
            *g += &(theta * self.lambda2);
            // The masked coordinates are not part of the objective.
            for j in 0..d {
                let start = self.fc1_offset(j);
                for k in 0..self.hidden {
                    g[start + k * d + j] = 0.0;
                }
            }
        }
        Ok((cost, grad))
    }
}

impl PenalizedObjective for StructureMlp<'_> {
    fn dim(&self) -> usize {
        let (m, d) = (self.hidden, self.d());
        d * m * d + 2 * d * m + d
    }

    fn init_theta(&self) -> Theta {
        let (m, d) = (self.hidden, self.d());
        let mut rng = StdRng::seed_from_u64(self.seed);
        let between = Uniform::new(-INIT_SCALE, INIT_SCALE);
        let mut theta = Array1::<f64>::zeros(self.dim());

        for j in 0..d {
            let start = self.fc1_offset(j);
            for k in 0..m {
                for i in 0..d {
                    // Diagonal input stays a structural zero.
                    if i != j {
                        theta[start + k * d + i] = rng.sample(between);
                    }
                }
            }
            let fc2_start = self.fc2_offset(j);
            for k in 0..m {
                theta[fc2_start + k] = rng.sample(between);
            }
        }
        theta
    }

    fn value(&self, theta: &Theta, alpha: f64, rho: f64) -> OptResult<Cost> {
        let (cost, _) = self.forward_backward(theta, alpha, rho, false)?;
        Ok(cost)
    }

    fn grad(&self, theta: &Theta, alpha: f64, rho: f64) -> OptResult<Grad> {
        let (_, grad) = self.forward_backward(theta, alpha, rho, true)?;
        grad.ok_or(OptError::UnknownError)
    }

    fn penalty(&self, theta: &Theta) -> OptResult<f64> {
        let (h, _) = numerics::penalty_over(&self.effective_adjacency(theta));
        Ok(h)
    }

    fn check(&self, theta: &Theta) -> OptResult<()> {
        validate_theta(theta, self.dim())
    }

    fn weights(&self, theta: &Theta) -> Array2<f64> {
        self.effective_adjacency(theta).mapv(f64::sqrt)
    }
}
