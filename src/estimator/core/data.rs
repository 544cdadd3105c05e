//! Validated design matrix for structure learning.
//!
//! Purpose
//! -------
//! Wrap the raw n×d observation matrix behind a constructor that enforces the
//! input contract (finite entries, at least one sample, at least two
//! variables) so the models never re-check it, and cache the Gram matrix
//! `XᵀX` that the linear model's loss and gradient are built from.
use crate::estimator::errors::{EstimatorError, EstimatorResult};
use ndarray::Array2;

/// Observation matrix (n samples × d variables) with a cached Gram matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    x: Array2<f64>,
    gram: Array2<f64>,
}

impl DesignMatrix {
    /// Validate and wrap an observation matrix.
    ///
    /// # Rules
    /// - At least one sample (`n ≥ 1`).
    /// - At least two variables (`d ≥ 2`); a single column has no structure
    ///   to learn.
    /// - Every entry finite.
    ///
    /// # Errors
    /// - [`EstimatorError::EmptyData`] if `n == 0`.
    /// - [`EstimatorError::TooFewVariables`] if `d < 2`.
    /// - [`EstimatorError::NonFiniteValue`] with the position of the first
    ///   offending entry.
    pub fn new(data: &Array2<f64>) -> EstimatorResult<Self> {
        let (n, d) = data.dim();
        if n == 0 {
            return Err(EstimatorError::EmptyData);
        }
        if d < 2 {
            return Err(EstimatorError::TooFewVariables { found: d });
        }
        for ((row, col), &value) in data.indexed_iter() {
            if !value.is_finite() {
                return Err(EstimatorError::NonFiniteValue { row, col, value });
            }
        }
        let gram = data.t().dot(data);
        Ok(Self { x: data.clone(), gram })
    }

    /// Number of samples n.
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Number of variables d.
    pub fn n_vars(&self) -> usize {
        self.x.ncols()
    }

    /// The observation matrix itself.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Cached Gram matrix `XᵀX` (d×d).
    pub fn gram(&self) -> &Array2<f64> {
        &self.gram
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // A well-formed matrix passes and the Gram cache equals XᵀX.
    fn accepts_valid_data_and_caches_gram() {
        let x = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let dm = DesignMatrix::new(&x).unwrap();
        assert_eq!(dm.n_samples(), 3);
        assert_eq!(dm.n_vars(), 2);
        assert_eq!(dm.gram(), &x.t().dot(&x));
    }

    #[test]
    // Purpose
    // -------
    // The constructor rejects empty data, a single variable, and non-finite
    // entries, each with its own variant.
    fn rejects_contract_violations() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert!(matches!(DesignMatrix::new(&empty), Err(EstimatorError::EmptyData)));

        let one_var = Array2::<f64>::zeros((5, 1));
        assert!(matches!(
            DesignMatrix::new(&one_var),
            Err(EstimatorError::TooFewVariables { found: 1 })
        ));

        let with_nan = array![[1.0, 2.0], [f64::NAN, 4.0]];
        assert!(matches!(
            DesignMatrix::new(&with_nan),
            Err(EstimatorError::NonFiniteValue { row: 1, col: 0, .. })
        ));

        let with_inf = array![[1.0, f64::INFINITY], [3.0, 4.0]];
        assert!(matches!(
            DesignMatrix::new(&with_inf),
            Err(EstimatorError::NonFiniteValue { row: 0, col: 1, .. })
        ));
    }
}
