//! Quadratic objective over the probability simplex.
use crate::optimization::errors::{OptError, OptResult};
use ndarray::{Array1, Array2, ArrayView1};

/// `f(w) = 0.5 wᵀPw + qᵀw` with `P` symmetric positive semi-definite.
///
/// The feasible set `{w : w ≥ 0, Σw = 1}` is implied; it is enforced by the
/// solver, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplexQp {
    p: Array2<f64>,
    q: Array1<f64>,
}

impl SimplexQp {
    /// Build a QP from its quadratic and linear terms.
    ///
    /// # Errors
    /// - [`OptError::ThetaLengthMismatch`] if `p` is not square or `q` does
    ///   not match its size.
    /// - [`OptError::NonFiniteCost`] if any coefficient is NaN or infinite.
    pub fn new(p: Array2<f64>, q: Array1<f64>) -> OptResult<Self> {
        let n = p.nrows();
        if p.ncols() != n {
            return Err(OptError::ThetaLengthMismatch { expected: n, actual: p.ncols() });
        }
        if q.len() != n {
            return Err(OptError::ThetaLengthMismatch { expected: n, actual: q.len() });
        }
        if let Some(&bad) = p.iter().chain(q.iter()).find(|v| !v.is_finite()) {
            return Err(OptError::NonFiniteCost { value: bad });
        }
        Ok(Self { p, q })
    }

    /// Number of decision variables.
    pub fn dim(&self) -> usize {
        self.q.len()
    }

    pub fn p(&self) -> &Array2<f64> {
        &self.p
    }

    pub fn q(&self) -> &Array1<f64> {
        &self.q
    }

    /// Objective value at `w`.
    pub fn value(&self, w: ArrayView1<f64>) -> f64 {
        0.5 * w.dot(&self.p.dot(&w)) + self.q.dot(&w)
    }

    /// Gradient `Pw + q`.
    pub fn grad(&self, w: ArrayView1<f64>) -> Array1<f64> {
        self.p.dot(&w) + &self.q
    }

    /// Upper bound on the largest eigenvalue of `P` (its Frobenius norm).
    pub fn lipschitz(&self) -> f64 {
        self.p.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Objective, gradient and Lipschitz bound match hand computation.
    //
    // Given
    // -----
    // - P = diag(1, 4), q = [-1, 0], w = [0.5, 0.5].
    //
    // Expect
    // ------
    // - f = 0.5(0.25 + 1) − 0.5 = 0.125, ∇f = [-0.5, 2], L = √17.
    fn value_grad_and_lipschitz() {
        let qp = SimplexQp::new(array![[1.0, 0.0], [0.0, 4.0]], array![-1.0, 0.0])
            .expect("valid qp");
        let w = array![0.5, 0.5];

        assert_abs_diff_eq!(qp.value(w.view()), 0.125, epsilon = 1e-15);
        let g = qp.grad(w.view());
        assert_abs_diff_eq!(g[0], -0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(g[1], 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(qp.lipschitz(), 17f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Shape and finiteness problems are rejected at construction.
    //
    // Given
    // -----
    // - A 2×3 P, a q of the wrong length, and a NaN entry.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` twice, then `NonFiniteCost`.
    fn new_rejects_bad_shapes_and_values() {
        assert!(matches!(
            SimplexQp::new(Array2::zeros((2, 3)), Array1::zeros(2)).unwrap_err(),
            OptError::ThetaLengthMismatch { .. }
        ));
        assert!(matches!(
            SimplexQp::new(Array2::zeros((2, 2)), Array1::zeros(3)).unwrap_err(),
            OptError::ThetaLengthMismatch { expected: 2, actual: 3 }
        ));
        assert!(matches!(
            SimplexQp::new(array![[f64::NAN]], array![0.0]).unwrap_err(),
            OptError::NonFiniteCost { .. }
        ));
    }
}
