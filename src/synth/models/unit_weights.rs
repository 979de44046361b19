//! Donor (unit) weights for fixed predictor weights.
//!
//! For a diagonal `V` the donor weights solve
//!
//! ```text
//! min_w  0.5 wᵀPw + qᵀw,   P = X0ᵀVX0,  q = −X1ᵀVX0,
//! s.t.   w ≥ 0, Σw = 1.
//! ```
//!
//! The reported `loss_w` is that objective (signed; the constant
//! `0.5·X1ᵀVX1` is left out) and `loss_v` is the mean squared outcome error
//! `‖Z1 − Z0w‖²/n_t`.
use crate::{
    optimization::simplex_qp::{QpOptions, QpOutcome, SimplexQp, solve_simplex_qp},
    synth::{
        core::{data::SynthData, validation::validate_predictor_weights},
        errors::SynthResult,
    },
};
use ndarray::{Array1, Array2, ArrayView1};

/// Donor weights and the two losses for one `V`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightResult {
    pub w: Array1<f64>,
    pub loss_w: f64,
    pub loss_v: f64,
    /// Inner solver diagnostics.
    pub qp: QpOutcome,
}

/// Solve the donor-weight QP for predictor weights `v`.
///
/// `data` should already be variance-scaled when called as part of a fit.
///
/// # Errors
/// - `DimensionMismatch` / `InvalidPredictorWeights` for an unusable `v`.
/// - `OptimizationFailed` if the QP objective is not finite.
pub fn solve_unit_weights(
    v: &Array2<f64>, data: &SynthData, qp_opts: &QpOptions,
) -> SynthResult<WeightResult> {
    validate_predictor_weights(v, data.n_predictors())?;
    let x0 = data.x0();
    let vx0 = v.dot(x0);
    let p = x0.t().dot(&vx0);
    let q = -data.x1().dot(&vx0);

    let problem = SimplexQp::new(p, q)?;
    let qp = solve_simplex_qp(&problem, qp_opts)?;
    let loss_v = outcome_loss(qp.w.view(), data);
    Ok(WeightResult { w: qp.w.clone(), loss_w: qp.value, loss_v, qp })
}

/// Mean squared pre-treatment outcome error `‖Z1 − Z0w‖²/n_t`.
pub fn outcome_loss(w: ArrayView1<f64>, data: &SynthData) -> f64 {
    let residual = data.z1() - &data.z0().dot(&w);
    residual.dot(&residual) / data.n_periods() as f64
}

/// Matrix-level form of [`solve_unit_weights`]: returns `(W, loss_W, loss_V)`.
///
/// The matrices are validated as in [`SynthData::new`]; no scaling is
/// applied.
///
/// # Errors
/// Input validation errors plus those of [`solve_unit_weights`].
pub fn optimize_w(
    v: &Array2<f64>, x0: &Array2<f64>, x1: &Array1<f64>, z0: &Array2<f64>, z1: &Array1<f64>,
    qp_opts: &QpOptions,
) -> SynthResult<(Array1<f64>, f64, f64)> {
    let data = SynthData::new(x0.clone(), x1.clone(), z0.clone(), z1.clone())?;
    let result = solve_unit_weights(v, &data, qp_opts)?;
    Ok((result.w, result.loss_w, result.loss_v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{optimization::numerical_stability::is_on_simplex, synth::errors::SynthError};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn identity_donors(x1: Array1<f64>) -> SynthData {
        SynthData::new(
            Array2::eye(3),
            x1,
            array![[1.0, 2.0, 3.0], [2.0, 4.0, 6.0]],
            array![1.0, 2.0],
        )
        .expect("valid data")
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Simplex feasibility and idempotence of the donor weights.
    // - Exact recovery when the treated unit equals a donor.
    // - Behavior under predictor rescaling with fixed V.
    // - The outcome loss and the matrix-level wrapper.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A treated unit identical to a donor is reproduced by that donor alone.
    //
    // Given
    // -----
    // - X0 = I₃, X1 = e₂, V = I/3.
    //
    // Expect
    // ------
    // - w ≈ e₂, predictor distance ≈ 0 so loss_W ≈ −0.5·X1ᵀVX1 = −1/6,
    //   loss_V = mean((Z1 − Z0e₂)²) = (1 + 4)/2.
    fn treated_equal_to_donor_gets_full_weight() {
        let data = identity_donors(array![0.0, 1.0, 0.0]);
        let v = Array2::eye(3) / 3.0;

        let res = solve_unit_weights(&v, &data, &QpOptions::default()).expect("solve");

        assert_abs_diff_eq!(res.w[1], 1.0, epsilon = 1e-8);
        assert_abs_diff_eq!(res.loss_w, -1.0 / 6.0, epsilon = 1e-8);
        assert_abs_diff_eq!(res.loss_v, 2.5, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Weights stay on the simplex and repeat exactly for identical inputs.
    //
    // Given
    // -----
    // - X0 = I₃, X1 = [0.2, 0.9, -0.4], V = diag(0.5, 0.3, 0.2).
    //
    // Expect
    // ------
    // - Feasible w; a second solve returns the same result.
    fn weights_are_feasible_and_repeatable() {
        let data = identity_donors(array![0.2, 0.9, -0.4]);
        let v = Array2::from_diag(&array![0.5, 0.3, 0.2]);

        let first = solve_unit_weights(&v, &data, &QpOptions::default()).expect("solve");
        let second = solve_unit_weights(&v, &data, &QpOptions::default()).expect("solve");

        assert!(is_on_simplex(first.w.view()));
        assert_eq!(first, second);
    }

    #[test]
    // Purpose
    // -------
    // Rescaling a predictor with V fixed is the same as rescaling V.
    //
    // Given
    // -----
    // - X0 = [[0,1],[1,0]], X1 = [0.8,0.8], V = I gives w = (0.5, 0.5).
    // - Scaling row 0 by 10 (D = diag(10, 1)).
    //
    // Expect
    // ------
    // - w₂ = 80.2/101 after scaling, equal to the solve with V' = DVD on
    //   the original data; scaling both rows by 10 leaves w unchanged.
    fn rescaling_predictors_matches_rescaled_v() {
        let z0 = array![[1.0, 0.0]];
        let z1 = array![0.5];
        let x0 = array![[0.0, 1.0], [1.0, 0.0]];
        let x1 = array![0.8, 0.8];
        let qp = QpOptions::default();
        let v = Array2::eye(2);

        let (w, _, _) = optimize_w(&v, &x0, &x1, &z0, &z1, &qp).expect("solve");
        assert_abs_diff_eq!(w[0], 0.5, epsilon = 1e-8);

        let d = array![10.0, 1.0];
        let x0_scaled = &x0 * &d.view().insert_axis(ndarray::Axis(1));
        let x1_scaled = &x1 * &d;
        let (w_scaled, _, _) = optimize_w(&v, &x0_scaled, &x1_scaled, &z0, &z1, &qp).expect("solve");
        assert_abs_diff_eq!(w_scaled[1], 80.2 / 101.0, epsilon = 1e-6);

        let v_prime = Array2::from_diag(&(&d * &d));
        let (w_prime, _, _) = optimize_w(&v_prime, &x0, &x1, &z0, &z1, &qp).expect("solve");
        assert_abs_diff_eq!(w_prime[0], w_scaled[0], epsilon = 1e-8);
        assert_abs_diff_eq!(w_prime[1], w_scaled[1], epsilon = 1e-8);

        let (w_uniform, _, _) =
            optimize_w(&v, &(&x0 * 10.0), &(&x1 * 10.0), &z0, &z1, &qp).expect("solve");
        assert_abs_diff_eq!(w_uniform[0], w[0], epsilon = 1e-8);
        assert_abs_diff_eq!(w_uniform[1], w[1], epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // A V of the wrong size is rejected.
    //
    // Given
    // -----
    // - 3 predictors and a 2×2 V.
    //
    // Expect
    // ------
    // - `DimensionMismatch { what: "V rows", .. }`.
    fn wrong_sized_v_is_rejected() {
        let data = identity_donors(array![0.0, 1.0, 0.0]);

        let err = solve_unit_weights(&Array2::eye(2), &data, &QpOptions::default()).unwrap_err();

        assert!(matches!(err, SynthError::DimensionMismatch { what: "V rows", .. }));
    }
}
