//! Immutable result of a synthetic control fit.
use crate::{
    optimization::{loss_optimizer::OptimOutcome, simplex_qp::QpOutcome},
    synth::{
        core::data::SynthData,
        errors::{SynthError, SynthResult},
        models::unit_weights::WeightResult,
    },
};
use ndarray::{Array1, Array2};

/// Fitted weights, losses and diagnostics.
///
/// `V` refers to variance-scaled predictors. `data` is the unscaled
/// pre-period input the fit was run on; the result owns it and keeps no
/// handle on the [`Dataprep`](crate::synth::core::data::Dataprep) that
/// produced it. Outcome panels covering other periods are passed explicitly
/// to [`SynthFit::synthetic_outcome`] and [`SynthFit::gaps`].
#[derive(Debug, Clone, PartialEq)]
pub struct SynthFit {
    w: Array1<f64>,
    v: Array2<f64>,
    loss_w: f64,
    loss_v: f64,
    data: SynthData,
    qp_outcome: QpOutcome,
    search_outcome: Option<OptimOutcome>,
}

impl SynthFit {
    pub(crate) fn new(
        v: Array2<f64>, weights: WeightResult, data: SynthData,
        search_outcome: Option<OptimOutcome>,
    ) -> Self {
        Self {
            w: weights.w,
            v,
            loss_w: weights.loss_w,
            loss_v: weights.loss_v,
            data,
            qp_outcome: weights.qp,
            search_outcome,
        }
    }

    /// Donor weights, one per donor, on the probability simplex.
    pub fn w(&self) -> &Array1<f64> {
        &self.w
    }

    /// Predictor weights as an `n_p × n_p` diagonal matrix.
    pub fn v(&self) -> &Array2<f64> {
        &self.v
    }

    /// Diagonal of [`SynthFit::v`].
    pub fn v_diag(&self) -> Array1<f64> {
        self.v.diag().to_owned()
    }

    /// Inner QP objective at `W` (signed, without the constant term).
    pub fn loss_w(&self) -> f64 {
        self.loss_w
    }

    /// Mean squared pre-treatment outcome error at `W`.
    pub fn loss_v(&self) -> f64 {
        self.loss_v
    }

    pub fn data(&self) -> &SynthData {
        &self.data
    }

    pub fn qp_outcome(&self) -> &QpOutcome {
        &self.qp_outcome
    }

    /// Outer search diagnostics; `None` when `V` was fixed by the caller.
    pub fn search_outcome(&self) -> Option<&OptimOutcome> {
        self.search_outcome.as_ref()
    }

    /// Synthetic outcome path `Y0 · W` for a `periods × donors` panel.
    ///
    /// # Errors
    /// `DimensionMismatch` if `donor_outcomes` does not have one column per
    /// donor.
    pub fn synthetic_outcome(&self, donor_outcomes: &Array2<f64>) -> SynthResult<Array1<f64>> {
        if donor_outcomes.ncols() != self.w.len() {
            return Err(SynthError::DimensionMismatch {
                what: "donor outcome columns",
                expected: self.w.len(),
                actual: donor_outcomes.ncols(),
            });
        }
        Ok(donor_outcomes.dot(&self.w))
    }

    /// Treated minus synthetic outcome, period by period.
    ///
    /// # Errors
    /// `DimensionMismatch` if the panel width is wrong or the treated path
    /// length differs from the number of panel rows.
    pub fn gaps(
        &self, treated_outcome: &Array1<f64>, donor_outcomes: &Array2<f64>,
    ) -> SynthResult<Array1<f64>> {
        let synthetic = self.synthetic_outcome(donor_outcomes)?;
        if treated_outcome.len() != synthetic.len() {
            return Err(SynthError::DimensionMismatch {
                what: "treated outcome",
                expected: synthetic.len(),
                actual: treated_outcome.len(),
            });
        }
        Ok(treated_outcome - &synthetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{
        core::{
            data::{DataSource, Dataprep},
            options::{SynthOptions, VSelection},
        },
        models::synth::fit,
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn fitted() -> SynthFit {
        let data = SynthData::new(
            array![[1.0, 3.0]],
            array![2.0],
            array![[1.0, 3.0]],
            array![2.0],
        )
        .expect("valid data");
        let qp = QpOutcome { w: array![0.25, 0.75], value: -1.0, iterations: 3, converged: true };
        let weights = WeightResult { w: qp.w.clone(), loss_w: -1.0, loss_v: 0.0, qp };
        SynthFit::new(array![[1.0]], weights, data, None)
    }

    #[test]
    // Purpose
    // -------
    // Synthetic path and gaps follow `Y0 · W`.
    //
    // Given
    // -----
    // - W = [0.25, 0.75], Y0 = [[4, 8], [0, 4]], treated = [7, 4].
    //
    // Expect
    // ------
    // - synthetic = [7, 3], gaps = [0, 1].
    fn synthetic_path_and_gaps() {
        let fit = fitted();
        let y0 = array![[4.0, 8.0], [0.0, 4.0]];

        let synthetic = fit.synthetic_outcome(&y0).expect("matching panel");
        let gaps = fit.gaps(&array![7.0, 4.0], &y0).expect("matching panel");

        assert_abs_diff_eq!(synthetic[0], 7.0, epsilon = 1e-15);
        assert_abs_diff_eq!(synthetic[1], 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(gaps[0], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(gaps[1], 1.0, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Inconsistent panels are rejected.
    //
    // Given
    // -----
    // - A 3-column panel, then a treated path of the wrong length.
    //
    // Expect
    // ------
    // - `DimensionMismatch` in both cases.
    fn mismatched_panels_are_rejected() {
        let fit = fitted();

        assert!(matches!(
            fit.synthetic_outcome(&Array2::zeros((2, 3))).unwrap_err(),
            SynthError::DimensionMismatch { what: "donor outcome columns", .. }
        ));
        assert!(matches!(
            fit.gaps(&array![1.0], &Array2::zeros((2, 2))).unwrap_err(),
            SynthError::DimensionMismatch { what: "treated outcome", .. }
        ));
    }

    struct PrePeriodPanel;

    impl Dataprep for PrePeriodPanel {
        fn compute_x0_x1(&self) -> SynthResult<(Array2<f64>, Array1<f64>)> {
            Ok((array![[1.0, 0.0], [0.0, 1.0]], array![0.0, 1.0]))
        }

        fn compute_z0_z1(&self) -> SynthResult<(Array2<f64>, Array1<f64>)> {
            Ok((array![[1.0, 2.0], [3.0, 4.0]], array![2.0, 4.0]))
        }
    }

    #[test]
    // Purpose
    // -------
    // A fit owns only the resolved pre-period matrices; longer outcome panels
    // are supplied explicitly afterwards.
    //
    // Given
    // -----
    // - A `Dataprep` source whose treated unit copies donor 1, fixed V = I.
    // - A 4-period panel extending the 2 pre-treatment periods.
    //
    // Expect
    // ------
    // - `data()` holds exactly the collaborator's matrices.
    // - Gaps over the full panel are [0, 0, 1, 0].
    fn dataprep_fit_keeps_pre_period_data_only() {
        let opts = SynthOptions {
            selection: VSelection::Fixed(Array2::eye(2)),
            ..SynthOptions::default()
        };

        let result = fit(DataSource::from_dataprep(&PrePeriodPanel), &opts).expect("fit");
        let panel = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 9.0]];
        let gaps = result.gaps(&array![2.0, 4.0, 7.0, 9.0], &panel).expect("matching panel");

        assert_eq!(result.data().z0(), &array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(result.data().x1(), &array![0.0, 1.0]);
        for (g, e) in gaps.iter().zip([0.0, 0.0, 1.0, 0.0]) {
            assert_abs_diff_eq!(*g, e, epsilon = 1e-8);
        }
    }
}
