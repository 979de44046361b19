//! Predictor-weight search and the composed synthetic control fit.
//!
//! Purpose
//! -------
//! Choose predictor weights `V` so that the donor weights they induce
//! reproduce the treated unit's pre-treatment outcomes as closely as
//! possible, and package the final weights as a [`SynthFit`].
//!
//! Key behaviors
//! -------------
//! - [`PredictorWeightLoss`] implements [`LossFunction`]: a free vector `x`
//!   maps to `V = diag(|x|)/Σ|x|` and the loss is the inner `loss_v`.
//! - [`solve_predictor_weights`] scales predictors, builds the initial guess
//!   and runs the outer minimizer, then re-solves the inner problem at the
//!   best point.
//! - [`fit`] resolves the data source and either evaluates a fixed `V`
//!   (early return, no search) or runs the search.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every `V` produced by the search is diagonal, non-negative and sums to
//!   one; the all-zero search vector is an error, never NaN.
//! - The outer minimizer sees model errors as `OptError` and they come back
//!   as `SynthError` with the same meaning where a variant exists.
use crate::{
    optimization::{
        errors::OptResult,
        loss_optimizer::{
            LossFunction, OptimOutcome, SearchOptions, Theta, minimize,
            validation::validate_theta,
        },
        numerical_stability::abs_simplex_weights,
        simplex_qp::QpOptions,
    },
    synth::{
        core::{
            data::{DataSource, SynthData},
            options::{SynthOptions, VSelection},
            scaling::scale_predictors,
            validation::validate_predictor_weights,
        },
        errors::SynthResult,
        models::{
            results::SynthFit,
            unit_weights::{WeightResult, solve_unit_weights},
        },
    },
};
use ndarray::{Array1, Array2, ArrayView1};

/// Map a free search vector to predictor weights `diag(|x|)/Σ|x|`.
///
/// # Errors
/// `DegenerateSearchVector` if `Σ|x|` is zero or non-finite.
pub fn predictor_weights(x: ArrayView1<f64>) -> SynthResult<Array2<f64>> {
    let diag = abs_simplex_weights(x)?;
    Ok(Array2::from_diag(&diag))
}

/// Outer objective: outcome loss of the donor weights induced by `x`.
///
/// The data payload is the variance-scaled [`SynthData`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictorWeightLoss {
    pub qp: QpOptions,
}

impl LossFunction for PredictorWeightLoss {
    type Data = SynthData;

    fn value(&self, theta: &Theta, data: &SynthData) -> OptResult<f64> {
        let v = Array2::from_diag(&abs_simplex_weights(theta.view())?);
        let weights = solve_unit_weights(&v, data, &self.qp)?;
        Ok(weights.loss_v)
    }

    fn check(&self, theta: &Theta, data: &SynthData) -> OptResult<()> {
        validate_theta(theta, data.n_predictors())?;
        abs_simplex_weights(theta.view())?;
        Ok(())
    }
}

/// Result of the predictor-weight search.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorWeights {
    pub v: Array2<f64>,
    pub weights: WeightResult,
    pub outcome: OptimOutcome,
}

/// Search predictor weights on already scaled data, starting from `x0`.
///
/// # Errors
/// - `DegenerateSearchVector` if `x0` (or the best point) is all zero.
/// - `DimensionMismatch` if `x0` does not have one entry per predictor.
/// - Other optimizer failures as `OptimizationFailed`.
pub fn search_predictor_weights(
    scaled: &SynthData, x0: Array1<f64>, search: &SearchOptions, qp: &QpOptions,
) -> SynthResult<PredictorWeights> {
    let loss = PredictorWeightLoss { qp: *qp };
    let outcome = minimize(&loss, x0, scaled, search)?;
    let v = predictor_weights(outcome.theta_hat.view())?;
    let weights = solve_unit_weights(&v, scaled, qp)?;
    Ok(PredictorWeights { v, weights, outcome })
}

/// Scale predictors, build the initial guess from `opts.initial` and search
/// predictor weights.
///
/// `data` is the unscaled input; the returned weights refer to the scaled
/// predictors.
///
/// # Errors
/// - `ZeroVariancePredictor` from scaling.
/// - Initial-guess errors (`DegenerateOlsGuess`, `OlsFailed`).
/// - Errors of [`search_predictor_weights`].
pub fn solve_predictor_weights(
    data: &SynthData, opts: &SynthOptions,
) -> SynthResult<PredictorWeights> {
    let scaled = scale_predictors(data)?;
    let x0 = opts.initial.compute(&scaled)?;
    search_predictor_weights(&scaled, x0, &opts.search, &opts.qp)
}

/// Fit a synthetic control.
///
/// - `VSelection::Fixed(V)`: validate `V`, scale predictors and return the
///   donor weights for that `V`. The search does not run and the result has
///   no search outcome.
/// - `VSelection::Search`: run [`solve_predictor_weights`].
///
/// # Errors
/// - Data-source errors (`MissingData`, `AmbiguousDataSource`) and input
///   validation errors, before any numeric work.
/// - `DimensionMismatch` / `InvalidPredictorWeights` for a fixed `V`.
/// - Errors of [`solve_predictor_weights`].
pub fn fit(source: DataSource<'_>, opts: &SynthOptions) -> SynthResult<SynthFit> {
    let data = source.resolve()?;
    if let VSelection::Fixed(v) = &opts.selection {
        validate_predictor_weights(v, data.n_predictors())?;
        let scaled = scale_predictors(&data)?;
        let weights = solve_unit_weights(v, &scaled, &opts.qp)?;
        return Ok(SynthFit::new(v.clone(), weights, data, None));
    }

    let found = solve_predictor_weights(&data, opts)?;
    Ok(SynthFit::new(found.v, found.weights, data, Some(found.outcome)))
}
