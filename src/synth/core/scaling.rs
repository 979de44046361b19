//! Joint variance scaling of predictors.
//!
//! Each predictor row of `[X0 | X1]` is divided by its sample standard
//! deviation (denominator `n − 1`) taken over all units, treated included.
//! Outcome matrices are left untouched.
use crate::{
    optimization::numerical_stability::GENERAL_TOL,
    synth::{
        core::data::SynthData,
        errors::{SynthError, SynthResult},
    },
};
use ndarray::Array1;
use statrs::statistics::Statistics;
use std::iter::once;

/// Per-predictor standard deviations over donors and the treated unit.
///
/// # Errors
/// - `ZeroVariancePredictor` if a row is constant (standard deviation at or
///   below `GENERAL_TOL` relative to the row's magnitude) or its variance is
///   not finite.
pub fn predictor_scales(data: &SynthData) -> SynthResult<Array1<f64>> {
    let x0 = data.x0();
    let x1 = data.x1();
    let mut scales = Array1::zeros(data.n_predictors());
    for (index, row) in x0.rows().into_iter().enumerate() {
        let variance = row.iter().chain(once(&x1[index])).variance();
        let max_abs = row.iter().chain(once(&x1[index])).fold(0.0_f64, |m, v| m.max(v.abs()));
        let scale = variance.sqrt();
        if !scale.is_finite() || scale == 0.0 || scale <= GENERAL_TOL * max_abs {
            return Err(SynthError::ZeroVariancePredictor { index, variance });
        }
        scales[index] = scale;
    }
    Ok(scales)
}

/// Return a copy of `data` with predictors divided by [`predictor_scales`].
///
/// # Errors
/// Propagates `ZeroVariancePredictor`.
pub fn scale_predictors(data: &SynthData) -> SynthResult<SynthData> {
    let scales = predictor_scales(data)?;
    let column = scales.view().insert_axis(ndarray::Axis(1));
    let x0 = data.x0() / &column;
    let x1 = data.x1() / &scales;
    Ok(SynthData::from_parts_unchecked(x0, x1, data.z0().clone(), data.z1().clone()))
}
