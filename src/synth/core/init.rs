//! Initial guess for the predictor-weight search.
//!
//! - `Equal`: every predictor gets `1/n_p`.
//! - `Ols`: regress each unit's outcomes on its (scaled) predictors with an
//!   intercept and weight predictor `j` by `Σ_t β_jt²`, normalized to one.
//!   The least-squares solve uses an SVD, so collinear predictors yield the
//!   minimum-norm coefficients instead of failing.
use crate::{
    optimization::numerical_stability::GENERAL_TOL,
    synth::{
        core::data::SynthData,
        errors::{SynthError, SynthResult},
    },
};
use nalgebra::DMatrix;
use ndarray::Array1;
use std::str::FromStr;

/// Strategy for the starting point of the predictor-weight search.
///
/// Parsing is case-insensitive: `"equal"` or `"ols"`. Anything else is
/// [`SynthError::InvalidInitialGuess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitialGuess {
    #[default]
    Equal,
    Ols,
}

impl FromStr for InitialGuess {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "equal" => Ok(InitialGuess::Equal),
            "ols" => Ok(InitialGuess::Ols),
            _ => Err(SynthError::InvalidInitialGuess { name: s.to_string() }),
        }
    }
}

impl InitialGuess {
    /// Starting vector for `data` (expected to be variance-scaled).
    ///
    /// # Errors
    /// Only the `Ols` strategy can fail; see [`ols_guess`].
    pub fn compute(&self, data: &SynthData) -> SynthResult<Array1<f64>> {
        match self {
            InitialGuess::Equal => Ok(equal_guess(data.n_predictors())),
            InitialGuess::Ols => ols_guess(data),
        }
    }
}

/// `1/n_p` for each of `n_p` predictors.
pub fn equal_guess(n_p: usize) -> Array1<f64> {
    Array1::from_elem(n_p, 1.0 / n_p as f64)
}

/// OLS-based predictor importance.
///
/// Design rows are `[1, x_unit]` for each donor followed by the treated
/// unit; responses are the matching outcome columns of `[Z0 | Z1]`.
///
/// # Errors
/// - `OlsFailed` if the SVD solve is rejected.
/// - `DegenerateOlsGuess` if the squared slope coefficients sum to zero, a
///   non-finite value, or a negligible share (`GENERAL_TOL`) of all squared
///   coefficients including the intercept.
pub fn ols_guess(data: &SynthData) -> SynthResult<Array1<f64>> {
    let (x0, x1, z0, z1) = (data.x0(), data.x1(), data.z0(), data.z1());
    let n_p = data.n_predictors();
    let n_c = data.n_donors();
    let n_t = data.n_periods();
    let n_units = n_c + 1;

    let design = DMatrix::from_fn(n_units, n_p + 1, |unit, col| match (unit, col) {
        (_, 0) => 1.0,
        (u, c) if u < n_c => x0[[c - 1, u]],
        (_, c) => x1[c - 1],
    });
    let responses =
        DMatrix::from_fn(n_units, n_t, |unit, t| if unit < n_c { z0[[t, unit]] } else { z1[t] });

    let svd = design.svd(true, true);
    let eps = f64::EPSILON * (n_units.max(n_p + 1) as f64) * svd.singular_values.max();
    let beta = svd.solve(&responses, eps).map_err(|reason| SynthError::OlsFailed {
        reason: reason.to_string(),
    })?;

    let mut guess =
        Array1::from_shape_fn(n_p, |j| beta.row(j + 1).iter().map(|b| b * b).sum::<f64>());
    let sum = guess.sum();
    let total: f64 = beta.iter().map(|b| b * b).sum();
    if !sum.is_finite() || sum <= 0.0 || sum <= GENERAL_TOL * total {
        return Err(SynthError::DegenerateOlsGuess { sum });
    }
    guess /= sum;
    Ok(guess)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Strategy names parse case-insensitively; unknown names fail.
    //
    // Given
    // -----
    // - "EQUAL", "ols", "bogus".
    //
    // Expect
    // ------
    // - Equal, Ols, `InvalidInitialGuess { name: "bogus" }`.
    fn initial_guess_parsing() {
        assert_eq!("EQUAL".parse::<InitialGuess>().unwrap(), InitialGuess::Equal);
        assert_eq!("ols".parse::<InitialGuess>().unwrap(), InitialGuess::Ols);
        assert_eq!(
            "bogus".parse::<InitialGuess>().unwrap_err(),
            SynthError::InvalidInitialGuess { name: "bogus".to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // The OLS guess is a normalized, non-negative vector.
    //
    // Given
    // -----
    // - X0 = [[1,2,3],[4,1,6]], X1 = [2,3], two outcome periods.
    //
    // Expect
    // ------
    // - Two non-negative entries summing to one.
    fn ols_guess_is_normalized() {
        let data = SynthData::new(
            array![[1.0, 2.0, 3.0], [4.0, 1.0, 6.0]],
            array![2.0, 3.0],
            array![[1.0, 2.0, 3.0], [2.0, 3.0, 5.0]],
            array![1.5, 2.5],
        )
        .expect("valid data");

        let guess = InitialGuess::Ols.compute(&data).expect("ols guess");

        assert_eq!(guess.len(), 2);
        assert!(guess.iter().all(|&g| g >= 0.0));
        assert_abs_diff_eq!(guess.sum(), 1.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Outcomes that no predictor explains give a degenerate guess.
    //
    // Given
    // -----
    // - Constant outcomes, so every slope coefficient is zero.
    //
    // Expect
    // ------
    // - `DegenerateOlsGuess`.
    fn ols_guess_rejects_all_zero_slopes() {
        let data = SynthData::new(
            array![[1.0, 2.0, 3.0], [4.0, 1.0, 6.0]],
            array![2.0, 3.0],
            array![[7.0, 7.0, 7.0]],
            array![7.0],
        )
        .expect("valid data");

        let err = ols_guess(&data).unwrap_err();

        assert!(matches!(err, SynthError::DegenerateOlsGuess { .. }));
    }
}
