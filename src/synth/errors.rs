//! Errors for synthetic control fits (configuration, input validation,
//! numeric degeneracies, and optimizer failures).
//!
//! This module defines the model error type, [`SynthError`], used across the
//! Rust core and (behind `python-bindings`) converted to a Python
//! `ValueError` at the PyO3 boundary.
//!
//! ## Conventions
//! - **Indices are 0-based**. Predictor indices refer to rows of `X0`/`X1`,
//!   donor indices to columns of `X0`/`Z0`.
//! - Optimizer failures without a dedicated variant are normalized to
//!   [`SynthError::OptimizationFailed`] with a human-readable status.
//! - Non-convergence is never an error; it is reported on the fit result.
use crate::optimization::errors::OptError;

/// Crate-wide result alias for synthetic control operations.
pub type SynthResult<T> = Result<T, SynthError>;

/// Unified error type for synthetic control estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    // ---- Configuration ----
    /// Neither a data collaborator nor a complete matrix set was supplied.
    MissingData { field: &'static str },

    /// A data collaborator and explicit matrices were both supplied.
    AmbiguousDataSource,

    /// Initial-guess strategy is not recognized.
    InvalidInitialGuess { name: String },

    /// Caller-supplied predictor weights are unusable.
    InvalidPredictorWeights { reason: &'static str },

    // ---- Input validation ----
    /// `X0` has no donor columns.
    EmptyDonorPool,

    /// `X0` has no predictor rows.
    NoPredictors,

    /// `Z0` has no outcome periods.
    NoOutcomePeriods,

    /// Matrix/vector shapes disagree.
    DimensionMismatch { what: &'static str, expected: usize, actual: usize },

    /// A data entry is NaN/±inf.
    NonFiniteData { matrix: &'static str, index: usize, value: f64 },

    // ---- Numeric degeneracy ----
    /// A predictor has zero (or non-finite) variance across units, so it
    /// cannot be scaled.
    ZeroVariancePredictor { index: usize, variance: f64 },

    /// The search vector maps to no valid predictor weights (`Σ|x|` is zero
    /// or non-finite).
    DegenerateSearchVector { sum: f64 },

    /// The OLS-based initial guess sums to zero or a non-finite value.
    DegenerateOlsGuess { sum: f64 },

    /// The least-squares solve behind the OLS guess failed.
    OlsFailed { reason: String },

    // ---- Optimizer ----
    /// Optimizer failed for a reason without a dedicated variant.
    OptimizationFailed { status: String },
}

impl std::error::Error for SynthError {}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            SynthError::MissingData { field } => {
                write!(f, "Missing data: {field} must be supplied (or a dataprep object)")
            }
            SynthError::AmbiguousDataSource => {
                write!(f, "Supply either a dataprep object or the four matrices, not both")
            }
            SynthError::InvalidInitialGuess { name } => {
                write!(f, "Invalid initial guess '{name}': valid options are 'equal' or 'ols'")
            }
            SynthError::InvalidPredictorWeights { reason } => {
                write!(f, "Invalid predictor weights: {reason}")
            }

            // ---- Input validation ----
            SynthError::EmptyDonorPool => write!(f, "Donor pool is empty (X0 has no columns)"),
            SynthError::NoPredictors => write!(f, "No predictors (X0 has no rows)"),
            SynthError::NoOutcomePeriods => write!(f, "No outcome periods (Z0 has no rows)"),
            SynthError::DimensionMismatch { what, expected, actual } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, got {actual}")
            }
            SynthError::NonFiniteData { matrix, index, value } => {
                write!(f, "Non-finite value in {matrix} at flat index {index}: {value}")
            }

            // ---- Numeric degeneracy ----
            SynthError::ZeroVariancePredictor { index, variance } => {
                write!(f, "Predictor {index} has variance {variance} and cannot be scaled")
            }
            SynthError::DegenerateSearchVector { sum } => {
                write!(f, "Search vector maps to no predictor weights: sum of |x| is {sum}")
            }
            SynthError::DegenerateOlsGuess { sum } => {
                write!(f, "OLS initial guess is degenerate: squared coefficients sum to {sum}")
            }
            SynthError::OlsFailed { reason } => {
                write!(f, "Least-squares solve for the OLS guess failed: {reason}")
            }

            // ---- Optimizer ----
            SynthError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }
        }
    }
}

/// Optimizer errors raised while fitting keep their meaning where a model
/// variant exists.
impl From<OptError> for SynthError {
    fn from(err: OptError) -> SynthError {
        match err {
            OptError::DegenerateWeights { sum } => SynthError::DegenerateSearchVector { sum },
            OptError::ThetaLengthMismatch { expected, actual } => {
                SynthError::DimensionMismatch { what: "search vector", expected, actual }
            }
            other => SynthError::OptimizationFailed { status: other.to_string() },
        }
    }
}

/// Model errors raised inside an objective travel through the optimizer as
/// `OptError`.
impl From<SynthError> for OptError {
    fn from(err: SynthError) -> OptError {
        match err {
            SynthError::DegenerateSearchVector { sum } => OptError::DegenerateWeights { sum },
            SynthError::DimensionMismatch { what: "search vector", expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            other => OptError::ObjectiveFailed { text: other.to_string() },
        }
    }
}

/// Convert [`SynthError`] into a Python `ValueError`.
#[cfg(feature = "python-bindings")]
impl std::convert::From<SynthError> for pyo3::PyErr {
    fn from(err: SynthError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // Conversions between the optimizer and model error enums.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Degenerate weights survive the trip through both error layers.
    //
    // Given
    // -----
    // - `SynthError::DegenerateSearchVector { sum: 0.0 }`.
    //
    // Expect
    // ------
    // - Converting to `OptError` and back yields the same variant.
    fn degenerate_search_vector_round_trips() {
        let original = SynthError::DegenerateSearchVector { sum: 0.0 };

        let back = SynthError::from(OptError::from(original.clone()));

        assert_eq!(back, original);
    }

    #[test]
    // Purpose
    // -------
    // Optimizer errors without a model counterpart become `OptimizationFailed`.
    //
    // Given
    // -----
    // - `OptError::MissingThetaHat`.
    //
    // Expect
    // ------
    // - `OptimizationFailed` whose status is the optimizer message.
    fn other_optimizer_errors_map_to_optimization_failed() {
        let err = SynthError::from(OptError::MissingThetaHat);

        assert_eq!(
            err,
            SynthError::OptimizationFailed { status: OptError::MissingThetaHat.to_string() }
        );
    }

    #[test]
    // Purpose
    // -------
    // Only search-vector shape errors map to `ThetaLengthMismatch`; other
    // shape errors raised inside an objective keep their own label.
    //
    // Given
    // -----
    // - `DimensionMismatch` for "search vector" and for "V rows".
    //
    // Expect
    // ------
    // - The first round-trips unchanged.
    // - The second becomes `ObjectiveFailed` and its message still names
    //   "V rows" after returning to the model layer.
    fn dimension_mismatch_keeps_its_label() {
        let theta = SynthError::DimensionMismatch { what: "search vector", expected: 3, actual: 2 };
        let v_rows = SynthError::DimensionMismatch { what: "V rows", expected: 3, actual: 2 };

        let theta_back = SynthError::from(OptError::from(theta.clone()));
        let v_opt = OptError::from(v_rows.clone());
        let v_back = SynthError::from(v_opt.clone());

        assert_eq!(theta_back, theta);
        assert_eq!(v_opt, OptError::ObjectiveFailed { text: v_rows.to_string() });
        match v_back {
            SynthError::OptimizationFailed { status } => assert!(status.contains("V rows")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
