//! Configuration for the simplex QP solver.
use crate::optimization::errors::{OptError, OptResult};
use std::str::FromStr;

/// Default iteration budget for the QP solver.
pub const DEFAULT_QP_MAX_ITER: usize = 1000;

/// Default stopping threshold on the max-abs change between iterates.
pub const DEFAULT_QP_TOL_STEP: f64 = 1e-10;

/// Iteration scheme used by the QP solver.
///
/// Parsing is case-insensitive: `"projected_gradient"` (or `"pg"`) and
/// `"accelerated"` (or `"fista"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QpMethod {
    /// Plain projected gradient with step `1/L`.
    ProjectedGradient,
    /// Nesterov-accelerated projected gradient with adaptive restart.
    Accelerated,
}

impl FromStr for QpMethod {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "projected_gradient" | "pg" => Ok(QpMethod::ProjectedGradient),
            "accelerated" | "fista" => Ok(QpMethod::Accelerated),
            _ => Err(OptError::InvalidQpMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'projected_gradient' or 'accelerated'.",
            }),
        }
    }
}

/// Validated QP solver settings.
///
/// Default: `Accelerated`, `max_iter = 1000`, `tol_step = 1e-10`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QpOptions {
    pub method: QpMethod,
    pub max_iter: usize,
    pub tol_step: f64,
}

impl QpOptions {
    /// # Errors
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    /// - [`OptError::InvalidTolStep`] if `tol_step` is non-finite or ≤ 0.
    pub fn new(method: QpMethod, max_iter: usize, tol_step: f64) -> OptResult<Self> {
        if max_iter == 0 {
            return Err(OptError::InvalidMaxIter {
                max_iter,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        if !tol_step.is_finite() {
            return Err(OptError::InvalidTolStep { tol: tol_step, reason: "Tolerance must be finite." });
        }
        if tol_step <= 0.0 {
            return Err(OptError::InvalidTolStep {
                tol: tol_step,
                reason: "Tolerance must be positive.",
            });
        }
        Ok(Self { method, max_iter, tol_step })
    }
}

impl Default for QpOptions {
    fn default() -> Self {
        Self {
            method: QpMethod::Accelerated,
            max_iter: DEFAULT_QP_MAX_ITER,
            tol_step: DEFAULT_QP_TOL_STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Method names parse case-insensitively and unknown names are rejected.
    //
    // Given
    // -----
    // - "Accelerated", "PG", "newton".
    //
    // Expect
    // ------
    // - Accelerated, ProjectedGradient, `InvalidQpMethod`.
    fn qp_method_parsing() {
        assert_eq!("Accelerated".parse::<QpMethod>().unwrap(), QpMethod::Accelerated);
        assert_eq!("PG".parse::<QpMethod>().unwrap(), QpMethod::ProjectedGradient);
        assert!(matches!(
            "newton".parse::<QpMethod>().unwrap_err(),
            OptError::InvalidQpMethod { .. }
        ));
    }

    #[test]
    // Purpose
    // -------
    // Budget and tolerance are validated.
    //
    // Given
    // -----
    // - `max_iter = 0`, `tol_step = 0`, `tol_step = NaN`.
    //
    // Expect
    // ------
    // - `InvalidMaxIter`, then `InvalidTolStep` twice.
    fn qp_options_validation() {
        assert!(matches!(
            QpOptions::new(QpMethod::Accelerated, 0, 1e-12).unwrap_err(),
            OptError::InvalidMaxIter { .. }
        ));
        assert!(matches!(
            QpOptions::new(QpMethod::Accelerated, 10, 0.0).unwrap_err(),
            OptError::InvalidTolStep { .. }
        ));
        assert!(matches!(
            QpOptions::new(QpMethod::ProjectedGradient, 10, f64::NAN).unwrap_err(),
            OptError::InvalidTolStep { .. }
        ));
    }
}
