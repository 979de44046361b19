//! Shape and finiteness checks for fit inputs and caller-supplied weights.
use crate::synth::errors::{SynthError, SynthResult};
use ndarray::{Array1, Array2};

/// Validate the four fit matrices against each other.
///
/// # Errors
/// - `NoPredictors` / `EmptyDonorPool` if `X0` has no rows / columns.
/// - `NoOutcomePeriods` if `Z0` has no rows.
/// - `DimensionMismatch` for `X1`, `Z0` columns or `Z1`.
/// - `NonFiniteData` for the first NaN/±inf entry (row-major flat index).
pub fn validate_matrices(
    x0: &Array2<f64>, x1: &Array1<f64>, z0: &Array2<f64>, z1: &Array1<f64>,
) -> SynthResult<()> {
    let (n_p, n_c) = x0.dim();
    if n_p == 0 {
        return Err(SynthError::NoPredictors);
    }
    if n_c == 0 {
        return Err(SynthError::EmptyDonorPool);
    }
    if x1.len() != n_p {
        return Err(SynthError::DimensionMismatch { what: "X1", expected: n_p, actual: x1.len() });
    }
    let n_t = z0.nrows();
    if n_t == 0 {
        return Err(SynthError::NoOutcomePeriods);
    }
    if z0.ncols() != n_c {
        return Err(SynthError::DimensionMismatch {
            what: "Z0 columns",
            expected: n_c,
            actual: z0.ncols(),
        });
    }
    if z1.len() != n_t {
        return Err(SynthError::DimensionMismatch { what: "Z1", expected: n_t, actual: z1.len() });
    }
    check_finite("X0", x0.iter())?;
    check_finite("X1", x1.iter())?;
    check_finite("Z0", z0.iter())?;
    check_finite("Z1", z1.iter())?;
    Ok(())
}

/// Validate a caller-supplied predictor-weight matrix.
///
/// `V` must be `n_p × n_p`, diagonal, finite, non-negative, with a positive
/// diagonal sum. It does not need to be normalized.
///
/// # Errors
/// - `DimensionMismatch` for a wrong shape.
/// - `InvalidPredictorWeights` for any other violation.
pub fn validate_predictor_weights(v: &Array2<f64>, n_p: usize) -> SynthResult<()> {
    if v.nrows() != n_p {
        return Err(SynthError::DimensionMismatch {
            what: "V rows",
            expected: n_p,
            actual: v.nrows(),
        });
    }
    if v.ncols() != n_p {
        return Err(SynthError::DimensionMismatch {
            what: "V columns",
            expected: n_p,
            actual: v.ncols(),
        });
    }
    if v.iter().any(|x| !x.is_finite()) {
        return Err(SynthError::InvalidPredictorWeights { reason: "entries must be finite" });
    }
    for ((i, j), &x) in v.indexed_iter() {
        if i != j && x != 0.0 {
            return Err(SynthError::InvalidPredictorWeights { reason: "matrix must be diagonal" });
        }
    }
    let diag = v.diag();
    if diag.iter().any(|&x| x < 0.0) {
        return Err(SynthError::InvalidPredictorWeights {
            reason: "diagonal entries must be non-negative",
        });
    }
    if diag.sum() <= 0.0 {
        return Err(SynthError::InvalidPredictorWeights {
            reason: "at least one diagonal entry must be positive",
        });
    }
    Ok(())
}

fn check_finite<'a>(matrix: &'static str, values: impl Iterator<Item = &'a f64>) -> SynthResult<()> {
    for (index, &value) in values.enumerate() {
        if !value.is_finite() {
            return Err(SynthError::NonFiniteData { matrix, index, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Each shape rule produces its own error.
    //
    // Given
    // -----
    // - Empty X0 rows, empty X0 columns, short X1, wrong Z0 width, short Z1.
    //
    // Expect
    // ------
    // - The matching variant for each case.
    fn shape_rules() {
        let x0 = array![[1.0, 2.0], [3.0, 4.0]];
        let x1 = array![1.0, 2.0];
        let z0 = array![[1.0, 2.0]];
        let z1 = array![1.0];

        assert_eq!(
            validate_matrices(&Array2::zeros((0, 2)), &Array1::zeros(0), &z0, &z1).unwrap_err(),
            SynthError::NoPredictors
        );
        assert_eq!(
            validate_matrices(&Array2::zeros((2, 0)), &x1, &Array2::zeros((1, 0)), &z1)
                .unwrap_err(),
            SynthError::EmptyDonorPool
        );
        assert!(matches!(
            validate_matrices(&x0, &array![1.0], &z0, &z1).unwrap_err(),
            SynthError::DimensionMismatch { what: "X1", .. }
        ));
        assert!(matches!(
            validate_matrices(&x0, &x1, &array![[1.0, 2.0, 3.0]], &z1).unwrap_err(),
            SynthError::DimensionMismatch { what: "Z0 columns", .. }
        ));
        assert!(matches!(
            validate_matrices(&x0, &x1, &z0, &array![1.0, 2.0]).unwrap_err(),
            SynthError::DimensionMismatch { what: "Z1", .. }
        ));
        assert!(validate_matrices(&x0, &x1, &z0, &z1).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Non-finite data is located by matrix and flat index.
    //
    // Given
    // -----
    // - Z0 = [[1, NaN]].
    //
    // Expect
    // ------
    // - `NonFiniteData { matrix: "Z0", index: 1, .. }`.
    fn non_finite_entries_are_located() {
        let err = validate_matrices(
            &array![[1.0, 2.0]],
            &array![1.5],
            &array![[1.0, f64::NAN]],
            &array![1.0],
        )
        .unwrap_err();

        assert!(matches!(err, SynthError::NonFiniteData { matrix: "Z0", index: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Predictor weights must be a non-negative, non-zero diagonal.
    //
    // Given
    // -----
    // - Off-diagonal, negative, all-zero and valid 2×2 matrices.
    //
    // Expect
    // ------
    // - `InvalidPredictorWeights` three times, then `Ok`.
    fn predictor_weight_rules() {
        let bad = [
            array![[1.0, 0.1], [0.0, 1.0]],
            array![[1.0, 0.0], [0.0, -1.0]],
            Array2::zeros((2, 2)),
        ];
        for v in bad.iter() {
            assert!(matches!(
                validate_predictor_weights(v, 2).unwrap_err(),
                SynthError::InvalidPredictorWeights { .. }
            ));
        }
        assert!(validate_predictor_weights(&array![[2.0, 0.0], [0.0, 0.0]], 2).is_ok());
        assert!(matches!(
            validate_predictor_weights(&Array2::eye(3), 2).unwrap_err(),
            SynthError::DimensionMismatch { what: "V rows", .. }
        ));
    }
}
