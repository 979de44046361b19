//! PyO3 extraction helpers shared by the Python bindings.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArray1, PyReadonlyArray2};

#[cfg(feature = "python-bindings")]
use crate::synth::core::{data::DataSource, options::SynthOptions};

/// Accept a 1-D `numpy.ndarray`, a `pandas.Series` or a float sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(raw: &Bound<'py, PyAny>, name: &str) -> PyResult<Array1<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method1("to_numpy", ("float64",)) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro.as_array().to_owned());
        }
    }

    let vec: Vec<f64> = raw.extract().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name}: expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64"
        ))
    })?;
    Ok(Array1::from(vec))
}

/// Accept a 2-D `numpy.ndarray`, a `pandas.DataFrame` or a list of equal
/// length float rows.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(raw: &Bound<'py, PyAny>, name: &str) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw.call_method1("to_numpy", ("float64",)) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let type_err = || {
        PyTypeError::new_err(format!(
            "{name}: expected a 2-D numpy.ndarray, pandas.DataFrame, or list of float64 rows"
        ))
    };
    let rows: Vec<Vec<f64>> = raw.extract().map_err(|_| type_err())?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(type_err());
    }
    let nrows = rows.len();
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat).map_err(|_| type_err())
}

/// Turn the arguments of `Synth.fit` into a data source and fit options.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn extract_fit_inputs<'py>(
    x0: &Bound<'py, PyAny>, x1: &Bound<'py, PyAny>, z0: &Bound<'py, PyAny>,
    z1: &Bound<'py, PyAny>, custom_v: Option<&Bound<'py, PyAny>>, optim_method: &str,
    optim_initial: &str, max_iter: usize, qp_max_iter: usize,
) -> PyResult<(DataSource<'static>, SynthOptions)> {
    let source = DataSource::from_matrices(
        extract_f64_matrix(x0, "X0")?,
        extract_f64_array(x1, "X1")?,
        extract_f64_matrix(z0, "Z0")?,
        extract_f64_array(z1, "Z1")?,
    );
    let custom_v = custom_v.map(|v| extract_f64_matrix(v, "custom_V")).transpose()?;
    let opts =
        SynthOptions::from_names(optim_method, optim_initial, max_iter, qp_max_iter, custom_v)?;
    Ok((source, opts))
}
