//! synth_control: synthetic control estimation with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the estimator to Python via the `_synth_control` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules: `synth` (data, options, fit) and
//!   `optimization` (outer minimizer, simplex QP, numerical helpers).
//! - With `python-bindings`, define the `Synth` class whose `fit` mirrors
//!   the matrix form of [`synth::fit`] and exposes `W`, `V`, `loss_W` and
//!   `loss_V` as read-only properties.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work happens in the inner modules; this file only
//!   converts inputs and maps errors to `PyErr`.
//!
//! Conventions
//! -----------
//! - Python-side names follow the usual synthetic control notation (`X0`,
//!   `X1`, `Z0`, `Z1`, `custom_V`); Rust-side names are snake case.
//! - Errors surface in Python as `ValueError` (bad values) or `TypeError`
//!   (unconvertible inputs).
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_synth_pipeline.rs`.

pub mod optimization;
pub mod synth;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    synth::{SynthFit, fit},
    utils::extract_fit_inputs,
};

/// Synth: Python-facing synthetic control estimator.
///
/// Purpose
/// -------
/// Hold the most recent fit and expose its weights and losses. Before the
/// first successful `fit`, every property is `None`.
///
/// Notes
/// -----
/// - Each `fit` replaces the stored result; a failed `fit` leaves the
///   previous result untouched.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "synth_control")]
#[derive(Default)]
pub struct Synth {
    inner: Option<SynthFit>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Synth {
    #[new]
    pub fn new() -> Self {
        Self::default()
    }

    #[pyo3(
        signature = (
            x0,
            x1,
            z0,
            z1,
            custom_v = None,
            optim_method = "Nelder-Mead",
            optim_initial = "equal",
            max_iter = 1000,
            qp_max_iter = 1000,
        ),
        text_signature = "(self, X0, X1, Z0, Z1, /, custom_V=None, optim_method='Nelder-Mead', \
                          optim_initial='equal', max_iter=1000, qp_max_iter=1000)"
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn fit<'py>(
        &mut self, x0: &Bound<'py, PyAny>, x1: &Bound<'py, PyAny>, z0: &Bound<'py, PyAny>,
        z1: &Bound<'py, PyAny>, custom_v: Option<&Bound<'py, PyAny>>, optim_method: &str,
        optim_initial: &str, max_iter: usize, qp_max_iter: usize,
    ) -> PyResult<()> {
        let (source, opts) = extract_fit_inputs(
            x0,
            x1,
            z0,
            z1,
            custom_v,
            optim_method,
            optim_initial,
            max_iter,
            qp_max_iter,
        )?;
        self.inner = Some(fit(source, &opts)?);
        Ok(())
    }

    /// Donor weights.
    #[getter(W)]
    pub fn w(&self) -> Option<Vec<f64>> {
        self.inner.as_ref().map(|f| f.w().to_vec())
    }

    /// Predictor weights as a row-major nested list.
    #[getter(V)]
    pub fn v(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.as_ref().map(|f| f.v().rows().into_iter().map(|r| r.to_vec()).collect())
    }

    #[getter(loss_W)]
    pub fn loss_w(&self) -> Option<f64> {
        self.inner.as_ref().map(SynthFit::loss_w)
    }

    #[getter(loss_V)]
    pub fn loss_v(&self) -> Option<f64> {
        self.inner.as_ref().map(SynthFit::loss_v)
    }
}

/// Module initializer for the `_synth_control` extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _synth_control(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Synth>()?;
    Ok(())
}
