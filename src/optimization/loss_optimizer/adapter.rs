//! Adapter that exposes a user `LossFunction` as an `argmin` problem.
//!
//! The cost handed to `argmin` is the user's loss `c(θ)` unchanged. Analytic
//! gradients are passed through after validation; without one, the cost
//! closure is finite-differenced (central first, forward as fallback).
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loss_optimizer::{
        finite_diff::run_fd_diff,
        traits::LossFunction,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user `LossFunction` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `c(θ)` and rejects non-finite values.
/// - `Gradient::gradient` returns the analytic `∇c(θ)` if available, or a
///   finite-difference gradient of the cost.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LossFunction> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LossFunction> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the user's `value` via `?`.
    /// - `NonFiniteCost` if the value is NaN or infinite.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: LossFunction> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, validate and return it.
    /// - Otherwise compute a central-difference gradient of the cost. If a
    ///   cost evaluation failed during differencing (captured in
    ///   `closure_err`) or the result fails validation, retry once with
    ///   forward differences.
    ///
    /// The FD closure must return `f64`, so failures are parked in
    /// `closure_err` and the closure yields `NaN`.
    ///
    /// # Errors
    /// - User errors from `grad` other than `GradientNotImplemented`.
    /// - Errors raised by cost evaluations on the forward pass.
    /// - Validation errors for wrong dimension or non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
                    return Ok(fd_grad);
                }
                Ok(run_fd_diff(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LossFunction> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LossFunction` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    struct Shifted;

    impl LossFunction for Shifted {
        type Data = Theta;

        fn value(&self, theta: &Theta, data: &Theta) -> OptResult<f64> {
            let d = theta - data;
            Ok(d.dot(&d))
        }

        fn check(&self, _theta: &Theta, _data: &Theta) -> OptResult<()> {
            Ok(())
        }
    }

    struct WithGrad;

    impl LossFunction for WithGrad {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
            Ok(theta.sum())
        }

        fn check(&self, _theta: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            Ok(Grad::from_elem(theta.len(), 1.0))
        }
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Cost pass-through (no sign change).
    // - Analytic gradient pass-through and finite-difference fallback.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The adapter reports the user's loss unchanged.
    //
    // Given
    // -----
    // - c(θ) = ‖θ − d‖² with d = [1, 1] at θ = [0, 0].
    //
    // Expect
    // ------
    // - cost = 2.
    fn cost_is_user_value() {
        let data = array![1.0, 1.0];
        let adapter = ArgMinAdapter::new(&Shifted, &data);

        let cost = adapter.cost(&array![0.0, 0.0]).expect("finite cost");

        assert_abs_diff_eq!(cost, 2.0, epsilon = 1e-15);
    }

    #[test]
    // Purpose
    // -------
    // Without an analytic gradient the adapter differentiates the cost.
    //
    // Given
    // -----
    // - c(θ) = ‖θ − d‖² with d = [1, 1] at θ = [0, 3].
    //
    // Expect
    // ------
    // - ∇c ≈ [-2, 4].
    fn gradient_falls_back_to_finite_differences() {
        let data = array![1.0, 1.0];
        let adapter = ArgMinAdapter::new(&Shifted, &data);

        let g = adapter.gradient(&array![0.0, 3.0]).expect("fd gradient");

        assert_abs_diff_eq!(g[0], -2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(g[1], 4.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // An analytic gradient is used as-is.
    //
    // Given
    // -----
    // - c(θ) = Σθ with ∇c = 1.
    //
    // Expect
    // ------
    // - Gradient of ones.
    fn gradient_uses_analytic_when_available() {
        let adapter = ArgMinAdapter::new(&WithGrad, &());

        let g = adapter.gradient(&array![5.0, -5.0, 0.0]).expect("analytic gradient");

        assert!(g.iter().all(|&gi| gi == 1.0));
    }
}
