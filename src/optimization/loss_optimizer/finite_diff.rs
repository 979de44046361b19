//! loss_optimizer::finite_diff: forward-difference gradient fallback.
//!
//! Purpose
//! -------
//! Provide the forward-difference gradient used when a central-difference
//! approximation cannot be trusted (an evaluation failed or produced a
//! non-finite entry). The helper keeps `finitediff` out of the adapter's
//! control flow and turns captured closure failures back into typed errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the objective during differencing is routed into the
//!   shared `closure_err` cell by the caller's closure, which then returns
//!   `NaN`.
//! - Gradients returned from this module satisfy [`validate_grad`].
//!
//! Downstream usage
//! ----------------
//! - [`ArgMinAdapter`](crate::optimization::loss_optimizer::adapter::ArgMinAdapter)
//!   calls [`run_fd_diff`] when a [`LossFunction`](crate::optimization::loss_optimizer::LossFunction)
//!   has no analytic gradient and the central pass failed.
use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{Grad, Theta, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta` with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, then:
/// - returns the captured error if `func` signaled one,
/// - otherwise validates and returns the gradient.
///
/// # Errors
/// - Any error captured in `closure_err` (mapped through `From<Error>`).
/// - [`OptError::GradientDimMismatch`](crate::optimization::errors::OptError::GradientDimMismatch)
///   or [`OptError::InvalidGradient`](crate::optimization::errors::OptError::InvalidGradient)
///   from [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // - Forward-difference gradients with and without closure errors.
    // - Validation failures for non-finite gradients.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A smooth quadratic yields a gradient close to the analytic one.
    //
    // Given
    // -----
    // - f(θ) = θᵀθ at θ = [1, -2].
    //
    // Expect
    // ------
    // - Gradient ≈ [2, -4].
    fn run_fd_diff_quadratic_matches_analytic_gradient() {
        // Arrange
        let theta: Theta = array![1.0, -2.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err).expect("quadratic gradient");

        // Assert
        assert_abs_diff_eq!(grad[0], 2.0, epsilon = 1e-5);
        assert_abs_diff_eq!(grad[1], -4.0, epsilon = 1e-5);
    }

    #[test]
    // Purpose
    // -------
    // An `OptError` captured inside the closure is returned unchanged.
    //
    // Given
    // -----
    // - A closure that stores `DegenerateWeights` and returns NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::DegenerateWeights { .. })`.
    fn run_fd_diff_propagates_captured_error() {
        // Arrange
        let theta: Theta = array![0.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            closure_err.replace(Some(OptError::DegenerateWeights { sum: 0.0 }.into()));
            f64::NAN
        };

        // Act
        let err = run_fd_diff(&theta, &f, &closure_err).unwrap_err();

        // Assert
        assert_eq!(err, OptError::DegenerateWeights { sum: 0.0 });
    }

    #[test]
    // Purpose
    // -------
    // A NaN-valued objective without a captured error fails validation.
    //
    // Given
    // -----
    // - f(θ) = NaN.
    //
    // Expect
    // ------
    // - `Err(OptError::InvalidGradient { .. })`.
    fn run_fd_diff_rejects_non_finite_gradient() {
        let theta: Theta = array![0.0, 1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| f64::NAN;

        let err = run_fd_diff(&theta, &f, &closure_err).unwrap_err();

        assert!(matches!(err, OptError::InvalidGradient { .. }));
    }
}
