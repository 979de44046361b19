//! High-level entry point for minimizing a user-provided `LossFunction`.
//!
//! Selects Nelder–Mead or L-BFGS (with Hager–Zhang or More–Thuente line
//! search), wraps the model in an `ArgMinAdapter` and delegates the run to
//! the matching runner.
use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_nelder_mead, build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::{run_lbfgs, run_nelder_mead},
        traits::{LineSearcher, LossFunction, SearchMethod, SearchOptions},
    },
};

/// Minimize a loss `c(θ)` with the configured search method.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter`.
/// - `SearchMethod::NelderMead`: builds a simplex around `theta0` and runs
///   [`run_nelder_mead`]. With `obs_slog` and `verbose`, logs `c(θ₀)` first.
/// - `SearchMethod::Lbfgs`: builds L-BFGS with the line search chosen by
///   `opts.line_searcher` and runs [`run_lbfgs`].
///
/// # Errors
/// - Any error from `f.check`.
/// - Builder errors from `build_*`.
/// - Runtime errors from the runners, including objective failures.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use synth_control::optimization::errors::OptResult;
/// use synth_control::optimization::loss_optimizer::{
///     minimize, LossFunction, SearchOptions, Theta,
/// };
///
/// struct Bowl;
/// impl LossFunction for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.3, -0.2], &(), &SearchOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), synth_control::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: LossFunction>(
    f: &F, theta0: Theta, data: &F::Data, opts: &SearchOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.method {
        SearchMethod::NelderMead => {
            #[cfg(feature = "obs_slog")]
            if opts.verbose {
                crate::optimization::loss_optimizer::run::log_initial_state(
                    &theta0, &problem, false,
                )?;
            }
            let solver = build_nelder_mead(&theta0, opts)?;
            run_nelder_mead(opts, problem, solver)
        }
        SearchMethod::Lbfgs => match opts.line_searcher {
            LineSearcher::MoreThuente => {
                let solver = build_optimizer_more_thuente(opts)?;
                run_lbfgs(theta0, opts, problem, solver)
            }
            LineSearcher::HagerZhang => {
                let solver = build_optimizer_hager_zhang(opts)?;
                run_lbfgs(theta0, opts, problem, solver)
            }
        },
    }
}
