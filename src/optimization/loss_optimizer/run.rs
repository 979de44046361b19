//! Execution helpers that run an `argmin` solver on a loss problem and
//! return a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loss_optimizer::{
        Grad, LossFunction, OptimOutcome, SearchOptions, Theta, adapter::ArgMinAdapter,
        types::NelderMeadSolver,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an L-BFGS optimization for a loss problem.
///
/// Shared runner for both line-search variants. It wires up the adapted
/// problem, the solver, the initial parameter `theta0`, optional observers
/// (behind the `obs_slog` feature) and optional `max_iters`, then executes
/// and converts the final state into [`OptimOutcome`].
///
/// # Feature flags
/// With `obs_slog` enabled and `opts.verbose == true`, a terminal slog
/// observer is attached with `ObserverMode::Always` and one pre-iteration
/// line reports `c(θ₀)` and, if available, `‖∇c(θ₀)‖`.
///
/// # Errors
/// - Any `argmin` runtime error (solver, line search, observer) through
///   `From<argmin::core::Error>`; objective errors keep their variant.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &SearchOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LossFunction,
    S: argmin::core::Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), f64>>
        + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem, true)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

/// Run a Nelder–Mead optimization for a loss problem.
///
/// The solver already carries its initial simplex, so no starting parameter
/// is configured on the state. Iteration limits and observers follow
/// [`run_lbfgs`]. The outcome never carries a gradient norm.
///
/// # Errors
/// Same as [`run_lbfgs`].
pub fn run_nelder_mead<F>(
    opts: &SearchOptions, problem: ArgMinAdapter<'_, F>, solver: NelderMeadSolver,
) -> OptResult<OptimOutcome>
where
    F: LossFunction,
{
    let mut optimizer = Executor::new(problem, solver);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        None,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
pub(crate) fn log_initial_state<F>(
    theta0: &Theta, problem: &ArgMinAdapter<'_, F>, with_grad: bool,
) -> OptResult<()>
where
    F: LossFunction,
{
    let c0 = problem.cost(theta0)?;
    let g0n = if with_grad { problem.gradient(theta0).ok().map(|g| g.l2_norm()) } else { None };

    eprintln!(
        "init: cost(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
