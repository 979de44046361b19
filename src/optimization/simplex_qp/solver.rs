//! Projected-gradient solver for [`SimplexQp`].
//!
//! Iterates `w ← Π(y − ∇f(y)/L)` where `Π` is the Euclidean projection onto
//! the simplex and `L = ‖P‖_F`. In accelerated mode `y` is a Nesterov
//! extrapolation of the last two iterates, reset whenever the step points
//! against the momentum (gradient restart). In plain mode `y` is the last
//! iterate.
//!
//! The start is uniform `1/n`. A step whose max-abs change is at most
//! `tol_step` ends the run as converged; exhausting `max_iter` returns the
//! last iterate with `converged = false`.
use crate::optimization::{
    errors::{OptError, OptResult},
    numerical_stability::{GENERAL_TOL, project_onto_simplex},
    simplex_qp::{
        options::{QpMethod, QpOptions},
        problem::SimplexQp,
    },
};
use ndarray::{Array1, Zip};

/// Result of a simplex QP solve.
#[derive(Debug, Clone, PartialEq)]
pub struct QpOutcome {
    /// Minimizer on the probability simplex.
    pub w: Array1<f64>,
    /// Objective value `0.5 wᵀPw + qᵀw` at `w`.
    pub value: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Minimize `problem` over the probability simplex.
///
/// A numerically flat objective (`L` below `GENERAL_TOL`) returns the
/// uniform start as converged after zero iterations.
///
/// # Errors
/// - [`OptError::NonFiniteCost`] if the final objective is not finite.
pub fn solve_simplex_qp(problem: &SimplexQp, opts: &QpOptions) -> OptResult<QpOutcome> {
    let n = problem.dim();
    let mut w = Array1::from_elem(n, 1.0 / n as f64);
    let lipschitz = problem.lipschitz();
    if lipschitz <= GENERAL_TOL {
        let value = problem.value(w.view());
        return finish(w, value, 0, true);
    }
    let step = 1.0 / lipschitz;
    let accelerated = opts.method == QpMethod::Accelerated;

    let mut y = w.clone();
    let mut w_next = Array1::zeros(n);
    let mut t = 1.0_f64;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < opts.max_iter {
        iterations += 1;
        let grad = problem.grad(y.view());
        let trial = &y - &(grad * step);
        project_onto_simplex(trial.view(), &mut w_next);

        let delta = &w_next - &w;
        let change = delta.iter().fold(0.0_f64, |acc, d| acc.max(d.abs()));

        if accelerated {
            // Restart when the step opposes the momentum direction.
            let restart = (&y - &w_next).dot(&delta) > 0.0;
            if restart {
                t = 1.0;
                y.assign(&w_next);
            } else {
                let t_next = 0.5 * (1.0 + (1.0 + 4.0 * t * t).sqrt());
                let beta = (t - 1.0) / t_next;
                Zip::from(&mut y)
                    .and(&w_next)
                    .and(&delta)
                    .for_each(|yi, &wi, &di| *yi = wi + beta * di);
                t = t_next;
            }
        } else {
            y.assign(&w_next);
        }
        w.assign(&w_next);

        if change <= opts.tol_step {
            converged = true;
            break;
        }
    }

    let value = problem.value(w.view());
    finish(w, value, iterations, converged)
}

fn finish(w: Array1<f64>, value: f64, iterations: usize, converged: bool) -> OptResult<QpOutcome> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(QpOutcome { w, value, iterations, converged })
}
